//! Validation configuration

use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// Handling of a binomial sample value equal to n⋅p
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiePolicy {
    /// Mark the sample value invalid before any computation runs
    Reject,

    /// Accept the input; a two-tailed test then reports an indeterminate tail
    Indeterminate,
}

impl Default for TiePolicy {
    fn default() -> Self {
        TiePolicy::Reject
    }
}

/// Configuration for input validation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// What to do when the binomial sample value equals n⋅p
    #[serde(default)]
    pub tie_policy: TiePolicy,

    /// Largest binomial sample size accepted (bounds the critical-value scan)
    #[serde(default = "default_max_binomial_sample_size")]
    pub max_binomial_sample_size: u64,

    /// Accept a binomial sample value of zero
    #[serde(default = "default_true")]
    pub allow_zero_sample_value: bool,
}

fn default_max_binomial_sample_size() -> u64 {
    100_000
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tie_policy: TiePolicy::Reject,
            max_binomial_sample_size: default_max_binomial_sample_size(),
            allow_zero_sample_value: true,
        }
    }
}

impl ValidationConfig {
    /// Lenient configuration: ties flow through as indeterminate results
    pub fn lenient() -> Self {
        Self {
            tie_policy: TiePolicy::Indeterminate,
            ..Self::default()
        }
    }

    /// Strict configuration: zero successes are rejected as well as ties
    pub fn strict() -> Self {
        Self {
            tie_policy: TiePolicy::Reject,
            max_binomial_sample_size: 10_000,
            allow_zero_sample_value: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_binomial_sample_size == 0 {
            return Err(ValidationError::Config(
                "max_binomial_sample_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.tie_policy, TiePolicy::Reject);
        assert_eq!(config.max_binomial_sample_size, 100_000);
        assert!(config.allow_zero_sample_value);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(ValidationConfig::lenient().tie_policy, TiePolicy::Indeterminate);
        assert!(!ValidationConfig::strict().allow_zero_sample_value);
    }

    #[test]
    fn test_zero_sample_size_limit_rejected() {
        let config = ValidationConfig {
            max_binomial_sample_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::Config(_))));
    }

    #[test]
    fn test_serde_defaults() {
        let config: ValidationConfig = serde_json::from_str(r#"{"tie_policy": "indeterminate"}"#).unwrap();
        assert_eq!(config.tie_policy, TiePolicy::Indeterminate);
        assert_eq!(config.max_binomial_sample_size, 100_000);
        assert!(config.allow_zero_sample_value);
    }
}
