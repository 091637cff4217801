//! Alternative hypothesis inequality and rejection tails

use crate::symbols;

/// Inequality of the alternative hypothesis H₁ against the null value
///
/// - Less: one-tailed, rejection region in the lower tail
/// - Greater: one-tailed, rejection region in the upper tail
/// - NotEqual: two-tailed, the relevant tail is chosen from the sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inequality {
    /// H₁: parameter < null value
    Less,

    /// H₁: parameter > null value
    Greater,

    /// H₁: parameter ≠ null value
    NotEqual,
}

impl Inequality {
    /// Whether the test splits its significance level across both tails
    pub fn is_two_tailed(&self) -> bool {
        matches!(self, Inequality::NotEqual)
    }

    /// The fixed tail of a one-tailed test (None for two-tailed)
    pub fn tail(&self) -> Option<Tail> {
        match self {
            Inequality::Less => Some(Tail::Lower),
            Inequality::Greater => Some(Tail::Upper),
            Inequality::NotEqual => None,
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Inequality::Less => symbols::LESS,
            Inequality::Greater => symbols::GREATER,
            Inequality::NotEqual => symbols::NOT_EQUAL,
        }
    }

    /// Machine-friendly name
    pub fn as_str(&self) -> &'static str {
        match self {
            Inequality::Less => "less",
            Inequality::Greater => "greater",
            Inequality::NotEqual => "not-equal",
        }
    }

    /// Parse an inequality from its symbol or name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "<" | "less" | "lt" | "lower" => Some(Inequality::Less),
            ">" | "greater" | "gt" | "upper" => Some(Inequality::Greater),
            "!=" | "≠" | "<>" | "not-equal" | "ne" | "two-tailed" => Some(Inequality::NotEqual),
            _ => None,
        }
    }
}

impl std::str::FromStr for Inequality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid inequality: {}", s))
    }
}

impl std::fmt::Display for Inequality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Tail of the sampling distribution holding the critical region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tail {
    /// Small values of the statistic are evidence against H₀
    Lower,

    /// Large values of the statistic are evidence against H₀
    Upper,
}

impl Tail {
    /// Tail name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Tail::Lower => "lower",
            Tail::Upper => "upper",
        }
    }

    /// The inequality a statistic must satisfy to lie in this tail
    pub fn region_symbol(&self) -> &'static str {
        match self {
            Tail::Lower => symbols::LESS_EQUAL,
            Tail::Upper => symbols::GREATER_EQUAL,
        }
    }
}

impl std::fmt::Display for Tail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
