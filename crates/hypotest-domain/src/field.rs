//! Input field module
//!
//! A field mirrors one text input: the raw text, the number parsed from it and
//! whether that number is usable. Fields are immutable; a change of text
//! produces a new field.

/// One numeric input as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Text exactly as entered
    pub raw: String,
    /// Parsed number, NaN when invalid
    pub parsed: f64,
    /// Whether `parsed` may be used in computation
    pub valid: bool,
}

impl Field {
    /// Parse raw text into a field
    ///
    /// Empty text, unparsable text and non-finite numbers are invalid.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());

        match parsed {
            Some(value) => Self {
                raw,
                parsed: value,
                valid: true,
            },
            None => Self {
                raw,
                parsed: f64::NAN,
                valid: false,
            },
        }
    }

    /// Keep the field valid only if `is_valid` accepts the parsed value
    pub fn check(self, is_valid: impl FnOnce(f64) -> bool) -> Self {
        if self.valid && !is_valid(self.parsed) {
            self.invalidate()
        } else {
            self
        }
    }

    /// Mark the field invalid, keeping its raw text
    pub fn invalidate(self) -> Self {
        Self {
            raw: self.raw,
            parsed: f64::NAN,
            valid: false,
        }
    }

    /// Parsed value when valid
    pub fn value(&self) -> Option<f64> {
        self.valid.then_some(self.parsed)
    }

    /// Parsed value as a non-negative integer, when valid and integral
    pub fn as_count(&self) -> Option<u64> {
        self.value()
            .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
            .map(|v| v as u64)
    }
}
