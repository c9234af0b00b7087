//! Types that can be used in other crates

use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ValidationError};

/// This Unit struct represents MinorUnit in which the processor expects the amount.
/// Paise for INR, cents for USD: always an integer, never a fraction.
#[derive(Default, Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// gets amount as i64 value
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// checks the amount is at least one minor unit
    pub fn ensure_positive(self) -> CustomResult<Self, ValidationError> {
        if self.0 >= 1 {
            Ok(self)
        } else {
            Err(ValidationError::InvalidValue {
                message: format!("amount must be a positive integer in minor units, got {}", self.0),
            }
            .into())
        }
    }
}

impl std::fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod amount_tests {
    use super::*;

    #[test]
    fn test_minor_unit_serializes_as_plain_integer() {
        let amount = MinorUnit::new(10_000);
        assert_eq!(serde_json::to_string(&amount).ok(), Some("10000".to_string()));

        let parsed: MinorUnit = serde_json::from_str("250").expect("valid amount");
        assert_eq!(parsed.get_amount_as_i64(), 250);
    }

    #[test]
    fn test_fractional_amount_is_rejected() {
        assert!(serde_json::from_str::<MinorUnit>("10.5").is_err());
    }

    #[test]
    fn test_ensure_positive() {
        assert!(MinorUnit::new(1).ensure_positive().is_ok());
        assert!(MinorUnit::new(0).ensure_positive().is_err());
        assert!(MinorUnit::new(-100).ensure_positive().is_err());
    }
}
