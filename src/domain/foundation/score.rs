//! Score value object - a 0-10 rating on one evaluation dimension.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ValidationError;

/// A bounded interview score in `0..=10`.
///
/// Construction from untrusted model output goes through [`Score::clamped`]
/// (or the lenient `Deserialize` impl) and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;

    /// Creates a score, rejecting values outside `0..=10`.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::out_of_range(
                "score",
                Self::MIN as i64,
                Self::MAX as i64,
                value,
            ))
        }
    }

    /// Creates a score, clamping out-of-range values into `0..=10`.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// The zero score used when nothing could be extracted.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the raw value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Lenient conversion from arbitrary JSON.
    ///
    /// Integers are clamped, floats truncated then clamped, numeric strings
    /// parsed; anything else is zero.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::clamped(i)
                } else {
                    n.as_f64()
                        .filter(|f| f.is_finite())
                        .map(|f| Self::clamped(f.trunc() as i64))
                        .unwrap_or_default()
                }
            }
            serde_json::Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| Self::clamped(f.trunc() as i64))
                .unwrap_or_default(),
            _ => Self::zero(),
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Score::from_json(&value))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn try_new_accepts_bounds() {
        assert_eq!(Score::try_new(0).unwrap().value(), 0);
        assert_eq!(Score::try_new(10).unwrap().value(), 10);
        assert!(Score::try_new(11).is_err());
        assert!(Score::try_new(-1).is_err());
    }

    #[test]
    fn clamped_pins_to_range() {
        assert_eq!(Score::clamped(42).value(), 10);
        assert_eq!(Score::clamped(-3).value(), 0);
        assert_eq!(Score::clamped(7).value(), 7);
    }

    #[test]
    fn from_json_is_lenient() {
        assert_eq!(Score::from_json(&json!(8)).value(), 8);
        assert_eq!(Score::from_json(&json!(7.9)).value(), 7);
        assert_eq!(Score::from_json(&json!("6")).value(), 6);
        assert_eq!(Score::from_json(&json!(150)).value(), 10);
        assert_eq!(Score::from_json(&json!(null)).value(), 0);
        assert_eq!(Score::from_json(&json!("great")).value(), 0);
        assert_eq!(Score::from_json(&json!([1, 2])).value(), 0);
    }

    #[test]
    fn deserialize_never_fails_on_wrong_type() {
        let score: Score = serde_json::from_str("{\"a\":1}").unwrap();
        assert_eq!(score, Score::zero());
    }

    #[test]
    fn displays_out_of_ten() {
        assert_eq!(Score::clamped(9).to_string(), "9/10");
    }
}
