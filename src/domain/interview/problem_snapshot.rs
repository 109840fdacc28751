//! Frozen copy of the problem definition an interview was started against.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Immutable snapshot of the problem definition taken at interview start.
///
/// Later edits to the problem catalogue never reach an existing interview;
/// the snapshot is the only problem text the interviewer prompts ever see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemSnapshot(serde_json::Value);

impl ProblemSnapshot {
    /// Wraps a JSON problem definition.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the value is `null`, an empty object or an empty string
    pub fn new(value: serde_json::Value) -> Result<Self, ValidationError> {
        let empty = match &value {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            serde_json::Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if empty {
            return Err(ValidationError::empty_field("problem_snapshot"));
        }
        Ok(Self(value))
    }

    /// Returns the raw JSON value.
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Problem title, if the snapshot carries one.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(|t| t.as_str())
    }

    /// Text interpolated into prompts: the compact JSON encoding.
    pub fn render(&self) -> String {
        match &self.0 {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_empty_snapshots() {
        assert!(ProblemSnapshot::new(json!(null)).is_err());
        assert!(ProblemSnapshot::new(json!({})).is_err());
        assert!(ProblemSnapshot::new(json!("  ")).is_err());
    }

    #[test]
    fn renders_compact_json() {
        let snapshot = ProblemSnapshot::new(json!({"title": "Two Sum"})).unwrap();
        assert_eq!(snapshot.render(), r#"{"title":"Two Sum"}"#);
        assert_eq!(snapshot.title(), Some("Two Sum"));
    }

    #[test]
    fn renders_plain_string_snapshots_verbatim() {
        let snapshot = ProblemSnapshot::new(json!("Reverse a linked list")).unwrap();
        assert_eq!(snapshot.render(), "Reverse a linked list");
        assert_eq!(snapshot.title(), None);
    }
}
