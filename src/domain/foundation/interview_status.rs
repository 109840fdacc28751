//! InterviewStatus enum for tracking the lifecycle of an interview.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of an interview session.
///
/// `Active -> Completed` happens on End; `Active -> Abandoned` is the
/// reserved exit for interviews the candidate walks away from.
/// Both targets are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    #[default]
    Active,
    Completed,
    Abandoned,
}

impl InterviewStatus {
    /// Returns true if chat turns may still be appended.
    pub fn is_active(&self) -> bool {
        matches!(self, InterviewStatus::Active)
    }

    /// Storage/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Active => "active",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Abandoned => "abandoned",
        }
    }
}

impl StateMachine for InterviewStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use InterviewStatus::*;
        match self {
            Active => vec![Completed, Abandoned],
            Completed | Abandoned => vec![],
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InterviewStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(InterviewStatus::Active),
            "completed" => Ok(InterviewStatus::Completed),
            "abandoned" => Ok(InterviewStatus::Abandoned),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown interview status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [InterviewStatus; 3] = [
        InterviewStatus::Active,
        InterviewStatus::Completed,
        InterviewStatus::Abandoned,
    ];

    #[test]
    fn default_is_active() {
        assert_eq!(InterviewStatus::default(), InterviewStatus::Active);
    }

    #[test]
    fn active_can_complete_or_abandon() {
        assert!(InterviewStatus::Active.can_transition_to(&InterviewStatus::Completed));
        assert!(InterviewStatus::Active.can_transition_to(&InterviewStatus::Abandoned));
        assert!(!InterviewStatus::Active.can_transition_to(&InterviewStatus::Active));
    }

    #[test]
    fn completed_and_abandoned_are_terminal() {
        assert!(InterviewStatus::Completed.is_terminal());
        assert!(InterviewStatus::Abandoned.is_terminal());
        assert!(!InterviewStatus::Active.is_terminal());
    }

    #[test]
    fn no_transition_leaves_a_terminal_state() {
        for from in [InterviewStatus::Completed, InterviewStatus::Abandoned] {
            for to in ALL {
                assert!(from.transition_to(to).is_err(), "{:?} -> {:?}", from, to);
            }
        }
    }

    #[test]
    fn transition_error_carries_state_code() {
        let err = InterviewStatus::Completed
            .transition_to(InterviewStatus::Active)
            .unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn string_form_roundtrips() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<InterviewStatus>().unwrap(), status);
        }
        assert!("paused".parse::<InterviewStatus>().is_err());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&InterviewStatus::Completed).unwrap(),
            "\"completed\""
        );
        let status: InterviewStatus = serde_json::from_str("\"abandoned\"").unwrap();
        assert_eq!(status, InterviewStatus::Abandoned);
    }
}
