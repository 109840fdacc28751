//! State machine trait for lifecycle status enums.

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// Implementors list their outgoing edges once in `valid_transitions`;
/// validation and terminal detection are derived from it.
///
/// ```ignore
/// let next = InterviewStatus::Active.transition_to(InterviewStatus::Completed)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the edge does not exist
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            )
            .with_detail("from", format!("{:?}", self))
            .with_detail("to", format!("{:?}", target)))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
