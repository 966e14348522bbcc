//=========================================================================
// Transition Errors
//=========================================================================
//
// Caller-facing error taxonomy for scheduling and running transitions.
//
// Scheduling errors (underflow, unresolved screen, busy stack) are
// reported before any engine mutation. A structural violation aborts the
// transition at the point of detection; engine mutations already applied
// are not rolled back, because the underlying scene operations are not
// transactional.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use thiserror::Error;

//=== TransitionError =====================================================

/// Errors raised when scheduling or running a scene transition.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The requested loading screen id is not registered.
    ///
    /// Reported at schedule time, before any engine mutation.
    #[error("loading screen '{0}' is not registered")]
    UnresolvedLoadingScreen(String),

    /// Pop was requested while the stack holds one frame or fewer.
    ///
    /// The stack and engine state are left untouched.
    #[error("cannot pop the last remaining frame")]
    StackUnderflow,

    /// A transition is already in flight on this stack.
    ///
    /// At most one transition runs at a time; callers must wait for the
    /// current one to finish before scheduling another.
    #[error("a transition is already in flight")]
    TransitionInFlight,

    /// A loaded scene does not expose exactly one root object carrying a
    /// lifecycle controller.
    ///
    /// This is a contract on all scene content; it aborts the transition
    /// where it is detected.
    #[error("scene '{scene}' violates the single-root contract: {violation}")]
    StructuralViolation {
        scene: String,
        violation: RootViolation,
    },
}

//=== RootViolation =======================================================

/// The specific way a scene broke the single-root contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootViolation {
    /// The scene exposed this many root objects instead of exactly one.
    RootCount(usize),

    /// The single root (named here) carries no lifecycle controller.
    MissingController(String),
}

impl fmt::Display for RootViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootCount(count) => write!(f, "expected 1 root object, found {}", count),
            Self::MissingController(root) => {
                write!(f, "root '{}' has no lifecycle controller", root)
            }
        }
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_violation_messages_name_the_scene() {
        let err = TransitionError::StructuralViolation {
            scene: "level1".to_string(),
            violation: RootViolation::RootCount(3),
        };
        let message = err.to_string();
        assert!(message.contains("level1"));
        assert!(message.contains("found 3"));

        let err = TransitionError::StructuralViolation {
            scene: "level2".to_string(),
            violation: RootViolation::MissingController("Root".to_string()),
        };
        assert!(err.to_string().contains("no lifecycle controller"));
    }

    #[test]
    fn scheduling_errors_are_descriptive() {
        assert_eq!(
            TransitionError::UnresolvedLoadingScreen("fade".to_string()).to_string(),
            "loading screen 'fade' is not registered"
        );
        assert_eq!(
            TransitionError::StackUnderflow.to_string(),
            "cannot pop the last remaining frame"
        );
    }
}
