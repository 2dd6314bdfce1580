// vote.rs — The tri-state outcome of a limitation evaluation.

use serde::{Deserialize, Serialize};

/// The outcome of evaluating one limitation against one object.
///
/// `Abstain` means "this rule does not apply to that kind of object" — a
/// multi-limitation policy combinator skips abstaining rules instead of
/// treating them as denials or aborting on them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    /// The rule applies and permits the operation.
    Granted,
    /// The rule applies and forbids the operation.
    Denied,
    /// The rule does not apply to this object/target shape; defer to others.
    Abstain,
}

impl Vote {
    /// Returns `true` if the vote is `Granted`.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Vote::Granted)
    }

    /// Returns `true` if the vote is `Denied`.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Vote::Denied)
    }

    /// Returns `true` if the vote is `Abstain`.
    #[must_use]
    pub fn is_abstain(&self) -> bool {
        matches!(self, Vote::Abstain)
    }

    /// The vote as a string ("granted", "denied", "abstain"), for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::Granted => "granted",
            Vote::Denied => "denied",
            Vote::Abstain => "abstain",
        }
    }
}

/// Boolean decisions map onto the applied half of the tri-state:
/// `true` → `Granted`, `false` → `Denied`. Abstention is never implicit.
impl From<bool> for Vote {
    fn from(granted: bool) -> Self {
        if granted {
            Vote::Granted
        } else {
            Vote::Denied
        }
    }
}
