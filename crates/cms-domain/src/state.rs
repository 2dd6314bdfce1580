// state.rs — Object states and state groups.
//
// An object-state group is a named axis of mutually exclusive states
// (e.g. a "review" group with states "pending" and "approved"). Every
// content item holds exactly one state per group at any time.

use serde::{Deserialize, Serialize};

/// A named axis of mutually exclusive object states.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectStateGroup {
    pub id: u64,
    /// Human-readable identifier (e.g. "review").
    pub identifier: String,
}

/// One state within an object-state group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectState {
    pub id: u64,
    /// The group this state belongs to.
    pub group_id: u64,
    /// Human-readable identifier (e.g. "approved").
    pub identifier: String,
}
