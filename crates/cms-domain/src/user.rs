// user.rs — Acting user identity.

use serde::{Deserialize, Serialize};

/// The identity of the user an operation is evaluated for.
///
/// The engine itself decides on object attributes, not user attributes, but
/// the acting user travels with every evaluation so cache layers and audit
/// sinks outside this library can key on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserRef {
    pub id: u64,
}

impl UserRef {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}
