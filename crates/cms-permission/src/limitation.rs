// limitation.rs — The Limitation value object.
//
// A limitation is a named permission rule: an identifier naming which rule
// it is, plus an ordered list of scalar values restricting the rule's scope.
// Limitations are built by policy administration, stored with roles, and
// handed to this engine read-only. They are never mutated in place;
// `LimitationType::build_value` is the only constructor and round-trips its
// input exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The well-known limitation identifiers, as stored with policies.
///
/// Registry keys and the per-variant discriminators both use these
/// constants so they cannot drift apart.
pub mod identifiers {
    pub const CONTENT_TYPE: &str = "ContentType";
    pub const PARENT_CONTENT_TYPE: &str = "ParentContentType";
    pub const LOCATION: &str = "Location";
    pub const PARENT_DEPTH: &str = "ParentDepth";
    pub const SUBTREE: &str = "Subtree";
    pub const SECTION: &str = "Section";
    pub const OBJECT_STATE: &str = "ObjectState";
    pub const NEW_OBJECT_STATE: &str = "NewObjectState";
}

/// One scalar limitation value.
///
/// The semantic type is variant-specific: content-type ids, location ids,
/// integer depths, path-prefix strings, section ids, object-state ids.
/// `Bool` exists so that structurally wrong input can be represented and
/// rejected by `accept_value`, never silently coerced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LimitationValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl LimitationValue {
    /// The value as an entity id, when it is a non-negative integer.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            LimitationValue::Int(n) if *n >= 0 => Some(*n as u64),
            _ => None,
        }
    }

    /// The value as a string, when it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LimitationValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the primitive type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            LimitationValue::Int(_) => "integer",
            LimitationValue::Str(_) => "string",
            LimitationValue::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for LimitationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitationValue::Int(n) => write!(f, "{}", n),
            LimitationValue::Str(s) => write!(f, "{}", s),
            LimitationValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for LimitationValue {
    fn from(n: i64) -> Self {
        LimitationValue::Int(n)
    }
}

impl From<&str> for LimitationValue {
    fn from(s: &str) -> Self {
        LimitationValue::Str(s.to_string())
    }
}

/// A named permission rule: identifier + ordered scalar values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Limitation {
    /// Which rule this is (see [`identifiers`]). Immutable discriminator.
    pub identifier: String,
    /// The rule's scope values, in administration order.
    pub limitation_values: Vec<LimitationValue>,
}

impl Limitation {
    pub fn new(identifier: &str, limitation_values: Vec<LimitationValue>) -> Self {
        Self {
            identifier: identifier.to_string(),
            limitation_values,
        }
    }
}

/// One limitation value that failed to resolve in persistence.
///
/// Produced only by `validate()`, always returned as data for admin-facing
/// display — never thrown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    /// The offending value, verbatim.
    pub value: LimitationValue,
    /// Human-readable description of why it did not resolve.
    pub message: String,
}
