// error.rs — Error types of the permission engine.
//
// Three channels, per the propagation policy:
//
// - `PermissionError` is thrown: structurally invalid input aborts the
//   authorization check, unsupported operations abort criterion/schema
//   generation, and dangling references on the evaluate path propagate as
//   `Reader` errors (a data-integrity problem, not a permission outcome).
// - `ValidationError` (in `limitation.rs`) is returned as data by
//   `validate()` only.
// - `Vote::Abstain` is not an error at all: "not my kind of object" from the
//   tolerant variants.

use crate::limitation::LimitationValue;
use crate::readers::ReaderError;
use thiserror::Error;

/// Errors raised by limitation evaluation and criterion generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    /// A limitation of the wrong variant was handed to this type.
    #[error("expected '{expected}' limitation, got '{actual}'")]
    UnexpectedLimitation {
        expected: &'static str,
        actual: String,
    },

    /// A limitation value has the wrong primitive type (e.g. a boolean
    /// where an id or path is expected).
    #[error("'{limitation}' limitation value #{index} must be {expected}, got {value} ({kind})", kind = .value.type_name())]
    InvalidLimitationValue {
        limitation: &'static str,
        index: usize,
        expected: &'static str,
        value: LimitationValue,
    },

    /// The object is of a kind this strict variant cannot interpret.
    #[error("'{limitation}' limitation cannot evaluate {object} objects")]
    UnsupportedObject {
        limitation: &'static str,
        object: &'static str,
    },

    /// An explicit target is of a kind this strict variant cannot interpret.
    #[error("'{limitation}' limitation cannot evaluate {target} targets")]
    UnsupportedTarget {
        limitation: &'static str,
        target: &'static str,
    },

    /// The variant requires explicit targets and none were given.
    #[error("'{limitation}' limitation requires explicit targets")]
    MissingTargets { limitation: &'static str },

    /// The variant/value shape has no stored-attribute predicate form.
    #[error("'{limitation}' limitation has no criterion representation: {reason}")]
    CriterionUnavailable {
        limitation: &'static str,
        reason: &'static str,
    },

    /// The variant defines no admin-UI value schema.
    #[error("'{limitation}' limitation defines no value schema")]
    SchemaUnavailable { limitation: &'static str },

    /// A persistence read failed on the evaluate/criterion path.
    #[error(transparent)]
    Reader(#[from] ReaderError),
}
