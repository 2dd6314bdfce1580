// mod.rs — The sealed set of limitation types.
//
// Exactly eight limitation behaviors exist. They are dispatched through one
// exhaustive `match` per capability, so adding a capability (or a ninth
// variant) forces every arm to be written — there is no open-ended dynamic
// dispatch to silently fall through.
//
// Strictness differs by variant: ContentType, ParentContentType, Location,
// ParentDepth and NewObjectState error on object/target shapes outside
// their domain; Subtree and Section abstain instead, so a multi-limitation
// policy evaluator can skip — not abort on — inapplicable rules.

use tracing::debug;

use cms_domain::UserRef;

use crate::criterion::Criterion;
use crate::error::PermissionError;
use crate::limitation::{Limitation, LimitationValue, ValidationError};
use crate::target::{GrantObject, GrantTarget};
use crate::vote::Vote;

pub mod content_type;
pub mod location;
pub mod new_object_state;
pub mod object_state;
pub mod parent_content_type;
pub mod parent_depth;
pub mod section;
pub mod subtree;

pub use content_type::ContentTypeLimitation;
pub use location::LocationLimitation;
pub use new_object_state::NewObjectStateLimitation;
pub use object_state::ObjectStateLimitation;
pub use parent_content_type::ParentContentTypeLimitation;
pub use parent_depth::ParentDepthLimitation;
pub use section::SectionLimitation;
pub use subtree::SubtreeLimitation;

/// The admin-UI value domain of a limitation's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSchema {
    /// Values are location ids.
    LocationId,
    /// Values are location path strings ("/1/2/").
    LocationPath,
}

/// The executable behavior bound to a limitation identifier.
///
/// One variant per identifier; see [`crate::identifiers`].
pub enum LimitationType {
    ContentType(ContentTypeLimitation),
    ParentContentType(ParentContentTypeLimitation),
    Location(LocationLimitation),
    ParentDepth(ParentDepthLimitation),
    Subtree(SubtreeLimitation),
    Section(SectionLimitation),
    ObjectState(ObjectStateLimitation),
    NewObjectState(NewObjectStateLimitation),
}

impl LimitationType {
    /// The identifier this behavior is bound to.
    pub fn identifier(&self) -> &'static str {
        use crate::limitation::identifiers as id;
        match self {
            LimitationType::ContentType(_) => id::CONTENT_TYPE,
            LimitationType::ParentContentType(_) => id::PARENT_CONTENT_TYPE,
            LimitationType::Location(_) => id::LOCATION,
            LimitationType::ParentDepth(_) => id::PARENT_DEPTH,
            LimitationType::Subtree(_) => id::SUBTREE,
            LimitationType::Section(_) => id::SECTION,
            LimitationType::ObjectState(_) => id::OBJECT_STATE,
            LimitationType::NewObjectState(_) => id::NEW_OBJECT_STATE,
        }
    }

    /// Pure structural validation: the limitation must be of this variant
    /// and every value must have the variant's primitive type. No I/O.
    pub fn accept_value(&self, limitation: &Limitation) -> Result<(), PermissionError> {
        match self {
            LimitationType::ContentType(t) => t.accept_value(limitation),
            LimitationType::ParentContentType(t) => t.accept_value(limitation),
            LimitationType::Location(t) => t.accept_value(limitation),
            LimitationType::ParentDepth(t) => t.accept_value(limitation),
            LimitationType::Subtree(t) => t.accept_value(limitation),
            LimitationType::Section(t) => t.accept_value(limitation),
            LimitationType::ObjectState(t) => t.accept_value(limitation),
            LimitationType::NewObjectState(t) => t.accept_value(limitation),
        }
    }

    /// Identity-preserving factory: the returned limitation carries this
    /// variant's identifier and `values` verbatim.
    pub fn build_value(&self, values: Vec<LimitationValue>) -> Limitation {
        Limitation::new(self.identifier(), values)
    }

    /// Check every value against persistence, collecting one
    /// [`ValidationError`] per value that fails to resolve. Never fails
    /// itself; an empty value list performs zero persistence calls.
    pub fn validate(&self, limitation: &Limitation) -> Vec<ValidationError> {
        match self {
            LimitationType::ContentType(t) => t.validate(limitation),
            LimitationType::ParentContentType(t) => t.validate(limitation),
            LimitationType::Location(t) => t.validate(limitation),
            LimitationType::ParentDepth(t) => t.validate(limitation),
            LimitationType::Subtree(t) => t.validate(limitation),
            LimitationType::Section(t) => t.validate(limitation),
            LimitationType::ObjectState(t) => t.validate(limitation),
            LimitationType::NewObjectState(t) => t.validate(limitation),
        }
    }

    /// Decide whether `user` may perform the operation on `object`, given
    /// the optional explicit operation `targets`.
    pub fn evaluate(
        &self,
        limitation: &Limitation,
        user: &UserRef,
        object: &GrantObject,
        targets: Option<&[GrantTarget]>,
    ) -> Result<Vote, PermissionError> {
        let vote = match self {
            LimitationType::ContentType(t) => t.evaluate(limitation, user, object, targets),
            LimitationType::ParentContentType(t) => t.evaluate(limitation, user, object, targets),
            LimitationType::Location(t) => t.evaluate(limitation, user, object, targets),
            LimitationType::ParentDepth(t) => t.evaluate(limitation, user, object, targets),
            LimitationType::Subtree(t) => t.evaluate(limitation, user, object, targets),
            LimitationType::Section(t) => t.evaluate(limitation, user, object, targets),
            LimitationType::ObjectState(t) => t.evaluate(limitation, user, object, targets),
            LimitationType::NewObjectState(t) => t.evaluate(limitation, user, object, targets),
        }?;
        debug!(
            limitation = self.identifier(),
            user = user.id,
            object = object.kind(),
            vote = vote.as_str(),
            "evaluated limitation"
        );
        Ok(vote)
    }

    /// Translate the limitation into a stored-attribute predicate for
    /// search pushdown. Fails when the limitation is empty or the variant's
    /// semantics have no stored-attribute form.
    pub fn get_criterion(
        &self,
        limitation: &Limitation,
        user: &UserRef,
    ) -> Result<Criterion, PermissionError> {
        let criterion = match self {
            LimitationType::ContentType(t) => t.get_criterion(limitation, user),
            LimitationType::ParentContentType(t) => t.get_criterion(limitation, user),
            LimitationType::Location(t) => t.get_criterion(limitation, user),
            LimitationType::ParentDepth(t) => t.get_criterion(limitation, user),
            LimitationType::Subtree(t) => t.get_criterion(limitation, user),
            LimitationType::Section(t) => t.get_criterion(limitation, user),
            LimitationType::ObjectState(t) => t.get_criterion(limitation, user),
            LimitationType::NewObjectState(t) => t.get_criterion(limitation, user),
        }?;
        debug!(
            limitation = self.identifier(),
            user = user.id,
            "generated criterion"
        );
        Ok(criterion)
    }

    /// The constant describing this variant's admin-UI value domain, when
    /// one is defined.
    pub fn value_schema(&self) -> Result<ValueSchema, PermissionError> {
        match self {
            LimitationType::Location(_) => Ok(ValueSchema::LocationId),
            LimitationType::Subtree(_) => Ok(ValueSchema::LocationPath),
            other => Err(PermissionError::SchemaUnavailable {
                limitation: other.identifier(),
            }),
        }
    }
}

// — shared helpers used by the variant modules —

/// The limitation handed in must carry `expected` as its identifier.
pub(crate) fn expect_identifier(
    limitation: &Limitation,
    expected: &'static str,
) -> Result<(), PermissionError> {
    if limitation.identifier == expected {
        Ok(())
    } else {
        Err(PermissionError::UnexpectedLimitation {
            expected,
            actual: limitation.identifier.clone(),
        })
    }
}

/// Structural check: every value must be an integer.
pub(crate) fn accept_int_values(
    limitation: &Limitation,
    name: &'static str,
) -> Result<(), PermissionError> {
    expect_identifier(limitation, name)?;
    for (index, value) in limitation.limitation_values.iter().enumerate() {
        if !matches!(value, LimitationValue::Int(_)) {
            return Err(PermissionError::InvalidLimitationValue {
                limitation: name,
                index,
                expected: "an integer id",
                value: value.clone(),
            });
        }
    }
    Ok(())
}

/// Structural check: every value must be a string.
pub(crate) fn accept_string_values(
    limitation: &Limitation,
    name: &'static str,
) -> Result<(), PermissionError> {
    expect_identifier(limitation, name)?;
    for (index, value) in limitation.limitation_values.iter().enumerate() {
        if !matches!(value, LimitationValue::Str(_)) {
            return Err(PermissionError::InvalidLimitationValue {
                limitation: name,
                index,
                expected: "a path string",
                value: value.clone(),
            });
        }
    }
    Ok(())
}

/// All values as entity ids, failing fast on any other shape.
pub(crate) fn id_values(
    limitation: &Limitation,
    name: &'static str,
) -> Result<Vec<u64>, PermissionError> {
    expect_identifier(limitation, name)?;
    limitation
        .limitation_values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_id()
                .ok_or_else(|| PermissionError::InvalidLimitationValue {
                    limitation: name,
                    index,
                    expected: "an integer id",
                    value: value.clone(),
                })
        })
        .collect()
}

/// All values as path strings, failing fast on any other shape.
pub(crate) fn path_values(
    limitation: &Limitation,
    name: &'static str,
) -> Result<Vec<String>, PermissionError> {
    expect_identifier(limitation, name)?;
    limitation
        .limitation_values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| PermissionError::InvalidLimitationValue {
                    limitation: name,
                    index,
                    expected: "a path string",
                    value: value.clone(),
                })
        })
        .collect()
}
