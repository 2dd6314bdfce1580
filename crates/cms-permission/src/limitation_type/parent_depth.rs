// parent_depth.rs — The ParentDepth limitation.
//
// Restricts an operation by tree depth: the resolved location's depth must
// be one of the listed values. Resolution follows the Location limitation
// (explicit targets, then publish-state-aware lookup); for creation the
// destination parent is loaded to read its depth.
//
// Depth values are plain integers, not entity references, so validate()
// checks their shape without any persistence reads.

use std::sync::Arc;

use cms_domain::UserRef;

use crate::criterion::Criterion;
use crate::error::PermissionError;
use crate::limitation::{identifiers, Limitation, LimitationValue, ValidationError};
use crate::limitation_type::{accept_int_values, id_values};
use crate::locations::resolve_locations;
use crate::readers::LocationReader;
use crate::target::{GrantObject, GrantTarget};
use crate::vote::Vote;

const IDENTIFIER: &str = identifiers::PARENT_DEPTH;

pub struct ParentDepthLimitation {
    locations: Arc<dyn LocationReader>,
}

impl ParentDepthLimitation {
    pub fn new(locations: Arc<dyn LocationReader>) -> Self {
        Self { locations }
    }

    pub fn accept_value(&self, limitation: &Limitation) -> Result<(), PermissionError> {
        accept_int_values(limitation, IDENTIFIER)
    }

    pub fn validate(&self, limitation: &Limitation) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for value in &limitation.limitation_values {
            if !matches!(value, LimitationValue::Int(n) if *n >= 0) {
                errors.push(ValidationError {
                    value: value.clone(),
                    message: "depths must be non-negative integers".to_string(),
                });
            }
        }
        errors
    }

    pub fn evaluate(
        &self,
        limitation: &Limitation,
        _user: &UserRef,
        object: &GrantObject,
        targets: Option<&[GrantTarget]>,
    ) -> Result<Vote, PermissionError> {
        let depths = id_values(limitation, IDENTIFIER)?;
        let matches = |depth: u32| depths.contains(&u64::from(depth));

        if let Some(targets) = targets.filter(|t| !t.is_empty()) {
            for target in targets {
                let hit = match target {
                    GrantTarget::Location(location) => matches(location.depth),
                    GrantTarget::LocationCreate(create) => {
                        let parent = self.locations.load_location(create.parent_location_id)?;
                        matches(parent.depth)
                    }
                    other => {
                        return Err(PermissionError::UnsupportedTarget {
                            limitation: IDENTIFIER,
                            target: other.kind(),
                        })
                    }
                };
                if hit {
                    return Ok(Vote::Granted);
                }
            }
            return Ok(Vote::Denied);
        }

        match object.content_info() {
            Some(info) => {
                let resolved = resolve_locations(info, self.locations.as_ref())?;
                Ok(Vote::from(
                    resolved.iter().any(|location| matches(location.depth)),
                ))
            }
            None if object.content_create().is_some() => Ok(Vote::Denied),
            None => Err(PermissionError::UnsupportedObject {
                limitation: IDENTIFIER,
                object: object.kind(),
            }),
        }
    }

    pub fn get_criterion(
        &self,
        _limitation: &Limitation,
        _user: &UserRef,
    ) -> Result<Criterion, PermissionError> {
        // The depth of a *parent* is not a stored attribute of the content
        // being filtered; there is no pushdown form.
        Err(PermissionError::CriterionUnavailable {
            limitation: IDENTIFIER,
            reason: "parent depth is not a stored content attribute",
        })
    }
}
