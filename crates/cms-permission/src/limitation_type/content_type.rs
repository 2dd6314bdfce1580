// content_type.rs — The ContentType limitation.
//
// Restricts an operation to content of the listed content types. The
// resolved type comes from the object's stored metadata, or for content
// about to be created, from the create intent — unless the caller supplies
// an explicit "any content type of {…}" target set, in which case set
// intersection decides.

use std::sync::Arc;

use cms_domain::UserRef;

use crate::criterion::Criterion;
use crate::error::PermissionError;
use crate::limitation::{identifiers, Limitation, ValidationError};
use crate::limitation_type::{accept_int_values, id_values};
use crate::readers::ContentTypeReader;
use crate::target::{GrantObject, GrantTarget};
use crate::vote::Vote;

const IDENTIFIER: &str = identifiers::CONTENT_TYPE;

pub struct ContentTypeLimitation {
    content_types: Arc<dyn ContentTypeReader>,
}

impl ContentTypeLimitation {
    pub fn new(content_types: Arc<dyn ContentTypeReader>) -> Self {
        Self { content_types }
    }

    pub fn accept_value(&self, limitation: &Limitation) -> Result<(), PermissionError> {
        accept_int_values(limitation, IDENTIFIER)
    }

    pub fn validate(&self, limitation: &Limitation) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for value in &limitation.limitation_values {
            let Some(id) = value.as_id() else {
                errors.push(ValidationError {
                    value: value.clone(),
                    message: "content type ids must be integers".to_string(),
                });
                continue;
            };
            if let Err(err) = self.content_types.load_content_type(id) {
                errors.push(ValidationError {
                    value: value.clone(),
                    message: err.to_string(),
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
        let ids = id_values(limitation, IDENTIFIER)?;

        if let Some(create) = object.content_create() {
            // Creation: an explicit type-set target overrides the single
            // declared type of the create struct.
            if let Some(targets) = targets.filter(|t| !t.is_empty()) {
                for target in targets {
                    match target {
                        GrantTarget::ContentTypeSet(set) => {
                            if set.iter().any(|id| ids.contains(id)) {
                                return Ok(Vote::Granted);
                            }
                        }
                        other => {
                            return Err(PermissionError::UnsupportedTarget {
                                limitation: IDENTIFIER,
                                target: other.kind(),
                            })
                        }
                    }
                }
                return Ok(Vote::Denied);
            }
            return Ok(Vote::from(ids.contains(&create.content_type_id)));
        }

        match object.content_info() {
            Some(info) => Ok(Vote::from(ids.contains(&info.content_type_id))),
            None => Err(PermissionError::UnsupportedObject {
                limitation: IDENTIFIER,
                object: object.kind(),
            }),
        }
    }

    pub fn get_criterion(
        &self,
        limitation: &Limitation,
        _user: &UserRef,
    ) -> Result<Criterion, PermissionError> {
        let ids = id_values(limitation, IDENTIFIER)?;
        if ids.is_empty() {
            return Err(PermissionError::CriterionUnavailable {
                limitation: IDENTIFIER,
                reason: "limitation has no values",
            });
        }
        Ok(Criterion::content_type_id(ids))
    }
}
