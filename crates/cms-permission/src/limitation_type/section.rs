// section.rs — The Section limitation.
//
// Restricts an operation to content in the listed sections. One of the
// tolerant variants: an object shape it does not understand yields an
// Abstain vote rather than an error, so policy composition can skip it.

use std::sync::Arc;

use cms_domain::UserRef;

use crate::criterion::Criterion;
use crate::error::PermissionError;
use crate::limitation::{identifiers, Limitation, ValidationError};
use crate::limitation_type::{accept_int_values, id_values};
use crate::readers::SectionReader;
use crate::target::{GrantObject, GrantTarget};
use crate::vote::Vote;

const IDENTIFIER: &str = identifiers::SECTION;

pub struct SectionLimitation {
    sections: Arc<dyn SectionReader>,
}

impl SectionLimitation {
    pub fn new(sections: Arc<dyn SectionReader>) -> Self {
        Self { sections }
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
                    message: "section ids must be integers".to_string(),
                });
                continue;
            };
            if let Err(err) = self.sections.load_section(id) {
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
        _targets: Option<&[GrantTarget]>,
    ) -> Result<Vote, PermissionError> {
        let ids = id_values(limitation, IDENTIFIER)?;

        if let Some(info) = object.content_info() {
            return Ok(Vote::from(ids.contains(&info.section_id)));
        }
        if let Some(create) = object.content_create() {
            // A create intent with no section decided yet cannot be granted
            // by a section rule.
            return Ok(match create.section_id {
                Some(section_id) => Vote::from(ids.contains(&section_id)),
                None => Vote::Denied,
            });
        }
        Ok(Vote::Abstain)
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
        Ok(Criterion::section_id(ids))
    }
}
