// location.rs — The Location limitation.
//
// Restricts an operation to the listed locations. Resolution order: explicit
// operation targets win (the destination of a move/copy/create), otherwise
// the content's current locations are looked up publish-state-aware. For a
// location about to be created, the destination parent stands in.

use std::sync::Arc;

use cms_domain::UserRef;

use crate::criterion::Criterion;
use crate::error::PermissionError;
use crate::limitation::{identifiers, Limitation, ValidationError};
use crate::limitation_type::{accept_int_values, id_values};
use crate::locations::resolve_locations;
use crate::readers::LocationReader;
use crate::target::{GrantObject, GrantTarget};
use crate::vote::Vote;

const IDENTIFIER: &str = identifiers::LOCATION;

pub struct LocationLimitation {
    locations: Arc<dyn LocationReader>,
}

impl LocationLimitation {
    pub fn new(locations: Arc<dyn LocationReader>) -> Self {
        Self { locations }
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
                    message: "location ids must be integers".to_string(),
                });
                continue;
            };
            if let Err(err) = self.locations.load_location(id) {
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

        if let Some(targets) = targets.filter(|t| !t.is_empty()) {
            for target in targets {
                let hit = match target {
                    GrantTarget::Location(location) => ids.contains(&location.id),
                    GrantTarget::LocationCreate(create) => {
                        ids.contains(&create.parent_location_id)
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
                    resolved.iter().any(|location| ids.contains(&location.id)),
                ))
            }
            // Creation with no destination yet: nothing to grant against.
            None if object.content_create().is_some() => Ok(Vote::Denied),
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
        Ok(Criterion::location_id(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::Operator;
    use crate::limitation::LimitationValue;
    use crate::testing::InMemoryRepository;
    use cms_domain::{
        ContentCreateStruct, ContentInfo, ContentStatus, Location, LocationCreateStruct,
    };

    fn limitation(location_ids: &[i64]) -> Limitation {
        Limitation::new(
            IDENTIFIER,
            location_ids.iter().map(|id| LimitationValue::Int(*id)).collect(),
        )
    }

    fn info(id: u64, published: bool) -> ContentInfo {
        ContentInfo {
            id,
            content_type_id: 4,
            section_id: 1,
            main_location_id: Some(2),
            published,
            status: if published {
                ContentStatus::Published
            } else {
                ContentStatus::Draft
            },
        }
    }

    fn location(id: u64, content_id: u64) -> Location {
        Location {
            id,
            path_string: format!("/1/{}/", id),
            depth: 1,
            parent_location_id: 1,
            content_id,
        }
    }

    fn subject_with(locations: Vec<Location>) -> LocationLimitation {
        let repo = InMemoryRepository::new().with_content(info(23, true), locations);
        LocationLimitation::new(Arc::new(repo))
    }

    #[test]
    fn grants_on_persisted_location() {
        let subject = subject_with(vec![location(2, 23)]);
        let vote = subject
            .evaluate(
                &limitation(&[2]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(23, true)),
                None,
            )
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn denies_when_no_persisted_location_matches() {
        let subject = subject_with(vec![location(55, 23)]);
        let vote = subject
            .evaluate(
                &limitation(&[2]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(23, true)),
                None,
            )
            .unwrap();
        assert_eq!(vote, Vote::Denied);
    }

    #[test]
    fn draft_resolves_parent_locations() {
        let repo = InMemoryRepository::new()
            .with_content(info(23, false), vec![])
            .with_draft_parents(23, vec![location(2, 99)]);
        let subject = LocationLimitation::new(Arc::new(repo));
        let vote = subject
            .evaluate(
                &limitation(&[2]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(23, false)),
                None,
            )
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn explicit_targets_take_precedence() {
        let subject = subject_with(vec![location(55, 23)]);
        let targets = [GrantTarget::Location(location(2, 23))];
        let vote = subject
            .evaluate(
                &limitation(&[2]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(23, true)),
                Some(&targets),
            )
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn location_create_target_checks_parent() {
        let subject = subject_with(vec![]);
        let targets = [GrantTarget::LocationCreate(LocationCreateStruct {
            parent_location_id: 2,
        })];
        let object = GrantObject::ContentCreate(ContentCreateStruct {
            content_type_id: 4,
            section_id: None,
        });
        let vote = subject
            .evaluate(&limitation(&[2]), &UserRef::new(14), &object, Some(&targets))
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn create_without_targets_is_denied() {
        let subject = subject_with(vec![]);
        let object = GrantObject::ContentCreate(ContentCreateStruct {
            content_type_id: 4,
            section_id: None,
        });
        let vote = subject
            .evaluate(&limitation(&[2]), &UserRef::new(14), &object, None)
            .unwrap();
        assert_eq!(vote, Vote::Denied);
    }

    #[test]
    fn object_state_target_is_unsupported() {
        let subject = subject_with(vec![]);
        let targets = [GrantTarget::ObjectState(cms_domain::ObjectState {
            id: 1,
            group_id: 1,
            identifier: "pending".to_string(),
        })];
        let err = subject
            .evaluate(
                &limitation(&[2]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(23, true)),
                Some(&targets),
            )
            .unwrap_err();
        assert!(matches!(err, PermissionError::UnsupportedTarget { .. }));
    }

    #[test]
    fn criterion_multiple_values_is_in() {
        let subject = subject_with(vec![]);
        let criterion = subject
            .get_criterion(&limitation(&[58, 2]), &UserRef::new(14))
            .unwrap();
        assert_eq!(criterion, Criterion::LocationId {
            operator: Operator::In,
            values: vec![58, 2],
        });
    }

    #[test]
    fn validate_flags_dangling_locations() {
        let subject = subject_with(vec![location(2, 23)]);
        assert!(subject.validate(&limitation(&[2])).is_empty());
        let errors = subject.validate(&limitation(&[2, 777]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].value, LimitationValue::Int(777));
    }
}
