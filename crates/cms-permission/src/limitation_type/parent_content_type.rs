// parent_content_type.rs — The ParentContentType limitation.
//
// Restricts an operation by the content type of the *parent* of the
// relevant location(s): "may only create/edit content under folders".
// Resolution is multi-hop and shape-dependent:
//
// - an explicit Location target is the destination parent itself — load its
//   content info, check the type;
// - a LocationCreateStruct target names the parent by id — load the parent
//   location, then its content info;
// - with no targets, the object's own locations are resolved publish-aware.
//   For published content those are its own locations, so one more hop to
//   the parent is needed; a draft resolves directly to its future parents.

use std::sync::Arc;

use cms_domain::{ContentInfo, UserRef};

use crate::criterion::Criterion;
use crate::error::PermissionError;
use crate::limitation::{identifiers, Limitation, ValidationError};
use crate::limitation_type::{accept_int_values, id_values};
use crate::locations::resolve_locations;
use crate::readers::{ContentReader, ContentTypeReader, LocationReader};
use crate::target::{GrantObject, GrantTarget};
use crate::vote::Vote;

const IDENTIFIER: &str = identifiers::PARENT_CONTENT_TYPE;

pub struct ParentContentTypeLimitation {
    content_types: Arc<dyn ContentTypeReader>,
    locations: Arc<dyn LocationReader>,
    content: Arc<dyn ContentReader>,
}

impl ParentContentTypeLimitation {
    pub fn new(
        content_types: Arc<dyn ContentTypeReader>,
        locations: Arc<dyn LocationReader>,
        content: Arc<dyn ContentReader>,
    ) -> Self {
        Self {
            content_types,
            locations,
            content,
        }
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

        if let Some(targets) = targets.filter(|t| !t.is_empty()) {
            for target in targets {
                let parent_info = match target {
                    // The target location is the destination parent itself.
                    GrantTarget::Location(location) => {
                        self.content.load_content_info(location.content_id)?
                    }
                    GrantTarget::LocationCreate(create) => {
                        let parent = self.locations.load_location(create.parent_location_id)?;
                        self.content.load_content_info(parent.content_id)?
                    }
                    other => {
                        return Err(PermissionError::UnsupportedTarget {
                            limitation: IDENTIFIER,
                            target: other.kind(),
                        })
                    }
                };
                if ids.contains(&parent_info.content_type_id) {
                    return Ok(Vote::Granted);
                }
            }
            return Ok(Vote::Denied);
        }

        match object.content_info() {
            Some(info) => Ok(Vote::from(self.any_parent_matches(info, &ids)?)),
            None if object.content_create().is_some() => Ok(Vote::Denied),
            None => Err(PermissionError::UnsupportedObject {
                limitation: IDENTIFIER,
                object: object.kind(),
            }),
        }
    }

    /// Walk the object's resolved locations to their parents' content types.
    /// Draft resolution already yields the parents, published resolution
    /// needs one more hop.
    fn any_parent_matches(&self, info: &ContentInfo, ids: &[u64]) -> Result<bool, PermissionError> {
        for location in resolve_locations(info, self.locations.as_ref())? {
            let parent_info = if info.published {
                let parent = self.locations.load_location(location.parent_location_id)?;
                self.content.load_content_info(parent.content_id)?
            } else {
                self.content.load_content_info(location.content_id)?
            };
            if ids.contains(&parent_info.content_type_id) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn get_criterion(
        &self,
        _limitation: &Limitation,
        _user: &UserRef,
    ) -> Result<Criterion, PermissionError> {
        // The parent's content type is not a stored attribute of the content
        // being filtered; there is no pushdown form.
        Err(PermissionError::CriterionUnavailable {
            limitation: IDENTIFIER,
            reason: "parent content type is not a stored content attribute",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limitation::LimitationValue;
    use crate::testing::InMemoryRepository;
    use cms_domain::{
        ContentCreateStruct, ContentStatus, ContentType, Location, LocationCreateStruct,
    };

    const FOLDER: u64 = 1;
    const ARTICLE: u64 = 4;

    fn limitation(type_ids: &[i64]) -> Limitation {
        Limitation::new(
            IDENTIFIER,
            type_ids.iter().map(|id| LimitationValue::Int(*id)).collect(),
        )
    }

    fn info(id: u64, content_type_id: u64, published: bool) -> ContentInfo {
        ContentInfo {
            id,
            content_type_id,
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

    fn location(id: u64, parent_location_id: u64, content_id: u64) -> Location {
        Location {
            id,
            path_string: format!("/1/{}/", id),
            depth: 1,
            parent_location_id,
            content_id,
        }
    }

    /// Folder content 10 at location 2; article content 23 at location 58
    /// underneath it.
    fn seeded() -> InMemoryRepository {
        InMemoryRepository::new()
            .with_content_type(ContentType {
                id: FOLDER,
                identifier: "folder".to_string(),
            })
            .with_content(info(10, FOLDER, true), vec![location(2, 1, 10)])
            .with_content(info(23, ARTICLE, true), vec![location(58, 2, 23)])
    }

    fn subject(repo: InMemoryRepository) -> ParentContentTypeLimitation {
        let repo = Arc::new(repo);
        ParentContentTypeLimitation::new(repo.clone(), repo.clone(), repo)
    }

    #[test]
    fn grants_when_parent_is_of_listed_type() {
        let vote = subject(seeded())
            .evaluate(
                &limitation(&[FOLDER as i64]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(23, ARTICLE, true)),
                None,
            )
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn denies_when_parent_type_differs() {
        let vote = subject(seeded())
            .evaluate(
                &limitation(&[ARTICLE as i64]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(23, ARTICLE, true)),
                None,
            )
            .unwrap();
        assert_eq!(vote, Vote::Denied);
    }

    #[test]
    fn location_target_is_the_parent_itself() {
        let object = GrantObject::ContentCreate(ContentCreateStruct {
            content_type_id: ARTICLE,
            section_id: None,
        });
        let targets = [GrantTarget::Location(location(2, 1, 10))];
        let vote = subject(seeded())
            .evaluate(
                &limitation(&[FOLDER as i64]),
                &UserRef::new(14),
                &object,
                Some(&targets),
            )
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn location_create_target_loads_parent_then_content() {
        let object = GrantObject::ContentCreate(ContentCreateStruct {
            content_type_id: ARTICLE,
            section_id: None,
        });
        let targets = [GrantTarget::LocationCreate(LocationCreateStruct {
            parent_location_id: 2,
        })];
        let vote = subject(seeded())
            .evaluate(
                &limitation(&[FOLDER as i64]),
                &UserRef::new(14),
                &object,
                Some(&targets),
            )
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn draft_parents_are_checked_directly() {
        let repo = seeded()
            .with_content(info(99, ARTICLE, false), vec![])
            .with_draft_parents(99, vec![location(2, 1, 10)]);
        let vote = subject(repo)
            .evaluate(
                &limitation(&[FOLDER as i64]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(99, ARTICLE, false)),
                None,
            )
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn create_without_targets_is_denied() {
        let object = GrantObject::ContentCreate(ContentCreateStruct {
            content_type_id: ARTICLE,
            section_id: None,
        });
        let vote = subject(seeded())
            .evaluate(&limitation(&[FOLDER as i64]), &UserRef::new(14), &object, None)
            .unwrap();
        assert_eq!(vote, Vote::Denied);
    }

    #[test]
    fn no_criterion_form() {
        let err = subject(seeded())
            .get_criterion(&limitation(&[FOLDER as i64]), &UserRef::new(14))
            .unwrap_err();
        assert!(matches!(err, PermissionError::CriterionUnavailable { .. }));
    }

    #[test]
    fn validate_resolves_content_types() {
        let subject = subject(seeded());
        assert!(subject.validate(&limitation(&[FOLDER as i64])).is_empty());
        let errors = subject.validate(&limitation(&[9000]));
        assert_eq!(errors.len(), 1);
    }
}
