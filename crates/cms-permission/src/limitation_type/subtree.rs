// subtree.rs — The Subtree limitation.
//
// Restricts an operation to content whose location lives under one of the
// listed path prefixes. Path strings materialize ancestry ("/1/2/58/"), so
// containment is a literal prefix comparison. One of the tolerant variants:
// shapes outside its domain yield an Abstain vote.

use std::sync::Arc;

use cms_domain::UserRef;

use crate::criterion::Criterion;
use crate::error::PermissionError;
use crate::limitation::{identifiers, Limitation, ValidationError};
use crate::limitation_type::{accept_string_values, path_values};
use crate::locations::resolve_locations;
use crate::readers::LocationReader;
use crate::target::{GrantObject, GrantTarget};
use crate::vote::Vote;

const IDENTIFIER: &str = identifiers::SUBTREE;

pub struct SubtreeLimitation {
    locations: Arc<dyn LocationReader>,
}

impl SubtreeLimitation {
    pub fn new(locations: Arc<dyn LocationReader>) -> Self {
        Self { locations }
    }

    pub fn accept_value(&self, limitation: &Limitation) -> Result<(), PermissionError> {
        accept_string_values(limitation, IDENTIFIER)
    }

    /// A path value references the deepest location it names; that location
    /// must exist and carry exactly this path.
    pub fn validate(&self, limitation: &Limitation) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for value in &limitation.limitation_values {
            let Some(path) = value.as_str() else {
                errors.push(ValidationError {
                    value: value.clone(),
                    message: "subtree values must be path strings".to_string(),
                });
                continue;
            };
            let Some(id) = deepest_location_id(path) else {
                errors.push(ValidationError {
                    value: value.clone(),
                    message: format!("'{}' is not a valid location path", path),
                });
                continue;
            };
            match self.locations.load_location(id) {
                Ok(location) if location.path_string == path => {}
                Ok(location) => errors.push(ValidationError {
                    value: value.clone(),
                    message: format!(
                        "path mismatch: location {} is at '{}'",
                        id, location.path_string
                    ),
                }),
                Err(err) => errors.push(ValidationError {
                    value: value.clone(),
                    message: err.to_string(),
                }),
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
        let prefixes = path_values(limitation, IDENTIFIER)?;
        let matches = |path: &str| prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()));

        if let Some(targets) = targets.filter(|t| !t.is_empty()) {
            let mut applicable = false;
            for target in targets {
                let hit = match target {
                    GrantTarget::Location(location) => {
                        applicable = true;
                        matches(&location.path_string)
                    }
                    GrantTarget::LocationCreate(create) => {
                        applicable = true;
                        let parent = self.locations.load_location(create.parent_location_id)?;
                        matches(&parent.path_string)
                    }
                    // Not a positional target; leave the vote to others.
                    _ => false,
                };
                if hit {
                    return Ok(Vote::Granted);
                }
            }
            return Ok(if applicable { Vote::Denied } else { Vote::Abstain });
        }

        match object.content_info() {
            Some(info) => {
                let resolved = resolve_locations(info, self.locations.as_ref())?;
                Ok(Vote::from(
                    resolved.iter().any(|location| matches(&location.path_string)),
                ))
            }
            // Creation with no destination yet: nothing to place, nothing to grant.
            None if object.content_create().is_some() => Ok(Vote::Denied),
            None => Ok(Vote::Abstain),
        }
    }

    pub fn get_criterion(
        &self,
        limitation: &Limitation,
        _user: &UserRef,
    ) -> Result<Criterion, PermissionError> {
        let prefixes = path_values(limitation, IDENTIFIER)?;
        if prefixes.is_empty() {
            return Err(PermissionError::CriterionUnavailable {
                limitation: IDENTIFIER,
                reason: "limitation has no values",
            });
        }
        Ok(Criterion::subtree(prefixes))
    }
}

/// The id of the deepest location a path names: the last segment of
/// "/1/2/58/" is 58.
fn deepest_location_id(path: &str) -> Option<u64> {
    path.trim_matches('/').rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::Operator;
    use crate::limitation::LimitationValue;
    use crate::testing::InMemoryRepository;
    use cms_domain::{ContentInfo, ContentStatus, Location, ObjectState};

    fn limitation(prefixes: &[&str]) -> Limitation {
        Limitation::new(
            IDENTIFIER,
            prefixes.iter().map(|p| LimitationValue::from(*p)).collect(),
        )
    }

    fn info(published: bool) -> ContentInfo {
        ContentInfo {
            id: 23,
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

    fn location(id: u64, path: &str) -> Location {
        Location {
            id,
            path_string: path.to_string(),
            depth: path.trim_matches('/').split('/').count() as u32 - 1,
            parent_location_id: 1,
            content_id: 23,
        }
    }

    fn subject() -> SubtreeLimitation {
        SubtreeLimitation::new(Arc::new(InMemoryRepository::new()))
    }

    #[test]
    fn target_inside_subtree_is_granted() {
        let targets = [GrantTarget::Location(location(2, "/1/2/"))];
        let vote = subject()
            .evaluate(
                &limitation(&["/1/2/"]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(true)),
                Some(&targets),
            )
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn target_outside_subtree_is_denied() {
        let targets = [GrantTarget::Location(location(55, "/1/55/"))];
        let vote = subject()
            .evaluate(
                &limitation(&["/1/2/"]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(true)),
                Some(&targets),
            )
            .unwrap();
        assert_eq!(vote, Vote::Denied);
    }

    #[test]
    fn non_positional_targets_abstain() {
        let targets = [GrantTarget::ObjectState(ObjectState {
            id: 1,
            group_id: 1,
            identifier: "pending".to_string(),
        })];
        let vote = subject()
            .evaluate(
                &limitation(&["/1/2/"]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(true)),
                Some(&targets),
            )
            .unwrap();
        assert_eq!(vote, Vote::Abstain);
    }

    #[test]
    fn unhandled_object_abstains() {
        let vote = subject()
            .evaluate(
                &limitation(&["/1/2/"]),
                &UserRef::new(14),
                &GrantObject::Location(location(2, "/1/2/")),
                None,
            )
            .unwrap();
        assert_eq!(vote, Vote::Abstain);
    }

    #[test]
    fn persisted_locations_decide_without_targets() {
        let repo = InMemoryRepository::new()
            .with_content(info(true), vec![location(58, "/1/2/58/")]);
        let subject = SubtreeLimitation::new(Arc::new(repo));
        let vote = subject
            .evaluate(
                &limitation(&["/1/2/"]),
                &UserRef::new(14),
                &GrantObject::ContentInfo(info(true)),
                None,
            )
            .unwrap();
        assert_eq!(vote, Vote::Granted);
    }

    #[test]
    fn criterion_carries_paths_in_order() {
        let criterion = subject()
            .get_criterion(&limitation(&["/1/2/", "/1/43/"]), &UserRef::new(14))
            .unwrap();
        assert_eq!(criterion, Criterion::Subtree {
            operator: Operator::In,
            values: vec!["/1/2/".to_string(), "/1/43/".to_string()],
        });
    }

    #[test]
    fn validate_checks_the_deepest_location() {
        let repo = InMemoryRepository::new().with_location(location(58, "/1/2/58/"));
        let subject = SubtreeLimitation::new(Arc::new(repo));

        assert!(subject.validate(&limitation(&["/1/2/58/"])).is_empty());

        let errors = subject.validate(&limitation(&["/1/999/"]));
        assert_eq!(errors.len(), 1);

        // Location 58 exists but not at this path.
        let errors = subject.validate(&limitation(&["/9/58/"]));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("path mismatch"));
    }

    #[test]
    fn deepest_location_id_parses_last_segment() {
        assert_eq!(deepest_location_id("/1/2/58/"), Some(58));
        assert_eq!(deepest_location_id("/1/"), Some(1));
        assert_eq!(deepest_location_id("//"), None);
        assert_eq!(deepest_location_id("not-a-path"), None);
    }
}
