// new_object_state.rs — The NewObjectState limitation.
//
// Decides a state *transition* before it is committed: the states being
// assigned arrive as explicit targets, the content's current state is
// irrelevant. Limitation values are grouped by their state group; each
// target whose group the limitation constrains must be among that group's
// values. Targets on unconstrained axes are ignored — the rule says
// nothing about them.
//
// Because the rule is about a transition, not a stored attribute, there is
// no criterion form.

use std::collections::HashMap;
use std::sync::Arc;

use cms_domain::UserRef;

use crate::criterion::Criterion;
use crate::error::PermissionError;
use crate::limitation::{identifiers, Limitation, ValidationError};
use crate::limitation_type::{accept_int_values, id_values};
use crate::readers::ObjectStateReader;
use crate::target::{GrantObject, GrantTarget};
use crate::vote::Vote;

const IDENTIFIER: &str = identifiers::NEW_OBJECT_STATE;

pub struct NewObjectStateLimitation {
    object_states: Arc<dyn ObjectStateReader>,
}

impl NewObjectStateLimitation {
    pub fn new(object_states: Arc<dyn ObjectStateReader>) -> Self {
        Self { object_states }
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
                    message: "object state ids must be integers".to_string(),
                });
                continue;
            };
            if let Err(err) = self.object_states.load_object_state(id) {
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

        if object.content_info().is_none() {
            return Err(PermissionError::UnsupportedObject {
                limitation: IDENTIFIER,
                object: object.kind(),
            });
        }

        let targets = targets
            .filter(|t| !t.is_empty())
            .ok_or(PermissionError::MissingTargets {
                limitation: IDENTIFIER,
            })?;

        // Group the limitation values by their state group.
        let mut values_by_group: HashMap<u64, Vec<u64>> = HashMap::new();
        for id in &ids {
            let state = self.object_states.load_object_state(*id)?;
            values_by_group.entry(state.group_id).or_default().push(*id);
        }

        for target in targets {
            let state = match target {
                GrantTarget::ObjectState(state) => state,
                other => {
                    return Err(PermissionError::UnsupportedTarget {
                        limitation: IDENTIFIER,
                        target: other.kind(),
                    })
                }
            };
            if let Some(allowed) = values_by_group.get(&state.group_id) {
                if !allowed.contains(&state.id) {
                    return Ok(Vote::Denied);
                }
            }
            // A target on an axis the limitation does not mention is not
            // this rule's concern.
        }
        Ok(Vote::Granted)
    }

    pub fn get_criterion(
        &self,
        _limitation: &Limitation,
        _user: &UserRef,
    ) -> Result<Criterion, PermissionError> {
        Err(PermissionError::CriterionUnavailable {
            limitation: IDENTIFIER,
            reason: "a state transition is not a stored content attribute",
        })
    }
}
