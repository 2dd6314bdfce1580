// object_state.rs — The ObjectState limitation.
//
// Restricts an operation by the state(s) the content *currently* holds.
// States live in groups (mutually exclusive axes); a limitation may name
// states from several groups. The rule grants if, for at least one group
// the limitation constrains, the content's current state in that group is
// among the limitation values.
//
// The criterion form makes the grouping explicit: one Eq/In per group,
// combined with LogicalAnd — content must match some named state on every
// constrained axis to pass the pushdown filter.

use std::sync::Arc;

use cms_domain::UserRef;

use crate::criterion::Criterion;
use crate::error::PermissionError;
use crate::limitation::{identifiers, Limitation, ValidationError};
use crate::limitation_type::{accept_int_values, id_values};
use crate::readers::{ObjectStateReader, ReaderError};
use crate::target::{GrantObject, GrantTarget};
use crate::vote::Vote;

const IDENTIFIER: &str = identifiers::OBJECT_STATE;

pub struct ObjectStateLimitation {
    object_states: Arc<dyn ObjectStateReader>,
}

impl ObjectStateLimitation {
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
        _targets: Option<&[GrantTarget]>,
    ) -> Result<Vote, PermissionError> {
        let ids = id_values(limitation, IDENTIFIER)?;

        let Some(info) = object.content_info() else {
            return Err(PermissionError::UnsupportedObject {
                limitation: IDENTIFIER,
                object: object.kind(),
            });
        };

        // Content with no location at all (system/root content) is outside
        // the state workflow: auto-grant.
        if info.main_location_id.is_none() {
            return Ok(Vote::Granted);
        }

        for group in self.object_states.load_all_groups()? {
            let states = self.object_states.load_object_states(group.id)?;
            if !states.iter().any(|state| ids.contains(&state.id)) {
                // The limitation does not constrain this axis.
                continue;
            }
            let current = self.object_states.content_state(info.id, group.id)?;
            if ids.contains(&current.id) {
                return Ok(Vote::Granted);
            }
        }
        Ok(Vote::Denied)
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

        // Partition the values by state group, preserving input order
        // within each group and group enumeration order across groups.
        let groups = self.object_states.load_all_groups()?;
        let mut per_group: Vec<(u64, Vec<u64>)> = Vec::new();
        let mut assigned = vec![false; ids.len()];
        for group in &groups {
            let states = self.object_states.load_object_states(group.id)?;
            let mut values = Vec::new();
            for (index, id) in ids.iter().enumerate() {
                if states.iter().any(|state| state.id == *id) {
                    values.push(*id);
                    assigned[index] = true;
                }
            }
            if !values.is_empty() {
                per_group.push((group.id, values));
            }
        }

        // A value belonging to no group is a dangling reference.
        if let Some(index) = assigned.iter().position(|hit| !hit) {
            return Err(ReaderError::not_found("object state", ids[index]).into());
        }

        let mut criteria: Vec<Criterion> = per_group
            .into_iter()
            .map(|(_, values)| Criterion::object_state_id(values))
            .collect();
        if criteria.len() == 1 {
            Ok(criteria.remove(0))
        } else {
            Ok(Criterion::logical_and(criteria))
        }
    }
}
