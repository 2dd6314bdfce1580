// criterion.rs — The predicate AST handed to the search/storage layer.
//
// A criterion is the second representation of a limitation: a predicate over
// stored attributes that selects exactly the objects `evaluate` would grant.
// The search layer merges criteria from many limitations before pushing the
// combined filter into storage.
//
// Invariant: a single value always yields `Eq`, two or more yield `In`,
// preserving input order. The constructors enforce this; leaf variants are
// never built with an empty value list (the engine refuses to generate a
// criterion for an empty limitation instead).

use serde::{Deserialize, Serialize};

/// Comparison operator of a leaf criterion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Exactly one value; the attribute must equal it.
    Eq,
    /// Several values; the attribute must equal one of them.
    In,
}

impl Operator {
    /// The operator mandated by a value count: one ⇒ `Eq`, more ⇒ `In`.
    fn for_len(len: usize) -> Operator {
        debug_assert!(len > 0, "leaf criteria carry at least one value");
        if len == 1 {
            Operator::Eq
        } else {
            Operator::In
        }
    }
}

/// A predicate-AST node consumed by the search/storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "criterion", rename_all = "snake_case")]
pub enum Criterion {
    /// Matches content whose content-type id is in `values`.
    ContentTypeId { operator: Operator, values: Vec<u64> },
    /// Matches content with a location whose id is in `values`.
    LocationId { operator: Operator, values: Vec<u64> },
    /// Matches content whose section id is in `values`.
    SectionId { operator: Operator, values: Vec<u64> },
    /// Matches content whose current object-state id is in `values`.
    ObjectStateId { operator: Operator, values: Vec<u64> },
    /// Matches content with a location whose path starts with one of `values`.
    Subtree {
        operator: Operator,
        values: Vec<String>,
    },
    /// All child criteria must match.
    LogicalAnd { criteria: Vec<Criterion> },
}

impl Criterion {
    pub fn content_type_id(values: Vec<u64>) -> Criterion {
        Criterion::ContentTypeId {
            operator: Operator::for_len(values.len()),
            values,
        }
    }

    pub fn location_id(values: Vec<u64>) -> Criterion {
        Criterion::LocationId {
            operator: Operator::for_len(values.len()),
            values,
        }
    }

    pub fn section_id(values: Vec<u64>) -> Criterion {
        Criterion::SectionId {
            operator: Operator::for_len(values.len()),
            values,
        }
    }

    pub fn object_state_id(values: Vec<u64>) -> Criterion {
        Criterion::ObjectStateId {
            operator: Operator::for_len(values.len()),
            values,
        }
    }

    pub fn subtree(values: Vec<String>) -> Criterion {
        Criterion::Subtree {
            operator: Operator::for_len(values.len()),
            values,
        }
    }

    pub fn logical_and(criteria: Vec<Criterion>) -> Criterion {
        Criterion::LogicalAnd { criteria }
    }

    /// The leaf operator, or `None` for composite nodes.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Criterion::ContentTypeId { operator, .. }
            | Criterion::LocationId { operator, .. }
            | Criterion::SectionId { operator, .. }
            | Criterion::ObjectStateId { operator, .. }
            | Criterion::Subtree { operator, .. } => Some(*operator),
            Criterion::LogicalAnd { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_yields_eq() {
        let criterion = Criterion::content_type_id(vec![66]);
        assert_eq!(criterion.operator(), Some(Operator::Eq));
        match criterion {
            Criterion::ContentTypeId { values, .. } => assert_eq!(values, vec![66]),
            other => panic!("expected ContentTypeId, got {:?}", other),
        }
    }

    #[test]
    fn multiple_values_yield_in_preserving_order() {
        let criterion = Criterion::location_id(vec![58, 2, 43]);
        assert_eq!(criterion.operator(), Some(Operator::In));
        match criterion {
            Criterion::LocationId { values, .. } => assert_eq!(values, vec![58, 2, 43]),
            other => panic!("expected LocationId, got {:?}", other),
        }
    }

    #[test]
    fn logical_and_has_no_operator() {
        let criterion = Criterion::logical_and(vec![
            Criterion::section_id(vec![1]),
            Criterion::subtree(vec!["/1/2/".to_string()]),
        ]);
        assert_eq!(criterion.operator(), None);
    }

    #[test]
    fn serializes_tagged_snake_case() {
        let json = serde_json::to_string(&Criterion::section_id(vec![3])).unwrap();
        assert!(json.contains("\"criterion\":\"section_id\""));
        assert!(json.contains("\"operator\":\"eq\""));
    }
}
