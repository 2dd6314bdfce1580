// location.rs — Content tree locations.
//
// Every published content item sits at one or more locations in a single
// tree. A location's `path_string` encodes its ancestry as a "/"-delimited
// id path (e.g. "/1/2/58/"), which makes subtree containment a literal
// prefix comparison.

use serde::{Deserialize, Serialize};

/// A node in the content tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: u64,
    /// Materialized ancestry path, "/"-delimited location ids with leading
    /// and trailing slash (e.g. "/1/2/58/").
    pub path_string: String,
    /// Depth in the tree; the root sits at depth 0.
    pub depth: u32,
    /// Id of the parent location. The root is its own parent.
    pub parent_location_id: u64,
    /// Id of the content item placed at this location.
    pub content_id: u64,
}

/// The intent to create a location: only the destination parent is known,
/// the location itself does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationCreateStruct {
    pub parent_location_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_serialization_round_trip() {
        let original = Location {
            id: 58,
            path_string: "/1/2/58/".to_string(),
            depth: 2,
            parent_location_id: 2,
            content_id: 23,
        };
        let json = serde_json::to_string(&original).unwrap();
        let restored: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
