// section.rs — Sections.
//
// A section is a coarse partition of the repository (e.g. "standard",
// "media", "restricted") used for grouping and access control. Content
// belongs to exactly one section.

use serde::{Deserialize, Serialize};

/// A repository section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub id: u64,
    /// Human-readable identifier (e.g. "standard", "media").
    pub identifier: String,
}
