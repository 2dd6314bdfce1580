// readers.rs — Narrow persistence reader traits.
//
// The engine never talks to storage directly; it consumes one small trait
// per collaborator, and each limitation variant is injected with exactly the
// readers it needs. Hosts back these with the real persistence layer; tests
// use `testing::InMemoryRepository`, which implements all of them.
//
// All reads are synchronous. An unresolvable reference is a `NotFound`,
// never treated as transient — `validate()` turns it into a ValidationError,
// while `evaluate()`/`get_criterion()` let it propagate as a hard failure.

use cms_domain::{
    ContentInfo, ContentType, Location, ObjectState, ObjectStateGroup, Section,
};
use thiserror::Error;

/// Errors surfaced by persistence readers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReaderError {
    /// The referenced entity does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: u64 },

    /// The backing store failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl ReaderError {
    pub fn not_found(kind: &'static str, id: u64) -> Self {
        ReaderError::NotFound { kind, id }
    }
}

/// Read access to content types.
pub trait ContentTypeReader: Send + Sync {
    fn load_content_type(&self, id: u64) -> Result<ContentType, ReaderError>;
}

/// Read access to sections.
pub trait SectionReader: Send + Sync {
    fn load_section(&self, id: u64) -> Result<Section, ReaderError>;
}

/// Read access to the content tree.
pub trait LocationReader: Send + Sync {
    fn load_location(&self, id: u64) -> Result<Location, ReaderError>;

    /// The locations a published content item is placed at.
    fn locations_by_content(&self, content_id: u64) -> Result<Vec<Location>, ReaderError>;

    /// The locations a draft will be placed under once published. Drafts
    /// have no locations of their own, so resolution yields the parents.
    fn parent_locations_for_draft(&self, content_id: u64) -> Result<Vec<Location>, ReaderError>;
}

/// Read access to object states, their groups, and per-content assignments.
pub trait ObjectStateReader: Send + Sync {
    fn load_object_state(&self, id: u64) -> Result<ObjectState, ReaderError>;

    fn load_all_groups(&self) -> Result<Vec<ObjectStateGroup>, ReaderError>;

    /// All states belonging to one group.
    fn load_object_states(&self, group_id: u64) -> Result<Vec<ObjectState>, ReaderError>;

    /// The state a content item currently holds within one group.
    fn content_state(&self, content_id: u64, group_id: u64) -> Result<ObjectState, ReaderError>;
}

/// Read access to content metadata.
pub trait ContentReader: Send + Sync {
    fn load_content_info(&self, content_id: u64) -> Result<ContentInfo, ReaderError>;
}
