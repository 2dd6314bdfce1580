// target.rs — The shapes a limitation is evaluated against.
//
// `GrantObject` is the thing being acted on; `GrantTarget` is an explicit,
// caller-supplied hint about the intended destination or new state of an
// in-flight operation (the location content is being moved into, the object
// state being assigned). Targets carry information the object itself does
// not have yet; when absent, the engine resolves current state through the
// persistence readers.

use cms_domain::{
    Content, ContentCreateStruct, ContentInfo, Location, LocationCreateStruct, ObjectState,
    VersionInfo,
};

/// The domain object an operation acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantObject {
    /// Stored content metadata.
    ContentInfo(ContentInfo),
    /// One version of a content item.
    VersionInfo(VersionInfo),
    /// A full content item.
    Content(Content),
    /// Content about to be created; has no id or location yet.
    ContentCreate(ContentCreateStruct),
    /// A bare location, for tree operations addressed at the node itself.
    Location(Location),
}

impl GrantObject {
    /// The stored content metadata, for the three shapes that carry it.
    /// `ContentCreate` and `Location` have none.
    pub fn content_info(&self) -> Option<&ContentInfo> {
        match self {
            GrantObject::ContentInfo(info) => Some(info),
            GrantObject::VersionInfo(version) => Some(&version.content_info),
            GrantObject::Content(content) => Some(content.content_info()),
            GrantObject::ContentCreate(_) | GrantObject::Location(_) => None,
        }
    }

    /// The creation intent, when the object is one.
    pub fn content_create(&self) -> Option<&ContentCreateStruct> {
        match self {
            GrantObject::ContentCreate(create) => Some(create),
            _ => None,
        }
    }

    /// Name of the object kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            GrantObject::ContentInfo(_) => "ContentInfo",
            GrantObject::VersionInfo(_) => "VersionInfo",
            GrantObject::Content(_) => "Content",
            GrantObject::ContentCreate(_) => "ContentCreateStruct",
            GrantObject::Location(_) => "Location",
        }
    }
}

/// An explicit operation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantTarget {
    /// An existing destination location.
    Location(Location),
    /// A location about to be created; only its parent is known.
    LocationCreate(LocationCreateStruct),
    /// An object state being assigned.
    ObjectState(ObjectState),
    /// "Any content type of {…}" — the declared type set of a bulk-create
    /// intent, before individual create structs exist.
    ContentTypeSet(Vec<u64>),
}

impl GrantTarget {
    /// Name of the target kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            GrantTarget::Location(_) => "Location",
            GrantTarget::LocationCreate(_) => "LocationCreateStruct",
            GrantTarget::ObjectState(_) => "ObjectState",
            GrantTarget::ContentTypeSet(_) => "ContentTypeSet",
        }
    }
}
