// content.rs — Content item value objects.
//
// A content item is visible to the permission engine in four shapes:
//
// - `ContentInfo`: the stored metadata record (id, type, section, status).
// - `VersionInfo`: one version of the item, wrapping its `ContentInfo`.
// - `Content`: a full item, wrapping a `VersionInfo`.
// - `ContentCreateStruct`: the intent to create an item — it has a content
//   type and (maybe) a section, but no id and no locations yet.
//
// The engine treats all four uniformly by extracting the `ContentInfo` where
// one exists and consulting the create intent where one does not.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a content item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// The item exists only as a draft; it has no locations of its own yet.
    Draft,
    /// The item is published and placed in the content tree.
    Published,
    /// The item was published once and has since been archived.
    Archived,
}

/// Stored metadata of a content item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentInfo {
    /// Repository-wide content id.
    pub id: u64,
    /// Id of the content type this item is an instance of.
    pub content_type_id: u64,
    /// Id of the section the item is assigned to.
    pub section_id: u64,
    /// Id of the item's main location, if it has been placed in the tree.
    /// Root-level system content may have none.
    pub main_location_id: Option<u64>,
    /// Whether the item has ever been published. Drafts of existing content
    /// keep `true`; never-published drafts carry `false`.
    pub published: bool,
    /// Current lifecycle status.
    pub status: ContentStatus,
}

/// One version of a content item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    /// Version number within the item.
    pub version_no: u32,
    /// The item this version belongs to.
    pub content_info: ContentInfo,
}

/// A full content item: the current version plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    pub version_info: VersionInfo,
}

impl Content {
    /// The stored metadata record of this item.
    pub fn content_info(&self) -> &ContentInfo {
        &self.version_info.content_info
    }
}

/// The intent to create a content item. Exists pre-publish: there is no id
/// and no location yet, only the declared type and target section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentCreateStruct {
    /// Id of the content type the new item will be an instance of.
    pub content_type_id: u64,
    /// Section the new item is destined for, when already decided.
    pub section_id: Option<u64>,
}

/// A content type (the "class" of a content item).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentType {
    pub id: u64,
    /// Human-readable identifier (e.g. "article", "folder").
    pub identifier: String,
}
