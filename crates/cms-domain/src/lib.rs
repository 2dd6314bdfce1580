//! # cms-domain
//!
//! Read-only value objects of the content repository's domain model, shared
//! by the permission engine and its collaborators: content in its published,
//! draft and not-yet-created shapes, locations in the content tree, sections,
//! content types and object states.
//!
//! These types carry data only. The services that create and mutate them
//! (publishing, moving, state assignment) live elsewhere; everything here is
//! an immutable snapshot handed to readers and evaluators.

// Module declarations — each `mod foo;` tells Rust to look for `foo.rs`
// in the same directory and include it as a submodule.
pub mod content;
pub mod location;
pub mod section;
pub mod state;
pub mod user;

// Re-export the main types at the crate root for convenience.
pub use content::{Content, ContentCreateStruct, ContentInfo, ContentStatus, ContentType, VersionInfo};
pub use location::{Location, LocationCreateStruct};
pub use section::Section;
pub use state::{ObjectState, ObjectStateGroup};
pub use user::UserRef;
