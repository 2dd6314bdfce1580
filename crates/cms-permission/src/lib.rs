//! # cms-permission
//!
//! Limitation evaluation and criterion generation for the content repository.
//!
//! A [`Limitation`] is a named permission rule with a list of scalar values
//! restricting an operation's scope ("only content of type 4", "only below
//! /1/2/"). This crate binds each limitation identifier to its executable
//! behavior — a [`LimitationType`] — which can:
//!
//! - **evaluate** a single object (plus optional operation targets) into a
//!   tri-state [`Vote`]: `Granted`, `Denied` or `Abstain`;
//! - **generate a criterion**: translate the same rule into a storage-level
//!   [`Criterion`] predicate so permission filtering can be pushed down into
//!   search instead of evaluated object-by-object;
//! - **validate** limitation values against persistence for administration
//!   UIs, returning [`ValidationError`]s as data rather than failing.
//!
//! The two representations must stay semantically equivalent: whatever
//! `evaluate` would grant on stored attributes, the generated criterion must
//! select, and vice versa.
//!
//! Evaluation is synchronous and stateless. Persistence is reached only
//! through the narrow reader traits in [`readers`], so hosts inject real
//! backends and tests inject [`testing::InMemoryRepository`].
//!
//! ## Quick example
//!
//! ```rust
//! use std::sync::Arc;
//! use cms_domain::{ContentInfo, ContentStatus, UserRef};
//! use cms_permission::testing::InMemoryRepository;
//! use cms_permission::{identifiers, GrantObject, LimitationRegistry, LimitationValue, Vote};
//!
//! let repo = Arc::new(InMemoryRepository::new());
//! let registry = LimitationRegistry::standard(
//!     repo.clone(), repo.clone(), repo.clone(), repo.clone(), repo,
//! );
//!
//! let content_type = registry.get(identifiers::CONTENT_TYPE).unwrap();
//! let limitation = content_type.build_value(vec![LimitationValue::Int(66)]);
//! let object = GrantObject::ContentInfo(ContentInfo {
//!     id: 23,
//!     content_type_id: 66,
//!     section_id: 1,
//!     main_location_id: Some(2),
//!     published: true,
//!     status: ContentStatus::Published,
//! });
//! let vote = content_type
//!     .evaluate(&limitation, &UserRef::new(14), &object, None)
//!     .unwrap();
//! assert_eq!(vote, Vote::Granted);
//! ```

pub mod criterion;
pub mod error;
pub mod limitation;
pub mod limitation_type;
pub mod locations;
pub mod readers;
pub mod registry;
pub mod target;
pub mod testing;
pub mod vote;

// Re-export the main types at the crate root for convenience.
pub use criterion::{Criterion, Operator};
pub use error::PermissionError;
pub use limitation::{identifiers, Limitation, LimitationValue, ValidationError};
pub use limitation_type::{LimitationType, ValueSchema};
pub use readers::{
    ContentReader, ContentTypeReader, LocationReader, ObjectStateReader, ReaderError,
    SectionReader,
};
pub use registry::LimitationRegistry;
pub use target::{GrantObject, GrantTarget};
pub use vote::Vote;
