// registry.rs — The limitation type registry.
//
// Maps limitation identifiers to their executable behavior. Built once at
// startup with explicit reader injection — the engine has no service
// locator, and an unknown identifier is a lookup miss the caller handles,
// not a runtime wiring surprise.

use std::collections::HashMap;
use std::sync::Arc;

use crate::limitation_type::{
    ContentTypeLimitation, LimitationType, LocationLimitation, NewObjectStateLimitation,
    ObjectStateLimitation, ParentContentTypeLimitation, ParentDepthLimitation, SectionLimitation,
    SubtreeLimitation,
};
use crate::readers::{
    ContentReader, ContentTypeReader, LocationReader, ObjectStateReader, SectionReader,
};

/// Identifier → limitation behavior, the engine's entry point.
pub struct LimitationRegistry {
    types: HashMap<&'static str, LimitationType>,
}

impl LimitationRegistry {
    /// An empty registry. Mostly useful for hosts that wire a custom
    /// subset; production setups call [`LimitationRegistry::standard`].
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Register one behavior under its identifier, replacing any previous
    /// registration.
    pub fn register(&mut self, limitation_type: LimitationType) {
        self.types
            .insert(limitation_type.identifier(), limitation_type);
    }

    /// Look up the behavior bound to `identifier`.
    pub fn get(&self, identifier: &str) -> Option<&LimitationType> {
        self.types.get(identifier)
    }

    /// The registered identifiers, for diagnostics.
    pub fn identifiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    /// Wire all eight standard limitation types against the given readers.
    pub fn standard(
        content_types: Arc<dyn ContentTypeReader>,
        locations: Arc<dyn LocationReader>,
        content: Arc<dyn ContentReader>,
        sections: Arc<dyn SectionReader>,
        object_states: Arc<dyn ObjectStateReader>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(LimitationType::ContentType(ContentTypeLimitation::new(
            content_types.clone(),
        )));
        registry.register(LimitationType::ParentContentType(
            ParentContentTypeLimitation::new(content_types, locations.clone(), content),
        ));
        registry.register(LimitationType::Location(LocationLimitation::new(
            locations.clone(),
        )));
        registry.register(LimitationType::ParentDepth(ParentDepthLimitation::new(
            locations.clone(),
        )));
        registry.register(LimitationType::Subtree(SubtreeLimitation::new(locations)));
        registry.register(LimitationType::Section(SectionLimitation::new(sections)));
        registry.register(LimitationType::ObjectState(ObjectStateLimitation::new(
            object_states.clone(),
        )));
        registry.register(LimitationType::NewObjectState(
            NewObjectStateLimitation::new(object_states),
        ));
        registry
    }
}

impl Default for LimitationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
