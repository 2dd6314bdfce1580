// testing.rs — In-memory reader fixtures.
//
// `InMemoryRepository` implements every reader trait over seeded hash maps,
// so limitations can be evaluated in tests without a storage backend. It
// counts reads, which lets tests assert properties like "validating an
// empty limitation performs zero persistence calls".
//
// The module is compiled into the library (not cfg(test)) so downstream
// crates can drive the engine in their own tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use cms_domain::{
    ContentInfo, ContentType, Location, ObjectState, ObjectStateGroup, Section,
};

use crate::readers::{
    ContentReader, ContentTypeReader, LocationReader, ObjectStateReader, ReaderError,
    SectionReader,
};

/// A seeded, in-memory stand-in for the persistence layer.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    content_types: HashMap<u64, ContentType>,
    sections: HashMap<u64, Section>,
    locations: HashMap<u64, Location>,
    content: HashMap<u64, ContentInfo>,
    /// content id → ids of its (published) locations
    content_locations: HashMap<u64, Vec<u64>>,
    /// content id → ids of the locations a draft will be placed under
    draft_parents: HashMap<u64, Vec<u64>>,
    groups: Vec<ObjectStateGroup>,
    /// group id → state ids in that group
    group_states: HashMap<u64, Vec<u64>>,
    states: HashMap<u64, ObjectState>,
    /// (content id, group id) → current state id
    content_states: HashMap<(u64, u64), u64>,
    reads: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reader calls performed so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn count_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    // — builder-style seeding —

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_types.insert(content_type.id, content_type);
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.insert(section.id, section);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.insert(location.id, location);
        self
    }

    /// Seed a content item together with its published locations.
    pub fn with_content(mut self, info: ContentInfo, locations: Vec<Location>) -> Self {
        let ids = locations.iter().map(|l| l.id).collect();
        self.content_locations.insert(info.id, ids);
        for location in locations {
            self.locations.insert(location.id, location);
        }
        self.content.insert(info.id, info);
        self
    }

    /// Seed the parent locations a draft resolves to.
    pub fn with_draft_parents(mut self, content_id: u64, parents: Vec<Location>) -> Self {
        let ids = parents.iter().map(|l| l.id).collect();
        self.draft_parents.insert(content_id, ids);
        for location in parents {
            self.locations.insert(location.id, location);
        }
        self
    }

    /// Seed an object-state group and its states.
    pub fn with_state_group(mut self, group: ObjectStateGroup, states: Vec<ObjectState>) -> Self {
        let ids = states.iter().map(|s| s.id).collect();
        self.group_states.insert(group.id, ids);
        for state in states {
            self.states.insert(state.id, state);
        }
        self.groups.push(group);
        self
    }

    /// Seed the state a content item currently holds in a group.
    pub fn with_content_state(mut self, content_id: u64, group_id: u64, state_id: u64) -> Self {
        self.content_states.insert((content_id, group_id), state_id);
        self
    }
}

impl ContentTypeReader for InMemoryRepository {
    fn load_content_type(&self, id: u64) -> Result<ContentType, ReaderError> {
        self.count_read();
        self.content_types
            .get(&id)
            .cloned()
            .ok_or(ReaderError::not_found("content type", id))
    }
}

impl SectionReader for InMemoryRepository {
    fn load_section(&self, id: u64) -> Result<Section, ReaderError> {
        self.count_read();
        self.sections
            .get(&id)
            .cloned()
            .ok_or(ReaderError::not_found("section", id))
    }
}

impl LocationReader for InMemoryRepository {
    fn load_location(&self, id: u64) -> Result<Location, ReaderError> {
        self.count_read();
        self.locations
            .get(&id)
            .cloned()
            .ok_or(ReaderError::not_found("location", id))
    }

    fn locations_by_content(&self, content_id: u64) -> Result<Vec<Location>, ReaderError> {
        self.count_read();
        let ids = self.content_locations.get(&content_id).cloned().unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| self.locations.get(id).cloned())
            .collect())
    }

    fn parent_locations_for_draft(&self, content_id: u64) -> Result<Vec<Location>, ReaderError> {
        self.count_read();
        let ids = self.draft_parents.get(&content_id).cloned().unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| self.locations.get(id).cloned())
            .collect())
    }
}

impl ObjectStateReader for InMemoryRepository {
    fn load_object_state(&self, id: u64) -> Result<ObjectState, ReaderError> {
        self.count_read();
        self.states
            .get(&id)
            .cloned()
            .ok_or(ReaderError::not_found("object state", id))
    }

    fn load_all_groups(&self) -> Result<Vec<ObjectStateGroup>, ReaderError> {
        self.count_read();
        Ok(self.groups.clone())
    }

    fn load_object_states(&self, group_id: u64) -> Result<Vec<ObjectState>, ReaderError> {
        self.count_read();
        let ids = self.group_states.get(&group_id).cloned().unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| self.states.get(id).cloned())
            .collect())
    }

    fn content_state(&self, content_id: u64, group_id: u64) -> Result<ObjectState, ReaderError> {
        self.count_read();
        let state_id = self
            .content_states
            .get(&(content_id, group_id))
            .ok_or(ReaderError::not_found("content state for group", group_id))?;
        self.states
            .get(state_id)
            .cloned()
            .ok_or(ReaderError::not_found("object state", *state_id))
    }
}

impl ContentReader for InMemoryRepository {
    fn load_content_info(&self, content_id: u64) -> Result<ContentInfo, ReaderError> {
        self.count_read();
        self.content
            .get(&content_id)
            .cloned()
            .ok_or(ReaderError::not_found("content", content_id))
    }
}
