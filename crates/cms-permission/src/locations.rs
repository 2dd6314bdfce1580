// locations.rs — Publish/draft-aware location resolution.
//
// Every positional limitation (Location, ParentDepth, Subtree,
// ParentContentType) needs "the locations relevant to this content right
// now". The branch is the same everywhere: published content is placed at
// its own locations; a draft has none yet, so the locations it will be
// placed under — its future parents — stand in. Factored here so the branch
// exists exactly once.

use crate::readers::{LocationReader, ReaderError};
use cms_domain::{ContentInfo, Location};

/// Resolve the locations to judge `info` by: its own locations when
/// published, the would-be parent locations when still a draft.
pub fn resolve_locations(
    info: &ContentInfo,
    locations: &dyn LocationReader,
) -> Result<Vec<Location>, ReaderError> {
    if info.published {
        locations.locations_by_content(info.id)
    } else {
        locations.parent_locations_for_draft(info.id)
    }
}
