// pushdown_equivalence.rs — The two representations must agree.
//
// Every limitation exists twice: as an object-by-object decision
// (`evaluate`) and as a storage predicate (`get_criterion`). These tests
// seed a small repository, apply the criterion by hand the way a search
// backend would, and check that it selects exactly the content `evaluate`
// grants.

use std::sync::Arc;

use cms_domain::{ContentInfo, ContentStatus, Location, UserRef};
use cms_permission::testing::InMemoryRepository;
use cms_permission::{
    identifiers, Criterion, GrantObject, LimitationRegistry, LimitationValue, Vote,
};

struct Fixture {
    repo: Arc<InMemoryRepository>,
    registry: LimitationRegistry,
    content_ids: Vec<u64>,
}

/// Three published articles:
///   id 21, type 66, section 1, at /1/2/21/
///   id 22, type 66, section 3, at /1/43/22/
///   id 23, type 4,  section 3, at /1/2/23/
fn fixture() -> Fixture {
    fn info(id: u64, content_type_id: u64, section_id: u64) -> ContentInfo {
        ContentInfo {
            id,
            content_type_id,
            section_id,
            main_location_id: Some(id + 100),
            published: true,
            status: ContentStatus::Published,
        }
    }
    fn location(id: u64, path: &str, content_id: u64) -> Location {
        Location {
            id,
            path_string: path.to_string(),
            depth: 2,
            parent_location_id: 1,
            content_id,
        }
    }

    let repo = Arc::new(
        InMemoryRepository::new()
            .with_content(info(21, 66, 1), vec![location(121, "/1/2/121/", 21)])
            .with_content(info(22, 66, 3), vec![location(122, "/1/43/122/", 22)])
            .with_content(info(23, 4, 3), vec![location(123, "/1/2/123/", 23)]),
    );
    let registry = LimitationRegistry::standard(
        repo.clone(),
        repo.clone(),
        repo.clone(),
        repo.clone(),
        repo.clone(),
    );
    Fixture {
        repo,
        registry,
        content_ids: vec![21, 22, 23],
    }
}

/// Apply a criterion to one content item the way a storage backend would:
/// over stored attributes only.
fn criterion_selects(criterion: &Criterion, info: &ContentInfo, locations: &[Location]) -> bool {
    match criterion {
        Criterion::ContentTypeId { values, .. } => values.contains(&info.content_type_id),
        Criterion::SectionId { values, .. } => values.contains(&info.section_id),
        Criterion::LocationId { values, .. } => {
            locations.iter().any(|l| values.contains(&l.id))
        }
        Criterion::Subtree { values, .. } => locations
            .iter()
            .any(|l| values.iter().any(|prefix| l.path_string.starts_with(prefix))),
        Criterion::ObjectStateId { .. } => unreachable!("not exercised here"),
        Criterion::LogicalAnd { criteria } => criteria
            .iter()
            .all(|c| criterion_selects(c, info, locations)),
    }
}

fn assert_equivalent(fixture: &Fixture, identifier: &str, values: Vec<LimitationValue>) {
    use cms_permission::ContentReader;
    use cms_permission::LocationReader;

    let user = UserRef::new(14);
    let limitation_type = fixture.registry.get(identifier).unwrap();
    let limitation = limitation_type.build_value(values);
    let criterion = limitation_type.get_criterion(&limitation, &user).unwrap();

    for content_id in &fixture.content_ids {
        let info = fixture.repo.load_content_info(*content_id).unwrap();
        let locations = fixture.repo.locations_by_content(*content_id).unwrap();

        let vote = limitation_type
            .evaluate(&limitation, &user, &GrantObject::ContentInfo(info.clone()), None)
            .unwrap();
        let selected = criterion_selects(&criterion, &info, &locations);

        assert_eq!(
            vote,
            Vote::from(selected),
            "'{}' disagrees with its criterion on content {}",
            identifier,
            content_id
        );
    }
}

#[test]
fn content_type_criterion_matches_evaluation() {
    let fixture = fixture();
    assert_equivalent(&fixture, identifiers::CONTENT_TYPE, vec![LimitationValue::Int(66)]);
    assert_equivalent(
        &fixture,
        identifiers::CONTENT_TYPE,
        vec![LimitationValue::Int(4), LimitationValue::Int(66)],
    );
}

#[test]
fn section_criterion_matches_evaluation() {
    let fixture = fixture();
    assert_equivalent(&fixture, identifiers::SECTION, vec![LimitationValue::Int(3)]);
}

#[test]
fn location_criterion_matches_evaluation() {
    let fixture = fixture();
    assert_equivalent(
        &fixture,
        identifiers::LOCATION,
        vec![LimitationValue::Int(121), LimitationValue::Int(123)],
    );
}

#[test]
fn subtree_criterion_matches_evaluation() {
    let fixture = fixture();
    assert_equivalent(&fixture, identifiers::SUBTREE, vec![LimitationValue::from("/1/2/")]);
}

#[test]
fn criteria_serialize_for_the_search_boundary() {
    let fixture = fixture();
    let user = UserRef::new(14);
    let subtree = fixture.registry.get(identifiers::SUBTREE).unwrap();
    let limitation = subtree.build_value(vec![LimitationValue::from("/1/2/")]);
    let criterion = subtree.get_criterion(&limitation, &user).unwrap();

    let json = serde_json::to_string(&criterion).unwrap();
    let restored: Criterion = serde_json::from_str(&json).unwrap();
    assert_eq!(criterion, restored);
}
