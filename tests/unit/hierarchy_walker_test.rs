// Hierarchy walker tests: bounded depth, ordering and cycle defense.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use helpers::fixtures::corporate_agency;
use helpers::memory::{MemoryAgencyRepository, MemoryStore};
use tierpay::core::AppError;
use tierpay::modules::agencies::services::HierarchyWalker;

fn walker(store: &Arc<MemoryStore>) -> HierarchyWalker {
    HierarchyWalker::new(Arc::new(MemoryAgencyRepository(store.clone())))
}

/// Seed a straight parent chain: ids[0] is the seller, ids[n] its furthest
/// ancestor.
fn seed_chain(store: &MemoryStore, ids: &[&str]) {
    for (i, id) in ids.iter().enumerate() {
        let parent = ids.get(i + 1).copied();
        store.insert_agency(corporate_agency(id, 1, parent));
    }
}

#[tokio::test]
async fn test_ancestors_ordered_by_distance() {
    let store = MemoryStore::new();
    seed_chain(&store, &["seller", "parent", "grandparent"]);

    let links = walker(&store).ancestors_of("seller").await.unwrap();

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].agency.id, "parent");
    assert_eq!(links[0].level_distance, 1);
    assert_eq!(links[1].agency.id, "grandparent");
    assert_eq!(links[1].level_distance, 2);
}

#[tokio::test]
async fn test_walk_stops_at_four_levels() {
    let store = MemoryStore::new();
    // six real ancestors above the seller
    seed_chain(&store, &["seller", "a1", "a2", "a3", "a4", "a5", "a6"]);

    let links = walker(&store).ancestors_of("seller").await.unwrap();

    assert_eq!(links.len(), 4);
    let distances: Vec<_> = links.iter().map(|l| l.level_distance).collect();
    assert_eq!(distances, vec![1, 2, 3, 4]);
    assert_eq!(links.last().unwrap().agency.id, "a4");
}

#[tokio::test]
async fn test_top_tier_agency_has_no_ancestors() {
    let store = MemoryStore::new();
    store.insert_agency(corporate_agency("top", 1, None));

    let links = walker(&store).ancestors_of("top").await.unwrap();
    assert!(links.is_empty());
}

#[tokio::test]
async fn test_cycle_is_detected() {
    let store = MemoryStore::new();
    store.insert_agency(corporate_agency("a", 2, Some("b")));
    store.insert_agency(corporate_agency("b", 1, Some("a")));

    let err = walker(&store).ancestors_of("a").await.unwrap_err();
    assert!(matches!(err, AppError::CycleDetected(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_self_parent_is_detected() {
    let store = MemoryStore::new();
    store.insert_agency(corporate_agency("loner", 1, Some("loner")));

    let err = walker(&store).ancestors_of("loner").await.unwrap_err();
    assert!(matches!(err, AppError::CycleDetected(_)));
}

#[tokio::test]
async fn test_dangling_parent_ends_walk() {
    let store = MemoryStore::new();
    store.insert_agency(corporate_agency("seller", 2, Some("parent")));
    store.insert_agency(corporate_agency("parent", 1, Some("missing")));

    let links = walker(&store).ancestors_of("seller").await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].agency.id, "parent");
}

#[tokio::test]
async fn test_unknown_start_agency_is_not_found() {
    let store = MemoryStore::new();

    let err = walker(&store).ancestors_of("ghost").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_walk_is_restartable_and_uncached() {
    let store = MemoryStore::new();
    seed_chain(&store, &["seller", "parent", "grandparent"]);

    let walker = walker(&store);
    assert_eq!(walker.ancestors_of("seller").await.unwrap().len(), 2);

    // re-parent the seller between calls; the walk must see the new structure
    store.insert_agency(corporate_agency("seller", 1, None));
    assert!(walker.ancestors_of("seller").await.unwrap().is_empty());
}
