use std::collections::BTreeSet;

use catalog_duper_core::analysis::deletion_plan::{
    execute_deletion_plan, plan_all_deletions, plan_selected_deletions, DeletionMode,
};
use catalog_duper_core::scanner::build_title_groups;
use catalog_duper_core::storage::models::CatalogItem;
use catalog_duper_core::{CatalogStore, InMemoryCatalog, MissingPricePolicy, SilentReporter};

fn item(id: i64, title: &str, price: f64) -> CatalogItem {
    CatalogItem::new(id, title, Some(price))
}

fn ids(items: &[CatalogItem]) -> Vec<i64> {
    items.iter().map(|i| i.id).collect()
}

#[test]
fn test_single_duplicate_group() {
    let scan = build_title_groups(vec![
        item(1, "A", 10.0),
        item(2, "A", 5.0),
        item(3, "B", 7.0),
    ]);

    assert_eq!(scan.groups.len(), 1);
    assert_eq!(scan.groups[0].title, "A");
    assert_eq!(ids(&scan.groups[0].items), vec![1, 2]);
    assert_eq!(scan.total_items, 3);
    assert_eq!(scan.unique_titles, 2);
    assert_eq!(scan.duplicate_items(), 2);
}

#[test]
fn test_titles_compared_exactly() {
    let scan = build_title_groups(vec![
        item(1, "Shirt", 1.0),
        item(2, "shirt ", 1.0),
        item(3, "shirt", 1.0),
        item(4, "Shirt ", 1.0),
    ]);
    assert!(scan.groups.is_empty());
    assert_eq!(scan.unique_titles, 4);
}

#[test]
fn test_group_order_follows_second_sighting() {
    let scan = build_title_groups(vec![
        item(1, "A", 1.0),
        item(2, "B", 1.0),
        item(3, "B", 1.0),
        item(4, "C", 1.0),
        item(5, "A", 1.0),
        item(6, "B", 1.0),
    ]);

    let titles: Vec<&str> = scan.groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
    assert_eq!(ids(&scan.groups[0].items), vec![2, 3, 6]);
    assert_eq!(ids(&scan.groups[1].items), vec![1, 5]);
}

#[test]
fn test_every_group_has_at_least_two_items() {
    let items = (0..40)
        .map(|i| item(i, &format!("title-{}", i % 7 * (i % 3)), i as f64))
        .collect();
    let scan = build_title_groups(items);
    assert!(scan.groups.iter().all(|g| g.len() >= 2));
    assert_eq!(
        scan.duplicate_items() + (scan.unique_titles - scan.groups.len()),
        scan.total_items
    );
}

#[test]
fn test_plan_selected_never_includes_keep() {
    let scan = build_title_groups(vec![
        item(1, "A", 10.0),
        item(2, "A", 5.0),
        item(3, "A", 8.0),
    ]);
    let candidates: BTreeSet<i64> = [1, 2, 3].into_iter().collect();

    let plan = plan_selected_deletions(&scan.groups, &candidates, MissingPricePolicy::Last);
    assert_eq!(plan.mode, DeletionMode::Selected);
    assert_eq!(plan.item_ids(), vec![3, 1]);
    assert_eq!(plan.protected, vec![2]);
}

#[test]
fn test_plan_selected_ignores_unselected_and_unknown() {
    let scan = build_title_groups(vec![
        item(1, "A", 10.0),
        item(2, "A", 5.0),
        item(3, "A", 8.0),
        item(4, "B", 1.0),
    ]);
    let candidates: BTreeSet<i64> = [3, 4, 99].into_iter().collect();

    let plan = plan_selected_deletions(&scan.groups, &candidates, MissingPricePolicy::Last);
    assert_eq!(plan.item_ids(), vec![3]);
    assert!(plan.protected.is_empty());
}

#[test]
fn test_plan_all_counts_group_size_minus_one() {
    let scan = build_title_groups(vec![
        item(1, "A", 3.0),
        item(2, "A", 1.0),
        item(3, "B", 2.0),
        item(4, "B", 2.0),
        item(5, "B", 9.0),
        item(6, "C", 4.0),
    ]);

    let plan = plan_all_deletions(&scan.groups, MissingPricePolicy::Last);
    assert_eq!(plan.mode, DeletionMode::All);
    assert_eq!(plan.len(), (2 - 1) + (3 - 1));
    assert_eq!(plan.item_ids(), vec![1, 4, 5]);
}

#[test]
fn test_execute_plan_stops_at_first_failure() {
    let store = InMemoryCatalog::new(vec![
        item(1, "A", 3.0),
        item(2, "A", 1.0),
        item(3, "A", 5.0),
    ]);
    let scan = build_title_groups(store.list_published_items().unwrap());
    let plan = plan_all_deletions(&scan.groups, MissingPricePolicy::Last);
    assert_eq!(plan.item_ids(), vec![1, 3]);

    // Someone else already removed item 3
    store.delete_item(3).unwrap();

    let mut reversed = plan.clone();
    reversed.entries.reverse();
    let err = execute_deletion_plan(&store, &reversed, &SilentReporter).unwrap_err();
    assert!(matches!(err, catalog_duper_core::Error::ItemNotFound(3)));

    // Nothing after the failure ran
    assert_eq!(ids(&store.items()), vec![1, 2]);

    let deleted = execute_deletion_plan(&store, &plan, &SilentReporter);
    assert!(deleted.is_err());
    // Item 1 came before the failing entry, so it stays deleted
    assert_eq!(ids(&store.items()), vec![2]);
}
