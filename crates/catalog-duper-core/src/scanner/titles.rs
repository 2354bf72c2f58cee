use std::collections::HashMap;

use serde::Serialize;

use crate::storage::models::CatalogItem;

/// Items that share one exact title. Always holds at least two items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateGroup {
    pub title: String,
    pub items: Vec<CatalogItem>,
}

impl DuplicateGroup {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of grouping one catalog listing.
#[derive(Debug, Default)]
pub struct TitleScan {
    /// Groups in the order their title was first seen a second time.
    pub groups: Vec<DuplicateGroup>,
    pub total_items: usize,
    pub unique_titles: usize,
}

impl TitleScan {
    pub fn duplicate_items(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }
}

/// Group items by exact title, dropping titles seen only once.
///
/// The first item with a title is parked as a solo entry. A second sighting
/// promotes it into a group; later sightings append. Titles are compared
/// byte-for-byte, so `"Shirt"` and `"shirt "` stay apart.
pub fn build_title_groups(items: Vec<CatalogItem>) -> TitleScan {
    let total_items = items.len();
    let mut solo: HashMap<String, CatalogItem> = HashMap::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for item in items {
        if let Some(&idx) = group_index.get(&item.title) {
            groups[idx].items.push(item);
            continue;
        }

        match solo.remove(&item.title) {
            Some(first) => {
                group_index.insert(item.title.clone(), groups.len());
                groups.push(DuplicateGroup {
                    title: item.title.clone(),
                    items: vec![first, item],
                });
            }
            None => {
                solo.insert(item.title.clone(), item);
            }
        }
    }

    TitleScan {
        unique_titles: solo.len() + groups.len(),
        groups,
        total_items,
    }
}
