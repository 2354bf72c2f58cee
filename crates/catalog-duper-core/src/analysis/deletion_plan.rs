use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::retention::{resolve_keep, MissingPricePolicy};
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::scanner::DuplicateGroup;
use crate::storage::models::ItemId;
use crate::store::CatalogStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionMode {
    /// Only operator-chosen ids.
    Selected,
    /// Every non-kept item of every group.
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDeletion {
    pub item_id: ItemId,
    pub title: String,
    pub price: Option<f64>,
}

/// Items to remove, in group order then price order.
#[derive(Debug, Clone)]
pub struct DeletionPlan {
    pub mode: DeletionMode,
    pub entries: Vec<PlannedDeletion>,
    /// Kept items whose id was among the candidates; they are never deleted.
    pub protected: Vec<ItemId>,
}

impl DeletionPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.entries.iter().map(|e| e.item_id).collect()
    }
}

/// Plan the removal of the candidates that are deletable in their group.
///
/// Candidates that are the kept item of their group, or that belong to no
/// group at all, are left alone.
pub fn plan_selected_deletions(
    groups: &[DuplicateGroup],
    candidates: &BTreeSet<ItemId>,
    policy: MissingPricePolicy,
) -> DeletionPlan {
    let mut entries = Vec::new();
    let mut protected = Vec::new();
    let mut matched = 0usize;

    for group in groups {
        let Some(decision) = resolve_keep(&group.items, policy) else {
            continue;
        };

        if candidates.contains(&decision.keep.id) {
            warn!(
                "Item #{} is the lowest priced '{}', refusing to delete it",
                decision.keep.id, group.title
            );
            protected.push(decision.keep.id);
            matched += 1;
        }

        for item in decision.deletable {
            if candidates.contains(&item.id) {
                matched += 1;
                entries.push(PlannedDeletion {
                    item_id: item.id,
                    title: item.title.clone(),
                    price: item.price,
                });
            }
        }
    }

    let unmatched = candidates.len().saturating_sub(matched);
    if unmatched > 0 {
        debug!("{} candidate ids are not part of any duplicate group", unmatched);
    }

    DeletionPlan {
        mode: DeletionMode::Selected,
        entries,
        protected,
    }
}

/// Plan the removal of every non-kept item across all groups.
pub fn plan_all_deletions(groups: &[DuplicateGroup], policy: MissingPricePolicy) -> DeletionPlan {
    let mut entries = Vec::new();

    for group in groups {
        let Some(decision) = resolve_keep(&group.items, policy) else {
            continue;
        };
        debug!(
            "Keeping #{} for '{}', {} to delete",
            decision.keep.id,
            group.title,
            decision.deletable.len()
        );
        entries.extend(decision.deletable.into_iter().map(|item| PlannedDeletion {
            item_id: item.id,
            title: item.title.clone(),
            price: item.price,
        }));
    }

    DeletionPlan {
        mode: DeletionMode::All,
        entries,
        protected: Vec::new(),
    }
}

/// Carry out a plan against the store, one permanent delete at a time.
///
/// Stops at the first failure and returns it; deletions already made stay made.
pub fn execute_deletion_plan<S: CatalogStore + ?Sized>(
    store: &S,
    plan: &DeletionPlan,
    reporter: &dyn ProgressReporter,
) -> Result<usize, Error> {
    let start = Instant::now();
    reporter.on_delete_start(plan.len());

    let mut deleted = 0;
    for entry in &plan.entries {
        store.delete_item(entry.item_id)?;
        deleted += 1;
        debug!("Deleted #{} '{}'", entry.item_id, entry.title);
        reporter.on_delete_progress(deleted, plan.len());
    }

    let duration = start.elapsed();
    reporter.on_delete_complete(deleted, duration.as_secs_f64());
    info!(
        "Deletion plan executed ({:?}): {} items removed in {:.2}s",
        plan.mode,
        deleted,
        duration.as_secs_f64()
    );
    Ok(deleted)
}
