use std::collections::BTreeSet;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::deletion_plan::{self, DeletionPlan};
use crate::config::AppConfig;
use crate::error::Error;
use crate::pagination::{self, Page};
use crate::progress::ProgressReporter;
use crate::scanner::{self, DuplicateGroup, TitleScan};
use crate::storage::models::ItemId;
use crate::store::CatalogStore;

pub const STORE_INACTIVE_MESSAGE: &str = "Commerce store is not active.";
pub const NO_DUPLICATES_MESSAGE: &str = "No duplicate products found.";
pub const SELECTED_DELETED_MESSAGE: &str =
    "Selected duplicates deleted, lowest priced products retained.";

/// One page of duplicate groups.
pub type DuplicatePage = Page<DuplicateGroup>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Info,
    Error,
}

/// A line of feedback for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteAllReport {
    pub deleted_count: usize,
}

impl DeleteAllReport {
    pub fn status(&self) -> StatusMessage {
        StatusMessage::success(format!(
            "Deleted {} duplicate products across all groups, keeping the lowest priced product in each.",
            self.deleted_count
        ))
    }
}

/// Operator input for one admin action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRequest {
    Scan {
        page: usize,
    },
    /// `candidate_ids` is `None` when the form carried no selection at all.
    DeleteSelected {
        candidate_ids: Option<BTreeSet<ItemId>>,
        page: usize,
    },
    DeleteAll {
        page: usize,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminResponse {
    pub statuses: Vec<StatusMessage>,
    /// Present when the follow-up scan found at least one group on the page.
    pub page: Option<DuplicatePage>,
}

/// Finds title duplicates in a catalog store and removes all but the cheapest.
///
/// Nothing is cached: every call re-reads the full catalog.
pub struct DedupeEngine<S: CatalogStore> {
    store: S,
    config: AppConfig,
}

impl<S: CatalogStore> DedupeEngine<S> {
    pub fn new(store: S, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn ensure_available(&self) -> Result<(), Error> {
        if self.store.is_available()? {
            Ok(())
        } else {
            Err(Error::StoreUnavailable(
                "catalog store reports the commerce subsystem is inactive".to_string(),
            ))
        }
    }

    /// Read every published item and group them by exact title.
    pub fn scan(&self, reporter: &dyn ProgressReporter) -> Result<TitleScan, Error> {
        self.ensure_available()?;

        reporter.on_scan_start();
        let start = Instant::now();
        let items = self.store.list_published_items()?;
        let scan = scanner::build_title_groups(items);
        let duration = start.elapsed();
        reporter.on_scan_complete(scan.total_items, scan.groups.len(), duration.as_secs_f64());

        debug!(
            "Scanned {} items in {:.2}s: {} unique titles, {} duplicate groups, {} items in groups",
            scan.total_items,
            duration.as_secs_f64(),
            scan.unique_titles,
            scan.groups.len(),
            scan.duplicate_items(),
        );
        Ok(scan)
    }

    /// Scan and return page `page` (1-based) of the duplicate groups.
    pub fn scan_for_duplicates(
        &self,
        page: usize,
        reporter: &dyn ProgressReporter,
    ) -> Result<DuplicatePage, Error> {
        let scan = self.scan(reporter)?;
        let page = pagination::paginate(scan.groups, page, self.config.page_size);
        info!(
            "{} duplicate groups found, showing page {} of {}",
            page.total, page.page, page.total_pages
        );
        Ok(page)
    }

    /// Work out what a selective delete would remove, without deleting.
    pub fn plan_selected(
        &self,
        candidate_ids: &BTreeSet<ItemId>,
        reporter: &dyn ProgressReporter,
    ) -> Result<DeletionPlan, Error> {
        let scan = self.scan(reporter)?;
        Ok(deletion_plan::plan_selected_deletions(
            &scan.groups,
            candidate_ids,
            self.config.missing_price,
        ))
    }

    /// Work out what delete-all would remove, without deleting.
    pub fn plan_all(&self, reporter: &dyn ProgressReporter) -> Result<DeletionPlan, Error> {
        let scan = self.scan(reporter)?;
        Ok(deletion_plan::plan_all_deletions(
            &scan.groups,
            self.config.missing_price,
        ))
    }

    /// Delete the chosen items that are deletable in their group. The kept item
    /// of a group survives even when its id is among the candidates.
    pub fn delete_selected(
        &self,
        candidate_ids: Option<&BTreeSet<ItemId>>,
        reporter: &dyn ProgressReporter,
    ) -> Result<StatusMessage, Error> {
        let candidate_ids = match candidate_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => {
                debug!("No candidate ids submitted, nothing to delete");
                return Ok(StatusMessage::info("No products selected."));
            }
        };

        let plan = self.plan_selected(candidate_ids, reporter)?;
        if !plan.protected.is_empty() {
            warn!("Kept items {:?} were selected and left in place", plan.protected);
        }
        let deleted = deletion_plan::execute_deletion_plan(&self.store, &plan, reporter)?;
        info!("Selective delete removed {} of {} candidates", deleted, candidate_ids.len());
        Ok(StatusMessage::success(SELECTED_DELETED_MESSAGE))
    }

    /// Reduce every duplicate group in the catalog to its cheapest item.
    pub fn delete_all_duplicates(
        &self,
        reporter: &dyn ProgressReporter,
    ) -> Result<DeleteAllReport, Error> {
        let plan = self.plan_all(reporter)?;
        let deleted_count = deletion_plan::execute_deletion_plan(&self.store, &plan, reporter)?;
        Ok(DeleteAllReport { deleted_count })
    }

    /// Run one admin action the way the admin page does: perform the action,
    /// then re-scan and show the requested page.
    ///
    /// An inactive store becomes an error status instead of an `Err`. Deletion
    /// failures are returned as `Err` unchanged.
    pub fn handle(
        &self,
        request: &AdminRequest,
        reporter: &dyn ProgressReporter,
    ) -> Result<AdminResponse, Error> {
        let mut response = AdminResponse::default();

        let page = match request {
            AdminRequest::Scan { page } => *page,
            AdminRequest::DeleteSelected { candidate_ids, page } => {
                match self.delete_selected(candidate_ids.as_ref(), reporter) {
                    Ok(status) => response.statuses.push(status),
                    Err(Error::StoreUnavailable(_)) => return Ok(inactive_response()),
                    Err(e) => return Err(e),
                }
                *page
            }
            AdminRequest::DeleteAll { page } => {
                match self.delete_all_duplicates(reporter) {
                    Ok(report) => response.statuses.push(report.status()),
                    Err(Error::StoreUnavailable(_)) => return Ok(inactive_response()),
                    Err(e) => return Err(e),
                }
                *page
            }
        };

        match self.scan_for_duplicates(page, reporter) {
            Ok(found) if found.items.is_empty() => {
                response.statuses.push(StatusMessage::info(NO_DUPLICATES_MESSAGE));
            }
            Ok(found) => response.page = Some(found),
            Err(Error::StoreUnavailable(_)) => return Ok(inactive_response()),
            Err(e) => return Err(e),
        }

        Ok(response)
    }
}

fn inactive_response() -> AdminResponse {
    AdminResponse {
        statuses: vec![StatusMessage::error(STORE_INACTIVE_MESSAGE)],
        page: None,
    }
}
