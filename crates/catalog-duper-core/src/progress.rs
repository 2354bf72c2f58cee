/// Trait for reporting scan and deletion progress.
///
/// The CLI implements it with indicatif. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self) {}
    fn on_scan_complete(&self, _total_items: usize, _duplicate_groups: usize, _duration_secs: f64) {}
    fn on_delete_start(&self, _planned: usize) {}
    fn on_delete_progress(&self, _deleted: usize, _planned: usize) {}
    fn on_delete_complete(&self, _deleted: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
