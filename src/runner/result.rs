use strum::{Display, EnumIter};

/// Stage a work item reached during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum WorkItemState {
    /// Queued, not yet started.
    Enqueued,
    /// Symbols of the inputs are being loaded.
    SymbolsLoading,
    /// Mapper and rules are running.
    Comparing,
    /// Differences went through the suppression store.
    DifferencesFiltered,
    /// Unsuppressed differences were handed to the log.
    Reported,
}

/// Outcome of [`crate::runner::ApiCompatRunner::execute_all`].
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// Work items that reached [`WorkItemState::Reported`].
    pub executed_count: usize,
    /// Work items skipped because an input could not be loaded.
    pub failed_count: usize,
    /// Differences handed to the log.
    pub reported_count: usize,
    /// Differences removed by the suppression store.
    pub suppressed_count: usize,
    /// `(work item, error message)` for each failed work item.
    pub failures: Vec<(String, String)>,
}

impl RunResult {
    /// Create an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if every work item was executed.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed_count == 0
    }

    /// Returns `true` if at least one work item failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed_count > 0
    }

    /// Returns `true` if any difference was reported.
    #[must_use]
    pub fn has_differences(&self) -> bool {
        self.reported_count > 0
    }

    pub(crate) fn record_success(&mut self) {
        self.executed_count += 1;
    }

    pub(crate) fn record_failure(&mut self, work_item: String, error_message: String) {
        self.failures.push((work_item, error_message));
        self.failed_count += 1;
    }
}
