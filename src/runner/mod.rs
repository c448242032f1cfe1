//! Work-item orchestration: load symbols, compare, filter and report.
//!
//! An [`ApiCompatRunner`] owns a queue of [`ApiCompatRunnerWorkItem`]s. Each item moves
//! through the stages of [`WorkItemState`]: its inputs are loaded through the
//! [`AssemblyLoader`] (in parallel, each distinct input once), the first left input is
//! compared against every right input, and every difference is looked up in the
//! [`SuppressionEngine`]. Unsuppressed differences are handed to the [`CompatLog`] under a
//! header that is emitted once per pair, just before its first difference.
//!
//! # Failure Handling
//!
//! A work item whose inputs cannot be loaded is reported through
//! [`CompatLog::log_load_failure`] and skipped; the run continues with the next item. An
//! error returned by the log aborts the run.
//!
//! # Key Components
//!
//! - [`ApiCompatRunner`] - The queue and the execution loop
//! - [`ApiCompatRunnerWorkItem`], [`ApiCompatRunnerOptions`] - What to compare and how
//! - [`AssemblyLoader`] - Cached symbol loading
//! - [`CompatLog`], [`CollectingLog`], [`LogFacade`], [`SuppressionGeneratingLog`] - Reporting
//! - [`RunResult`] - Counts and failures of a run

mod loader;
mod options;
mod report;
mod result;
mod work_item;

pub use loader::AssemblyLoader;
pub use options::ApiCompatRunnerOptions;
pub use report::{CollectingLog, CompatLog, LogEntry, LogFacade, SuppressionGeneratingLog};
pub use result::{RunResult, WorkItemState};
pub use work_item::ApiCompatRunnerWorkItem;

use std::{collections::HashMap, sync::Arc};

use crate::{
    comparer::ApiComparer,
    rules::CompatDifference,
    suppression::SuppressionEngine,
    symbols::{AssemblySymbol, AssemblySymbolRc, ElementContainer, MetadataInformation},
    Error, Result,
};

struct LoadedWorkItem {
    left: AssemblySymbolRc,
    rights: Vec<AssemblySymbolRc>,
}

/// Queues work items and executes them.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use apicompat::prelude::*;
///
/// let source = Arc::new(InMemorySource::new());
/// let provider = Arc::new(PreloadedSymbolProvider::new());
/// let log = Arc::new(CollectingLog::new());
///
/// let mut runner = ApiCompatRunner::new(AssemblyLoader::new(source, provider), log.clone());
/// let result = runner.execute_all()?;
/// assert_eq!(result.executed_count, 0);
/// # Ok::<(), apicompat::Error>(())
/// ```
pub struct ApiCompatRunner {
    loader: AssemblyLoader,
    comparer: ApiComparer,
    suppression_engine: Arc<SuppressionEngine>,
    log: Arc<dyn CompatLog>,
    work_items: Vec<ApiCompatRunnerWorkItem>,
}

impl ApiCompatRunner {
    /// Create a runner with the default comparer and an empty suppression store.
    ///
    /// # Arguments
    ///
    /// * `loader` - Loads the symbols of every input
    /// * `log` - Receives every report
    #[must_use]
    pub fn new(loader: AssemblyLoader, log: Arc<dyn CompatLog>) -> Self {
        Self {
            loader,
            comparer: ApiComparer::default(),
            suppression_engine: Arc::new(SuppressionEngine::new()),
            log,
            work_items: Vec::new(),
        }
    }

    /// Use `comparer` for every work item.
    #[must_use]
    pub fn with_comparer(mut self, comparer: ApiComparer) -> Self {
        self.comparer = comparer;
        self
    }

    /// Filter differences through `engine`.
    #[must_use]
    pub fn with_suppression_engine(mut self, engine: Arc<SuppressionEngine>) -> Self {
        self.suppression_engine = engine;
        self
    }

    /// The suppression store consulted for every difference.
    #[must_use]
    pub fn suppression_engine(&self) -> &Arc<SuppressionEngine> {
        &self.suppression_engine
    }

    /// The queued work items, in execution order.
    #[must_use]
    pub fn work_items(&self) -> &[ApiCompatRunnerWorkItem] {
        &self.work_items
    }

    /// Queue a work item.
    ///
    /// If a queued item has the same left set and options, the rights of `work_item` are
    /// appended to it (skipping rights it already has) and no new item is created. The queued
    /// item keeps its own left order, and only its first left is compared, so the item that
    /// was enqueued first decides which left is used.
    pub fn enqueue(&mut self, work_item: ApiCompatRunnerWorkItem) {
        match self
            .work_items
            .iter_mut()
            .find(|queued| queued.has_same_identity(&work_item))
        {
            Some(queued) => queued.merge_rights(work_item.rights().iter().cloned()),
            None => self.work_items.push(work_item),
        }
    }

    /// Build a work item from its parts and queue it.
    ///
    /// # Errors
    /// Returns [`Error::InvalidWorkItem`] if `lefts` is empty.
    pub fn enqueue_inputs(
        &mut self,
        lefts: Vec<MetadataInformation>,
        rights: Vec<MetadataInformation>,
        options: ApiCompatRunnerOptions,
    ) -> Result<()> {
        self.enqueue(ApiCompatRunnerWorkItem::new(lefts, rights, options)?);
        Ok(())
    }

    /// Execute every queued work item in enqueue order and clear the queue.
    ///
    /// # Errors
    /// Returns the error of the log if reporting fails; the remaining work items are dropped.
    pub fn execute_all(&mut self) -> Result<RunResult> {
        let work_items = std::mem::take(&mut self.work_items);
        let mut result = RunResult::new();

        for item in &work_items {
            log::debug!("{}: {}", item, WorkItemState::SymbolsLoading);
            let loaded = match self.load_work_item(item) {
                Ok(loaded) => loaded,
                Err((input, error)) => {
                    log::warn!("Skipping {}: {}", item, error);
                    self.log.log_load_failure(input, &error)?;
                    result.record_failure(item.to_string(), error.to_string());
                    continue;
                }
            };

            log::debug!("{}: {}", item, WorkItemState::Comparing);
            let differences = self.compare(item, &loaded);

            log::debug!("{}: {}", item, WorkItemState::DifferencesFiltered);
            let left = &item.lefts()[0];
            let is_baseline = item.options().is_baseline_comparison;
            for (right, pair_differences) in item.rights().iter().zip(differences) {
                let mut header_logged = false;
                for difference in pair_differences {
                    let key = difference.suppression_key(left, right, is_baseline);
                    if self.suppression_engine.is_suppressed(&key) {
                        result.suppressed_count += 1;
                        continue;
                    }

                    if !header_logged {
                        self.log.log_header(left, right, is_baseline)?;
                        header_logged = true;
                    }
                    self.log.log_difference(left, right, &key, &difference)?;
                    result.reported_count += 1;
                }
            }

            log::debug!("{}: {}", item, WorkItemState::Reported);
            result.record_success();
        }

        Ok(result)
    }

    fn load_work_item<'i>(
        &self,
        item: &'i ApiCompatRunnerWorkItem,
    ) -> std::result::Result<LoadedWorkItem, (&'i MetadataInformation, Error)> {
        let resolve_references = item.options().should_resolve_references();

        let mut inputs: Vec<&MetadataInformation> = Vec::new();
        for input in item.lefts().iter().chain(item.rights()) {
            if !inputs.contains(&input) {
                inputs.push(input);
            }
        }

        let mut loaded: HashMap<&MetadataInformation, AssemblySymbolRc> = HashMap::new();
        for (input, outcome) in inputs
            .iter()
            .zip(self.loader.load_all(&inputs, resolve_references))
        {
            match outcome {
                Ok(symbols) => {
                    loaded.insert(*input, symbols);
                }
                Err(error) => return Err((*input, error)),
            }
        }

        let lookup = |input: &'i MetadataInformation| {
            loaded.get(input).cloned().ok_or_else(|| {
                (
                    input,
                    Error::SymbolLoad {
                        assembly: input.assembly_id.clone(),
                        message: "symbols missing after load".to_string(),
                    },
                )
            })
        };

        Ok(LoadedWorkItem {
            left: lookup(&item.lefts()[0])?,
            rights: item
                .rights()
                .iter()
                .map(lookup)
                .collect::<std::result::Result<_, _>>()?,
        })
    }

    fn compare(
        &self,
        item: &ApiCompatRunnerWorkItem,
        loaded: &LoadedWorkItem,
    ) -> Vec<Vec<CompatDifference>> {
        let left = ElementContainer::new(loaded.left.as_ref(), &item.lefts()[0]);
        let rights: Vec<ElementContainer<'_, AssemblySymbol>> = item
            .rights()
            .iter()
            .zip(&loaded.rights)
            .map(|(info, symbols)| ElementContainer::new(symbols.as_ref(), info))
            .collect();

        self.comparer
            .get_differences(left, &rights, item.options().comparison_options())
    }
}

impl std::fmt::Debug for ApiCompatRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCompatRunner")
            .field("loader", &self.loader)
            .field("comparer", &self.comparer)
            .field("work_items", &self.work_items.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rules::DiagnosticId,
        suppression::Suppression,
        symbols::{MemberSymbol, NamespaceSymbol},
        test::{assembly, class, Harness},
    };

    fn widget_v1() -> AssemblySymbol {
        assembly("Lib", "1.0").with_namespace(
            NamespaceSymbol::new("Lib").with_type(
                class("Widget").with_member(MemberSymbol::method("Foo").with_parameter("value", "System.Int32")),
            ),
        )
    }

    fn widget_v2() -> AssemblySymbol {
        assembly("Lib", "1.0").with_namespace(NamespaceSymbol::new("Lib").with_type(class("Widget")))
    }

    #[test]
    fn test_enqueue_merges_by_identity() {
        let harness = Harness::new();
        let log = Arc::new(CollectingLog::new());
        let mut runner = ApiCompatRunner::new(harness.loader(), log);
        let (v1, v2, v3) = (
            crate::test::metadata("v1"),
            crate::test::metadata("v2"),
            crate::test::metadata("v3"),
        );

        runner
            .enqueue_inputs(vec![v1.clone()], vec![v2.clone()], ApiCompatRunnerOptions::default())
            .unwrap();
        runner
            .enqueue_inputs(vec![v1.clone()], vec![v3.clone(), v2.clone()], ApiCompatRunnerOptions::default())
            .unwrap();
        runner
            .enqueue_inputs(vec![v1], vec![v2], ApiCompatRunnerOptions::baseline())
            .unwrap();

        assert_eq!(runner.work_items().len(), 2);
        let rights: Vec<&str> = runner.work_items()[0]
            .rights()
            .iter()
            .map(|r| r.assembly_id.as_str())
            .collect();
        assert_eq!(rights, vec!["v2", "v3"]);
    }

    #[test]
    fn test_merged_item_keeps_first_left_order() {
        let harness = Harness::new();
        let a = harness.register("a", widget_v1());
        let b = harness.register("b", widget_v2());
        let r1 = harness.register("r1", widget_v1());
        let r2 = harness.register("r2", widget_v1());
        let log = Arc::new(CollectingLog::new());
        let mut runner = ApiCompatRunner::new(harness.loader(), log.clone());

        runner
            .enqueue_inputs(vec![a.clone(), b.clone()], vec![r1], ApiCompatRunnerOptions::default())
            .unwrap();
        runner
            .enqueue_inputs(vec![b, a], vec![r2], ApiCompatRunnerOptions::default())
            .unwrap();

        assert_eq!(runner.work_items().len(), 1);
        let item = &runner.work_items()[0];
        assert_eq!(item.lefts()[0].assembly_id, "a");
        let rights: Vec<&str> = item.rights().iter().map(|r| r.assembly_id.as_str()).collect();
        assert_eq!(rights, vec!["r1", "r2"]);

        // "a" still has Foo, so neither right reports a removal.
        let result = runner.execute_all().unwrap();
        assert_eq!(result.reported_count, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_removed_member_reported_and_suppressed() {
        let harness = Harness::new();
        let v1 = harness.register("v1", widget_v1());
        let v2 = harness.register("v2", widget_v2());

        let log = Arc::new(CollectingLog::new());
        let mut runner = ApiCompatRunner::new(harness.loader(), log.clone());
        runner
            .enqueue_inputs(vec![v1.clone()], vec![v2.clone()], ApiCompatRunnerOptions::default())
            .unwrap();
        let result = runner.execute_all().unwrap();

        assert_eq!(result.reported_count, 1);
        assert_eq!(log.header_count(), 1);
        assert_eq!(log.differences()[0].diagnostic_id, DiagnosticId::MemberMustExist);
        assert!(runner.work_items().is_empty());

        let engine = Arc::new(SuppressionEngine::new());
        engine.add(Suppression::new("CP0002").with_target("M:Lib.Widget.Foo(System.Int32)"));
        let log = Arc::new(CollectingLog::new());
        let mut runner =
            ApiCompatRunner::new(harness.loader(), log.clone()).with_suppression_engine(engine.clone());
        runner
            .enqueue_inputs(vec![v1], vec![v2], ApiCompatRunnerOptions::default())
            .unwrap();
        let result = runner.execute_all().unwrap();

        assert_eq!(result.reported_count, 0);
        assert_eq!(result.suppressed_count, 1);
        assert!(log.is_empty());
        assert!(engine.unmatched_suppressions().is_empty());
    }

    #[test]
    fn test_load_failure_skips_item_only() {
        let harness = Harness::new();
        let v1 = harness.register("v1", widget_v1());
        let v2 = harness.register("v2", widget_v2());
        let missing = crate::test::metadata("missing");

        let log = Arc::new(CollectingLog::new());
        let mut runner = ApiCompatRunner::new(harness.loader(), log.clone());
        runner
            .enqueue_inputs(vec![missing], vec![v2.clone()], ApiCompatRunnerOptions::default())
            .unwrap();
        runner
            .enqueue_inputs(vec![v1], vec![v2], ApiCompatRunnerOptions::default())
            .unwrap();
        let result = runner.execute_all().unwrap();

        assert_eq!(result.failed_count, 1);
        assert_eq!(result.executed_count, 1);
        assert!(matches!(
            &log.entries()[0],
            LogEntry::LoadFailure { diagnostic_id: DiagnosticId::AssemblyNotFound, .. }
        ));
        assert_eq!(log.differences().len(), 1);
    }

    #[test]
    fn test_baseline_never_resolves_references() {
        let harness = Harness::new();
        let v1 = harness.register("v1", widget_v1());
        let v2 = harness.register("v2", widget_v1());

        let log = Arc::new(CollectingLog::new());
        let mut runner = ApiCompatRunner::new(harness.loader(), log);
        runner
            .enqueue_inputs(vec![v1], vec![v2], ApiCompatRunnerOptions::new(false, true, true))
            .unwrap();
        runner.execute_all().unwrap();

        assert!(harness.provider.calls.iter().all(|(_, (_, resolve))| !resolve));
        assert_eq!(harness.provider.calls_for("v1"), 1);
    }

    #[test]
    fn test_log_failure_aborts_run() {
        struct FailingLog;

        impl CompatLog for FailingLog {
            fn log_header(&self, _: &MetadataInformation, _: &MetadataInformation, _: bool) -> Result<()> {
                Err(Error::LogFailure("disk full".to_string()))
            }
            fn log_difference(
                &self,
                _: &MetadataInformation,
                _: &MetadataInformation,
                _: &Suppression,
                _: &CompatDifference,
            ) -> Result<()> {
                Ok(())
            }
            fn log_load_failure(&self, _: &MetadataInformation, _: &Error) -> Result<()> {
                Ok(())
            }
            fn log_unnecessary_suppression(&self, _: &Suppression) -> Result<()> {
                Ok(())
            }
        }

        let harness = Harness::new();
        let v1 = harness.register("v1", widget_v1());
        let v2 = harness.register("v2", widget_v2());
        let mut runner = ApiCompatRunner::new(harness.loader(), Arc::new(FailingLog));
        runner
            .enqueue_inputs(vec![v1], vec![v2], ApiCompatRunnerOptions::default())
            .unwrap();

        assert!(matches!(runner.execute_all(), Err(Error::LogFailure(_))));
    }
}
