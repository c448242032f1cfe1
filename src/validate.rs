//! One-call validation of a set of left inputs against a set of right inputs.

use std::{path::PathBuf, sync::Arc};

use crate::{
    comparer::ApiComparer,
    config::ValidationConfig,
    runner::{
        ApiCompatRunner, ApiCompatRunnerOptions, ApiCompatRunnerWorkItem, AssemblyLoader,
        CompatLog, RunResult, SuppressionGeneratingLog,
    },
    source::ModuleSource,
    suppression::{Suppression, SuppressionEngine},
    symbols::{MetadataInformation, SymbolProvider},
    Error, Result,
};

/// Summary of a [`validate_assemblies`] call.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Counts and failures of the run.
    pub run: RunResult,
    /// Stored suppressions that matched nothing; only filled when they were reported.
    pub unnecessary_suppressions: Vec<Suppression>,
    /// The suppression file written in generation mode, if anything was written.
    pub suppression_file: Option<PathBuf>,
}

impl ValidationOutcome {
    /// Returns `true` if every input loaded and nothing was reported.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.run.is_complete_success()
            && !self.run.has_differences()
            && self.unnecessary_suppressions.is_empty()
    }
}

/// Compare `lefts` against `rights` and report through `log`.
///
/// The suppression store is built from `config.suppression_files` and `config.no_warn`.
/// References are resolved when `config.resolve_references` is set or any input lists
/// reference paths. Every left is compared against every right in a single work item, unless
/// `config.create_work_item_per_assembly` is set, in which case `lefts[i]` is compared
/// against `rights[i]`.
///
/// In generation mode the unsuppressed differences are accepted into the store instead of
/// being reported, and the store is written to [`ValidationConfig::output_file`].
/// Otherwise unnecessary suppressions are reported when
/// `config.report_unnecessary_suppressions` is set.
///
/// # Errors
///
/// Returns [`Error::InvalidWorkItem`] if there are no lefts, or if one work item per
/// assembly is requested and the counts differ. Returns [`Error::Error`] in generation mode
/// without an output file. Errors of the log and of writing the suppression file are
/// propagated.
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
/// let left = MetadataInformation::new("Lib", "/pkg/v1/Lib.dll").with_assembly_id("v1");
///
/// // The left input does not exist, so the only work item fails to load.
/// let outcome = validate_assemblies(
///     &ValidationConfig::default(),
///     vec![left.clone()],
///     vec![left],
///     source,
///     provider,
///     log.clone(),
/// )?;
/// assert_eq!(outcome.run.failed_count, 1);
/// assert!(!outcome.is_success());
/// # Ok::<(), apicompat::Error>(())
/// ```
pub fn validate_assemblies(
    config: &ValidationConfig,
    lefts: Vec<MetadataInformation>,
    rights: Vec<MetadataInformation>,
    source: Arc<dyn ModuleSource>,
    provider: Arc<dyn SymbolProvider>,
    log: Arc<dyn CompatLog>,
) -> Result<ValidationOutcome> {
    let output_file = if config.generate_suppression_file {
        match config.output_file() {
            Some(path) => Some(path.clone()),
            None => {
                return Err(Error::Error(
                    "generating a suppression file needs an output path".to_string(),
                ))
            }
        }
    } else {
        None
    };

    let mut engine = SuppressionEngine::load_from_files(&config.suppression_files);
    if let Some(no_warn) = &config.no_warn {
        engine = engine.with_no_warn(no_warn);
    }
    let engine = Arc::new(engine);

    let run_log: Arc<dyn CompatLog> = if output_file.is_some() {
        Arc::new(SuppressionGeneratingLog::new(engine.clone(), log.clone()))
    } else {
        log.clone()
    };

    let mut runner = ApiCompatRunner::new(AssemblyLoader::new(source, provider), run_log)
        .with_comparer(ApiComparer::new(
            config.mapper_settings(),
            &config.rule_settings(),
        ))
        .with_suppression_engine(engine.clone());

    let mut options = config.runner_options();
    options.resolve_references |= lefts
        .iter()
        .chain(&rights)
        .any(|input| !input.references.is_empty());

    for work_item in work_items(config, options, lefts, rights)? {
        runner.enqueue(work_item);
    }
    log::info!("Validating {} work items", runner.work_items().len());

    let mut outcome = ValidationOutcome {
        run: runner.execute_all()?,
        ..ValidationOutcome::default()
    };

    if let Some(path) = output_file {
        if engine.write_to_file(&path, config.preserve_unnecessary_suppressions)? {
            outcome.suppression_file = Some(path);
        }
    } else if config.report_unnecessary_suppressions {
        outcome.unnecessary_suppressions = engine.unmatched_suppressions();
        for suppression in &outcome.unnecessary_suppressions {
            log.log_unnecessary_suppression(suppression)?;
        }
    }

    Ok(outcome)
}

fn work_items(
    config: &ValidationConfig,
    options: ApiCompatRunnerOptions,
    lefts: Vec<MetadataInformation>,
    rights: Vec<MetadataInformation>,
) -> Result<Vec<ApiCompatRunnerWorkItem>> {
    if !config.create_work_item_per_assembly {
        return Ok(vec![ApiCompatRunnerWorkItem::new(lefts, rights, options)?]);
    }

    if lefts.len() != rights.len() {
        return Err(Error::InvalidWorkItem(format!(
            "one work item per assembly needs as many lefts as rights ({} vs {})",
            lefts.len(),
            rights.len()
        )));
    }

    lefts
        .into_iter()
        .zip(rights)
        .map(|(left, right)| ApiCompatRunnerWorkItem::new(vec![left], vec![right], options))
        .collect()
}
