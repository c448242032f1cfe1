//! Driver-level configuration for [`crate::validate_assemblies`].
//!
//! The per-component settings ([`MapperSettings`], [`RuleSettings`],
//! [`ApiCompatRunnerOptions`]) are derived from one [`ValidationConfig`], so a caller only
//! has to pick a preset and adjust the few switches it cares about.

use std::path::PathBuf;

use crate::{mapping::MapperSettings, rules::RuleSettings, runner::ApiCompatRunnerOptions};

/// Configuration of a validation run
///
/// The default compares the public surface, reports every unsuppressed difference and
/// leaves the suppression files untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidationConfig {
    /// Accept every unsuppressed difference into the store and write it to
    /// `suppression_output_file` instead of reporting it
    pub generate_suppression_file: bool,
    /// When writing a suppression file, keep stored suppressions that matched nothing
    pub preserve_unnecessary_suppressions: bool,
    /// After the run, report stored suppressions that matched nothing
    pub report_unnecessary_suppressions: bool,
    /// Suppression files merged into the store before the run
    pub suppression_files: Vec<PathBuf>,
    /// Destination of a generated suppression file; defaults to the first entry of
    /// `suppression_files`
    pub suppression_output_file: Option<PathBuf>,
    /// Diagnostic ids suppressed globally, `;` or `,` separated
    pub no_warn: Option<String>,
    /// Compare the internal surface too
    pub respect_internals: bool,
    /// Enable CP0017
    pub enable_rule_cannot_change_parameter_name: bool,
    /// Also report additions and any visibility or version change
    pub strict_mode: bool,
    /// Compare `lefts[i]` against `rights[i]` instead of every left against every right
    pub create_work_item_per_assembly: bool,
    /// Ask the symbol provider to resolve the references of every input; also turned on
    /// by any input that lists reference paths
    pub resolve_references: bool,
}

impl ValidationConfig {
    /// Creates a configuration that reports additions as well as removals
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            ..Self::default()
        }
    }

    /// Creates a configuration that records every difference into `output`
    ///
    /// Existing suppressions in `output` are loaded first, so regenerating a file keeps the
    /// entries that still match. If nothing is left to write, `output` is left as it was,
    /// stale entries included; [`crate::ValidationOutcome::suppression_file`] is `None` in
    /// that case.
    #[must_use]
    pub fn generate(output: impl Into<PathBuf>) -> Self {
        let output = output.into();
        Self {
            generate_suppression_file: true,
            suppression_files: vec![output.clone()],
            suppression_output_file: Some(output),
            ..Self::default()
        }
    }

    /// Adds a suppression file to read before the run
    #[must_use]
    pub fn with_suppression_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.suppression_files.push(path.into());
        self
    }

    /// Sets the globally suppressed diagnostic ids
    #[must_use]
    pub fn with_no_warn(mut self, no_warn: impl Into<String>) -> Self {
        self.no_warn = Some(no_warn.into());
        self
    }

    /// The file a generated suppression file is written to, if any
    #[must_use]
    pub fn output_file(&self) -> Option<&PathBuf> {
        self.suppression_output_file
            .as_ref()
            .or_else(|| self.suppression_files.first())
    }

    /// Mapper settings for this run
    #[must_use]
    pub fn mapper_settings(&self) -> MapperSettings {
        MapperSettings {
            include_internal_symbols: self.respect_internals,
            ..MapperSettings::default()
        }
    }

    /// Rule settings for this run
    #[must_use]
    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings {
            enable_rule_cannot_change_parameter_name: self.enable_rule_cannot_change_parameter_name,
        }
    }

    /// Work item options for this run
    #[must_use]
    pub fn runner_options(&self) -> ApiCompatRunnerOptions {
        ApiCompatRunnerOptions::new(self.strict_mode, false, self.resolve_references)
    }
}
