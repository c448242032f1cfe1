use crate::rules::ComparisonOptions;

/// Options of a single work item.
///
/// Work items with different options are never merged, even if their left inputs match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ApiCompatRunnerOptions {
    /// Also report additions and any visibility or version change.
    pub strict_mode: bool,
    /// The right inputs are a previously shipped baseline.
    pub is_baseline_comparison: bool,
    /// Ask the symbol provider to resolve references of each input.
    pub resolve_references: bool,
}

impl ApiCompatRunnerOptions {
    /// Create options from the three switches.
    #[must_use]
    pub fn new(strict_mode: bool, is_baseline_comparison: bool, resolve_references: bool) -> Self {
        Self {
            strict_mode,
            is_baseline_comparison,
            resolve_references,
        }
    }

    /// Options for comparing against a shipped baseline.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            is_baseline_comparison: true,
            ..Self::default()
        }
    }

    /// Returns `true` if references are resolved when loading this item's inputs.
    ///
    /// Baseline inputs are never resolved against references.
    #[must_use]
    pub fn should_resolve_references(&self) -> bool {
        self.resolve_references && !self.is_baseline_comparison
    }

    /// The switches handed to the rules.
    #[must_use]
    pub fn comparison_options(&self) -> ComparisonOptions {
        ComparisonOptions {
            strict_mode: self.strict_mode,
            is_baseline_comparison: self.is_baseline_comparison,
            include_internal_symbols: false,
        }
    }
}
