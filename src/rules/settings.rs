/// Options that influence which rules run and how they judge a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleSettings {
    /// Report renamed parameters ([`crate::rules::DiagnosticId::CannotChangeParameterName`]).
    pub enable_rule_cannot_change_parameter_name: bool,
}

impl RuleSettings {
    /// Settings with every opt-in rule enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            enable_rule_cannot_change_parameter_name: true,
        }
    }
}

/// Per-run switches passed to every rule invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonOptions {
    /// Also report additions and any visibility or version change.
    pub strict_mode: bool,
    /// The right inputs are a previous version of the left inputs.
    pub is_baseline_comparison: bool,
    /// Internal symbols are part of the compared surface, so friend assemblies count as
    /// consumers.
    pub include_internal_symbols: bool,
}

impl ComparisonOptions {
    /// Options for a strict comparison.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            ..Self::default()
        }
    }
}
