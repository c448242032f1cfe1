//! One-call comparison of a left assembly against any number of right assemblies.

use crate::{
    mapping::{AssemblyMapper, MapperSettings},
    rules::{CompatDifference, ComparisonOptions, RuleRunner, RuleSettings},
    symbols::{AssemblySymbol, ElementContainer},
};

/// Builds a mapper tree for a comparison and runs the configured rules over it.
///
/// # Examples
///
/// ```rust
/// use apicompat::comparer::ApiComparer;
/// use apicompat::rules::{ComparisonOptions, DiagnosticId};
/// use apicompat::symbols::*;
///
/// let left = AssemblySymbol::new(AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0)))
///     .with_namespace(NamespaceSymbol::new("Lib").with_type(TypeSymbol::new("", "Widget", TypeKind::Class)));
/// let right = AssemblySymbol::new(AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0)));
/// let (left_info, right_info) = (
///     MetadataInformation::new("Lib", "/v1/Lib.dll"),
///     MetadataInformation::new("Lib", "/v2/Lib.dll"),
/// );
///
/// let comparer = ApiComparer::default();
/// let differences = comparer.get_differences(
///     ElementContainer::new(&left, &left_info),
///     &[ElementContainer::new(&right, &right_info)],
///     ComparisonOptions::default(),
/// );
///
/// assert_eq!(differences[0][0].diagnostic_id, DiagnosticId::TypeMustExist);
/// ```
#[derive(Debug)]
pub struct ApiComparer {
    mapper_settings: MapperSettings,
    rule_runner: RuleRunner,
}

impl ApiComparer {
    /// Create a comparer.
    ///
    /// # Arguments
    ///
    /// * `mapper_settings` - Alignment and visibility settings
    /// * `rule_settings` - Which rules to run
    #[must_use]
    pub fn new(mapper_settings: MapperSettings, rule_settings: &RuleSettings) -> Self {
        Self::with_rule_runner(mapper_settings, RuleRunner::new(rule_settings))
    }

    /// Create a comparer around an existing rule runner.
    #[must_use]
    pub fn with_rule_runner(mapper_settings: MapperSettings, rule_runner: RuleRunner) -> Self {
        Self {
            mapper_settings,
            rule_runner,
        }
    }

    /// The mapper settings used for every comparison.
    #[must_use]
    pub fn mapper_settings(&self) -> &MapperSettings {
        &self.mapper_settings
    }

    /// The rule runner used for every comparison.
    #[must_use]
    pub fn rule_runner(&self) -> &RuleRunner {
        &self.rule_runner
    }

    /// Compare `left` against every entry of `rights`.
    ///
    /// # Returns
    ///
    /// One list of differences per right input, in the order of `rights`.
    #[must_use]
    pub fn get_differences(
        &self,
        left: ElementContainer<'_, AssemblySymbol>,
        rights: &[ElementContainer<'_, AssemblySymbol>],
        options: ComparisonOptions,
    ) -> Vec<Vec<CompatDifference>> {
        let options = ComparisonOptions {
            include_internal_symbols: options.include_internal_symbols
                || self.mapper_settings.include_internal_symbols,
            ..options
        };
        let mapper = AssemblyMapper::new(left, rights, self.mapper_settings);
        self.rule_runner.run(&mapper, options)
    }

    /// Compare a single pair.
    #[must_use]
    pub fn compare(
        &self,
        left: ElementContainer<'_, AssemblySymbol>,
        right: ElementContainer<'_, AssemblySymbol>,
        options: ComparisonOptions,
    ) -> Vec<CompatDifference> {
        self.get_differences(left, &[right], options)
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

impl Default for ApiComparer {
    fn default() -> Self {
        Self::new(MapperSettings::default(), &RuleSettings::default())
    }
}
