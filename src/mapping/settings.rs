use crate::symbols::{Accessibility, SymbolEqualityComparer};

/// Controls how symbols are aligned and which symbols take part in a comparison.
///
/// # Examples
///
/// ```rust
/// use apicompat::mapping::MapperSettings;
/// use apicompat::symbols::Accessibility;
///
/// let settings = MapperSettings::default();
/// assert!(!settings.is_visible(Accessibility::Internal));
///
/// let settings = MapperSettings::with_internals();
/// assert!(settings.is_visible(Accessibility::Internal));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapperSettings {
    /// Computes the identity used to align left and right symbols.
    pub comparer: SymbolEqualityComparer,
    /// Include `internal` and `private protected` symbols, for assemblies consumed through
    /// `InternalsVisibleTo`.
    pub include_internal_symbols: bool,
}

impl MapperSettings {
    /// Public surface only, ordinal name matching.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Public and internal surface, ordinal name matching.
    #[must_use]
    pub fn with_internals() -> Self {
        Self {
            include_internal_symbols: true,
            ..Self::default()
        }
    }

    /// Public surface only, case-insensitive name matching.
    #[must_use]
    pub fn case_insensitive() -> Self {
        Self {
            comparer: SymbolEqualityComparer::case_insensitive(),
            ..Self::default()
        }
    }

    /// Returns `true` if a symbol with `accessibility` is part of the compared surface.
    #[must_use]
    pub fn is_visible(&self, accessibility: Accessibility) -> bool {
        if self.include_internal_symbols {
            accessibility.is_internally_visible()
        } else {
            accessibility.is_externally_visible()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let default = MapperSettings::new();
        assert!(default.is_visible(Accessibility::Protected));
        assert!(!default.is_visible(Accessibility::PrivateProtected));
        assert!(!default.comparer.ignores_case());

        let internals = MapperSettings::with_internals();
        assert!(internals.is_visible(Accessibility::PrivateProtected));
        assert!(!internals.is_visible(Accessibility::Private));

        assert!(MapperSettings::case_insensitive().comparer.ignores_case());
    }
}
