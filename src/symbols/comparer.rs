use crate::symbols::{MemberSymbol, NamespaceSymbol, TypeSymbol};

/// Identity of a symbol within its parent, as computed by a [`SymbolEqualityComparer`].
///
/// Two symbols from different sides occupy the same mapper position exactly when their keys
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey(String);

impl SymbolKey {
    /// The normalized key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Decides which left and right symbols are "the same" symbol.
///
/// Namespaces match by full name, types by metadata name (arity included) and members by
/// their documentation-id signature, so overloads stay distinct. Matching is ordinal by
/// default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolEqualityComparer {
    ignore_case: bool,
}

impl SymbolEqualityComparer {
    /// An ordinal, case-sensitive comparer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A comparer that ignores ASCII case.
    #[must_use]
    pub fn case_insensitive() -> Self {
        Self { ignore_case: true }
    }

    /// Returns `true` if this comparer ignores case.
    #[must_use]
    pub fn ignores_case(&self) -> bool {
        self.ignore_case
    }

    /// Normalize arbitrary identity text into a key.
    #[must_use]
    pub fn key(&self, text: &str) -> SymbolKey {
        if self.ignore_case {
            SymbolKey(text.to_ascii_lowercase())
        } else {
            SymbolKey(text.to_string())
        }
    }

    /// Key of a namespace.
    #[must_use]
    pub fn namespace_key(&self, namespace: &NamespaceSymbol) -> SymbolKey {
        self.key(&namespace.name)
    }

    /// Key of a type within its namespace or declaring type.
    #[must_use]
    pub fn type_key(&self, ty: &TypeSymbol) -> SymbolKey {
        self.key(&ty.metadata_name())
    }

    /// Key of a member within its type.
    #[must_use]
    pub fn member_key(&self, member: &MemberSymbol) -> SymbolKey {
        self.key(&format!("{}{}", member.kind.doc_id_prefix(), member.signature()))
    }

    /// Compare two identity strings under this comparer.
    #[must_use]
    pub fn equals(&self, left: &str, right: &str) -> bool {
        if self.ignore_case {
            left.eq_ignore_ascii_case(right)
        } else {
            left == right
        }
    }
}
