use crate::symbols::TypeSymbol;

/// A namespace with its directly declared types and child namespaces.
///
/// `name` is always the fully qualified namespace name; the global namespace has an empty
/// name. Child namespaces do not need to extend their parent's name, the tree only defines
/// traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamespaceSymbol {
    /// Fully qualified namespace name.
    pub name: String,
    /// Types declared directly in this namespace.
    pub types: Vec<TypeSymbol>,
    /// Child namespaces.
    pub namespaces: Vec<NamespaceSymbol>,
}

impl NamespaceSymbol {
    /// Create an empty namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    /// Create the empty global namespace.
    #[must_use]
    pub fn global() -> Self {
        Self::default()
    }

    /// Returns `true` for the global namespace.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.name.is_empty()
    }

    /// Adds a type, moving it (and its nested types) into this namespace.
    #[must_use]
    pub fn with_type(mut self, mut ty: TypeSymbol) -> Self {
        ty.reparent(&self.name, None);
        self.types.push(ty);
        self
    }

    /// Adds a child namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: NamespaceSymbol) -> Self {
        self.namespaces.push(namespace);
        self
    }

    /// Find a directly declared type by simple name and generic arity.
    #[must_use]
    pub fn find_type(&self, name: &str, generic_arity: u32) -> Option<&TypeSymbol> {
        self.types
            .iter()
            .find(|t| t.name == name && t.generic_arity == generic_arity)
    }
}
