use bitflags::bitflags;
use strum::{AsRefStr, Display, EnumIter};

use crate::symbols::{Accessibility, MemberSymbol};

/// The kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum TypeKind {
    /// Reference type.
    Class,
    /// Value type.
    Struct,
    /// Interface.
    Interface,
    /// Enumeration.
    Enum,
    /// Delegate.
    Delegate,
}

bitflags! {
    /// Modifiers of a type definition that matter for compatibility.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u16 {
        /// `abstract`
        const ABSTRACT = 0x0001;
        /// `sealed`
        const SEALED = 0x0002;
        /// `static` class (abstract and sealed in metadata)
        const STATIC = 0x0004;
        /// `readonly` struct
        const READONLY = 0x0008;
        /// `ref` struct
        const BYREF_LIKE = 0x0010;
    }
}

/// A type definition together with its members and nested types.
///
/// `base_types` lists the full inheritance chain, nearest base first, and `interfaces` lists
/// every implemented interface including inherited ones. Symbol providers flatten both so
/// that comparisons do not need to resolve other assemblies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    /// Namespace of the outermost declaring type; empty for the global namespace.
    pub namespace: String,
    /// Simple name without generic arity suffix.
    pub name: String,
    /// Full name of the declaring type for nested types.
    pub containing_type: Option<String>,
    /// Number of generic type parameters declared on this type.
    pub generic_arity: u32,
    /// Type kind.
    pub kind: TypeKind,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Modifier flags.
    pub flags: TypeFlags,
    /// Base type chain, nearest first, without `System.Object`.
    pub base_types: Vec<String>,
    /// All implemented interfaces.
    pub interfaces: Vec<String>,
    /// Declared members.
    pub members: Vec<MemberSymbol>,
    /// Nested type definitions.
    pub nested_types: Vec<TypeSymbol>,
}

impl TypeSymbol {
    /// Create a public, non-generic type without members.
    ///
    /// # Arguments
    ///
    /// * `namespace` - Containing namespace, empty for the global namespace
    /// * `name` - Simple type name
    /// * `kind` - Kind of the type
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            containing_type: None,
            generic_arity: 0,
            kind,
            accessibility: Accessibility::Public,
            flags: TypeFlags::empty(),
            base_types: Vec::new(),
            interfaces: Vec::new(),
            members: Vec::new(),
            nested_types: Vec::new(),
        }
    }

    /// Sets the accessibility.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Adds modifier flags.
    #[must_use]
    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Sets the generic arity.
    #[must_use]
    pub fn with_generic_arity(mut self, arity: u32) -> Self {
        self.generic_arity = arity;
        self
    }

    /// Appends a base type to the inheritance chain.
    #[must_use]
    pub fn with_base_type(mut self, base: impl Into<String>) -> Self {
        self.base_types.push(base.into());
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds a member.
    #[must_use]
    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    /// Adds a nested type, re-rooting it (and its own nested types) under this type.
    #[must_use]
    pub fn with_nested_type(mut self, mut nested: TypeSymbol) -> Self {
        nested.reparent(&self.namespace, Some(self.full_name()));
        self.nested_types.push(nested);
        self
    }

    pub(crate) fn reparent(&mut self, namespace: &str, containing_type: Option<String>) {
        self.namespace = namespace.to_string();
        self.containing_type = containing_type;

        let full_name = self.full_name();
        for nested in &mut self.nested_types {
            nested.reparent(namespace, Some(full_name.clone()));
        }
    }

    /// The simple name with the generic arity suffix (e.g. ``List`1``).
    #[must_use]
    pub fn metadata_name(&self) -> String {
        if self.generic_arity > 0 {
            format!("{}`{}", self.name, self.generic_arity)
        } else {
            self.name.clone()
        }
    }

    /// The fully qualified name used in documentation ids.
    ///
    /// Nested types are separated from their declaring type with a dot.
    #[must_use]
    pub fn full_name(&self) -> String {
        match (&self.containing_type, self.namespace.is_empty()) {
            (Some(containing), _) => format!("{}.{}", containing, self.metadata_name()),
            (None, true) => self.metadata_name(),
            (None, false) => format!("{}.{}", self.namespace, self.metadata_name()),
        }
    }

    /// The documentation-comment id, e.g. `T:System.Collections.Generic.List`1`.
    #[must_use]
    pub fn doc_id(&self) -> String {
        format!("T:{}", self.full_name())
    }

    /// Returns `true` for interfaces.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Returns `true` if no type outside the assembly can derive from this type.
    ///
    /// Value types, enums and delegates are implicitly sealed; static classes are sealed in
    /// metadata.
    #[must_use]
    pub fn is_effectively_sealed(&self) -> bool {
        match self.kind {
            TypeKind::Struct | TypeKind::Enum | TypeKind::Delegate => true,
            TypeKind::Interface => false,
            TypeKind::Class => self.flags.intersects(TypeFlags::SEALED | TypeFlags::STATIC),
        }
    }

    /// Find a member by its signature.
    #[must_use]
    pub fn find_member(&self, signature: &str) -> Option<&MemberSymbol> {
        self.members.iter().find(|m| m.signature() == signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_and_doc_id() {
        let ty = TypeSymbol::new("System.Collections.Generic", "List", TypeKind::Class)
            .with_generic_arity(1);

        assert_eq!(ty.metadata_name(), "List`1");
        assert_eq!(ty.doc_id(), "T:System.Collections.Generic.List`1");

        let global = TypeSymbol::new("", "Program", TypeKind::Class);
        assert_eq!(global.doc_id(), "T:Program");
    }

    #[test]
    fn test_nested_types_are_reparented() {
        let inner = TypeSymbol::new("Ignored", "Inner", TypeKind::Struct)
            .with_nested_type(TypeSymbol::new("", "Deepest", TypeKind::Enum));
        let outer = TypeSymbol::new("Lib", "Outer", TypeKind::Class)
            .with_generic_arity(1)
            .with_nested_type(inner);

        let inner = &outer.nested_types[0];
        assert_eq!(inner.namespace, "Lib");
        assert_eq!(inner.doc_id(), "T:Lib.Outer`1.Inner");
        assert_eq!(inner.nested_types[0].doc_id(), "T:Lib.Outer`1.Inner.Deepest");
    }

    #[test]
    fn test_effectively_sealed() {
        assert!(TypeSymbol::new("A", "S", TypeKind::Struct).is_effectively_sealed());
        assert!(!TypeSymbol::new("A", "C", TypeKind::Class).is_effectively_sealed());
        assert!(TypeSymbol::new("A", "C", TypeKind::Class)
            .with_flags(TypeFlags::STATIC)
            .is_effectively_sealed());
        assert!(!TypeSymbol::new("A", "I", TypeKind::Interface).is_effectively_sealed());
    }

    #[test]
    fn test_find_member() {
        let ty = TypeSymbol::new("A", "C", TypeKind::Class)
            .with_member(MemberSymbol::method("Foo").with_parameter("x", "System.Int32"));
        assert!(ty.find_member("Foo(System.Int32)").is_some());
        assert!(ty.find_member("Foo").is_none());
    }
}
