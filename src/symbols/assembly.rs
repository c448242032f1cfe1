use std::sync::Arc;

use crate::symbols::{AssemblyIdentity, NamespaceSymbol, TypeSymbol};

/// Reference-counted handle to a loaded assembly symbol tree.
pub type AssemblySymbolRc = Arc<AssemblySymbol>;

/// A type forwarded from one assembly to the assembly that now defines it.
///
/// `namespace` is the namespace of the *destination* assembly that contains the forwarded
/// type. Its other types belong to the destination assembly and are never enumerated on
/// behalf of the forwarding assembly.
#[derive(Debug, Clone)]
pub struct TypeForward {
    /// Simple name of the destination assembly.
    pub destination_assembly: String,
    /// Destination namespace containing the forwarded type.
    pub namespace: Arc<NamespaceSymbol>,
    /// Simple name of the forwarded type.
    pub type_name: String,
    /// Generic arity of the forwarded type.
    pub generic_arity: u32,
}

impl TypeForward {
    /// Create a forward to `type_name` inside `namespace` of `destination_assembly`.
    #[must_use]
    pub fn new(
        destination_assembly: impl Into<String>,
        namespace: Arc<NamespaceSymbol>,
        type_name: impl Into<String>,
        generic_arity: u32,
    ) -> Self {
        Self {
            destination_assembly: destination_assembly.into(),
            namespace,
            type_name: type_name.into(),
            generic_arity,
        }
    }

    /// Resolve the forwarded type in its destination namespace.
    ///
    /// # Returns
    ///
    /// `None` if the destination namespace does not declare the type.
    #[must_use]
    pub fn resolve(&self) -> Option<&TypeSymbol> {
        self.namespace.find_type(&self.type_name, self.generic_arity)
    }
}

/// Root of a loaded symbol tree.
#[derive(Debug, Clone)]
pub struct AssemblySymbol {
    /// Binding identity of the assembly.
    pub identity: AssemblyIdentity,
    /// The global namespace; every other namespace is reachable from it.
    pub global_namespace: NamespaceSymbol,
    /// Types this assembly forwards to other assemblies.
    pub type_forwards: Vec<TypeForward>,
}

impl AssemblySymbol {
    /// Create an assembly with an empty global namespace.
    #[must_use]
    pub fn new(identity: AssemblyIdentity) -> Self {
        Self {
            identity,
            global_namespace: NamespaceSymbol::global(),
            type_forwards: Vec::new(),
        }
    }

    /// Adds a namespace below the global namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: NamespaceSymbol) -> Self {
        if namespace.is_global() {
            let NamespaceSymbol {
                types, namespaces, ..
            } = namespace;
            self.global_namespace.types.extend(types);
            self.global_namespace.namespaces.extend(namespaces);
        } else {
            self.global_namespace.namespaces.push(namespace);
        }
        self
    }

    /// Adds a type forward.
    #[must_use]
    pub fn with_type_forward(mut self, forward: TypeForward) -> Self {
        self.type_forwards.push(forward);
        self
    }

    /// Simple name of the assembly.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Total number of namespaces, the global namespace included.
    #[must_use]
    pub fn namespace_count(&self) -> usize {
        fn count(ns: &NamespaceSymbol) -> usize {
            1 + ns.namespaces.iter().map(count).sum::<usize>()
        }
        count(&self.global_namespace)
    }
}
