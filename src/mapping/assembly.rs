use std::{
    cell::OnceCell,
    collections::{HashMap, VecDeque},
};

use crate::{
    mapping::{index::MapperIndex, ElementMapper, ElementPair, ElementSide, MapperSettings, NamespaceMapper},
    symbols::{AssemblySymbol, ElementContainer, NamespaceSymbol, SymbolEqualityComparer, SymbolKey, TypeSymbol},
};

/// Root of a mapper tree: one left assembly against every right assembly.
///
/// The namespace level is built on first access to [`AssemblyMapper::namespaces`]; deeper
/// levels are built when their parents are first asked for children. A mapper tree borrows
/// the symbol trees it was built from and is meant for a single comparison pass on a single
/// thread.
///
/// # Examples
///
/// ```rust
/// use apicompat::mapping::{AssemblyMapper, MapperSettings};
/// use apicompat::symbols::*;
///
/// let left = AssemblySymbol::new(AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0)))
///     .with_namespace(NamespaceSymbol::new("Lib").with_type(TypeSymbol::new("", "Widget", TypeKind::Class)));
/// let right = AssemblySymbol::new(AssemblyIdentity::new("Lib", AssemblyVersion::new(2, 0, 0, 0)));
///
/// let left_info = MetadataInformation::new("Lib", "/v1/Lib.dll");
/// let right_info = MetadataInformation::new("Lib", "/v2/Lib.dll");
///
/// let mapper = AssemblyMapper::new(
///     ElementContainer::new(&left, &left_info),
///     &[ElementContainer::new(&right, &right_info)],
///     MapperSettings::default(),
/// );
///
/// let widget = &mapper.namespaces()[0].types()[0];
/// assert!(widget.element().left().is_some());
/// assert!(widget.element().right(0).is_none());
/// ```
#[derive(Debug)]
pub struct AssemblyMapper<'a> {
    element: ElementMapper<'a, AssemblySymbol>,
    settings: MapperSettings,
    namespaces: OnceCell<Vec<NamespaceMapper<'a>>>,
}

impl<'a> AssemblyMapper<'a> {
    /// Create the root node for `left` against `rights`.
    ///
    /// # Arguments
    ///
    /// * `left` - The left assembly
    /// * `rights` - The right assemblies; their order defines the right indices
    /// * `settings` - Alignment and visibility settings for the whole tree
    #[must_use]
    pub fn new(
        left: ElementContainer<'a, AssemblySymbol>,
        rights: &[ElementContainer<'a, AssemblySymbol>],
        settings: MapperSettings,
    ) -> Self {
        let mut element = ElementMapper::new(rights.len());
        element.add_element(ElementSide::Left, left);
        for (index, right) in rights.iter().enumerate() {
            element.add_element(ElementSide::Right(index), *right);
        }

        Self {
            element,
            settings,
            namespaces: OnceCell::new(),
        }
    }

    /// The left and right assemblies.
    #[must_use]
    pub fn element(&self) -> &ElementMapper<'a, AssemblySymbol> {
        &self.element
    }

    /// The left assembly paired with right `index`.
    #[must_use]
    pub fn pair(&self, index: usize) -> ElementPair<'a, AssemblySymbol> {
        self.element.pair(index)
    }

    /// Number of right assemblies.
    #[must_use]
    pub fn right_count(&self) -> usize {
        self.element.right_count()
    }

    /// The settings this tree was built with.
    #[must_use]
    pub fn settings(&self) -> &MapperSettings {
        &self.settings
    }

    /// Namespace mappers, built on first access.
    pub fn namespaces(&self) -> &[NamespaceMapper<'a>] {
        self.namespaces.get_or_init(|| self.build_namespaces())
    }

    fn build_namespaces(&self) -> Vec<NamespaceMapper<'a>> {
        let right_count = self.element.right_count();
        let comparer = self.settings.comparer;
        let mut index = MapperIndex::new();

        for side in ElementSide::all(right_count) {
            let Some(container) = self.element.slot(side) else {
                continue;
            };
            let assembly = container.element;
            let mut forwards = PendingForwards::resolve(assembly, &comparer);

            let mut queue = VecDeque::from([&assembly.global_namespace]);
            while let Some(namespace) = queue.pop_front() {
                queue.extend(namespace.namespaces.iter());

                let key = comparer.namespace_key(namespace);
                let forwarded = forwards.take(&key);
                if namespace.types.is_empty() && forwarded.is_empty() {
                    continue;
                }

                let mapper = index.get_or_insert_with(key, || {
                    NamespaceMapper::new(right_count, self.settings)
                });
                mapper.add_element(side, ElementContainer::new(namespace, container.metadata), false);
                mapper.add_forwarded_types(side, forwarded);
            }

            for (key, destination, forwarded) in forwards.into_remaining() {
                let mapper = index.get_or_insert_with(key, || {
                    NamespaceMapper::new(right_count, self.settings)
                });
                mapper.add_element(side, ElementContainer::new(destination, container.metadata), true);
                mapper.add_forwarded_types(side, forwarded);
            }
        }

        index.into_vec()
    }
}

struct ForwardGroup<'a> {
    key: SymbolKey,
    destination: &'a NamespaceSymbol,
    types: Vec<&'a TypeSymbol>,
    claimed: bool,
}

/// Forwarded types of one assembly, grouped by destination namespace, waiting to be claimed
/// by a physical namespace of the same name.
struct PendingForwards<'a> {
    groups: Vec<ForwardGroup<'a>>,
    positions: HashMap<SymbolKey, usize>,
}

impl<'a> PendingForwards<'a> {
    fn resolve(assembly: &'a AssemblySymbol, comparer: &SymbolEqualityComparer) -> Self {
        let mut pending = Self {
            groups: Vec::new(),
            positions: HashMap::new(),
        };

        for forward in &assembly.type_forwards {
            let Some(ty) = forward.resolve() else {
                log::debug!(
                    "{}: forwarded type {}.{} not found in {}",
                    assembly.name(),
                    forward.namespace.name,
                    forward.type_name,
                    forward.destination_assembly
                );
                continue;
            };

            let key = comparer.namespace_key(&forward.namespace);
            let next = pending.groups.len();
            let position = *pending.positions.entry(key.clone()).or_insert(next);
            if position == next {
                pending.groups.push(ForwardGroup {
                    key,
                    destination: forward.namespace.as_ref(),
                    types: Vec::new(),
                    claimed: false,
                });
            }
            pending.groups[position].types.push(ty);
        }

        pending
    }

    fn take(&mut self, key: &SymbolKey) -> Vec<&'a TypeSymbol> {
        match self.positions.get(key) {
            Some(&position) => {
                let group = &mut self.groups[position];
                group.claimed = true;
                std::mem::take(&mut group.types)
            }
            None => Vec::new(),
        }
    }

    fn into_remaining(self) -> impl Iterator<Item = (SymbolKey, &'a NamespaceSymbol, Vec<&'a TypeSymbol>)> {
        self.groups
            .into_iter()
            .filter(|group| !group.claimed)
            .map(|group| (group.key, group.destination, group.types))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        symbols::{Accessibility, MemberSymbol, MetadataInformation, TypeForward, TypeKind},
        test::{assembly, class, metadata},
    };
    use std::sync::Arc;

    #[test]
    fn test_right_slots_have_fixed_length() {
        let left = assembly("Lib", "1.0").with_namespace(
            NamespaceSymbol::new("Lib")
                .with_type(class("Widget").with_member(MemberSymbol::method("Foo"))),
        );
        let right_a = assembly("Lib", "2.0").with_namespace(
            NamespaceSymbol::new("Lib").with_type(class("Widget")),
        );
        let right_b = assembly("Lib", "3.0")
            .with_namespace(NamespaceSymbol::new("Lib.Extra").with_type(class("Gadget")));
        let infos = [metadata("v1"), metadata("v2"), metadata("v3")];

        let mapper = AssemblyMapper::new(
            ElementContainer::new(&left, &infos[0]),
            &[
                ElementContainer::new(&right_a, &infos[1]),
                ElementContainer::new(&right_b, &infos[2]),
            ],
            MapperSettings::default(),
        );

        assert_eq!(mapper.right_count(), 2);
        let namespaces = mapper.namespaces();
        assert_eq!(namespaces.len(), 2);

        for namespace in namespaces {
            assert_eq!(namespace.element().right_count(), 2);
            for ty in namespace.types() {
                assert_eq!(ty.element().right_count(), 2);
                for member in ty.members() {
                    assert_eq!(member.element().right_count(), 2);
                }
            }
        }

        let widget = &namespaces[0].types()[0];
        assert!(widget.should_diff_members(0));
        assert!(!widget.should_diff_members(1));
        let foo = &widget.members()[0];
        assert!(foo.element().left().is_some());
        assert!(foo.element().right(0).is_none());

        let extra = &namespaces[1];
        assert!(extra.element().left().is_none());
        assert!(extra.element().right(1).is_some());
    }

    #[test]
    fn test_children_are_built_once() {
        let left = assembly("Lib", "1.0")
            .with_namespace(NamespaceSymbol::new("Lib").with_type(class("Widget")));
        let info = metadata("v1");

        let mapper = AssemblyMapper::new(
            ElementContainer::new(&left, &info),
            &[ElementContainer::new(&left, &info)],
            MapperSettings::default(),
        );

        let first = mapper.namespaces().as_ptr();
        let second = mapper.namespaces().as_ptr();
        assert!(std::ptr::eq(first, second));

        let types_first = mapper.namespaces()[0].types().as_ptr();
        assert!(std::ptr::eq(types_first, mapper.namespaces()[0].types().as_ptr()));
    }

    #[test]
    fn test_forwards_into_physical_namespace() {
        let destination = Arc::new(
            NamespaceSymbol::new("Lib")
                .with_type(class("Moved"))
                .with_type(class("NotMine")),
        );

        let left = assembly("Lib", "1.0").with_namespace(
            NamespaceSymbol::new("Lib")
                .with_type(class("Widget"))
                .with_type(class("Moved")),
        );
        let right = assembly("Lib", "2.0")
            .with_namespace(NamespaceSymbol::new("Lib").with_type(class("Widget")))
            .with_type_forward(TypeForward::new("Lib.Core", destination, "Moved", 0));
        let infos = [metadata("v1"), metadata("v2")];

        let mapper = AssemblyMapper::new(
            ElementContainer::new(&left, &infos[0]),
            &[ElementContainer::new(&right, &infos[1])],
            MapperSettings::default(),
        );

        let namespaces = mapper.namespaces();
        assert_eq!(namespaces.len(), 1);
        assert!(!namespaces[0].is_forwards_only(ElementSide::Right(0)));

        let names: Vec<String> = namespaces[0]
            .types()
            .iter()
            .map(|t| t.element().left().or(t.element().right(0)).map(TypeSymbol::doc_id).unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["T:Lib.Widget", "T:Lib.Moved"]);
        assert!(namespaces[0].types().iter().all(|t| t.element().right(0).is_some()));
    }

    #[test]
    fn test_forwards_only_namespace_hides_foreign_types() {
        let destination = Arc::new(
            NamespaceSymbol::new("Lib.Moved")
                .with_type(class("Forwarded"))
                .with_type(class("Foreign")),
        );

        let left = assembly("Lib", "1.0")
            .with_namespace(NamespaceSymbol::new("Lib.Moved").with_type(class("Forwarded")));
        let right = assembly("Lib", "2.0")
            .with_type_forward(TypeForward::new("Lib.Core", destination, "Forwarded", 0));
        let infos = [metadata("v1"), metadata("v2")];

        let mapper = AssemblyMapper::new(
            ElementContainer::new(&left, &infos[0]),
            &[ElementContainer::new(&right, &infos[1])],
            MapperSettings::default(),
        );

        let namespace = &mapper.namespaces()[0];
        assert!(namespace.is_forwards_only(ElementSide::Right(0)));
        assert!(!namespace.is_forwards_only(ElementSide::Left));
        assert_eq!(namespace.forwarded_types(ElementSide::Right(0)).len(), 1);

        let types = namespace.types();
        assert_eq!(types.len(), 1);
        assert!(types[0].element().left().is_some());
        assert!(types[0].element().right(0).is_some());
    }

    #[test]
    fn test_unresolved_forward_is_skipped() {
        let destination = Arc::new(NamespaceSymbol::new("Lib.Gone"));
        let right = assembly("Lib", "2.0")
            .with_type_forward(TypeForward::new("Lib.Core", destination, "Missing", 0));
        let left = assembly("Lib", "1.0");
        let infos = [metadata("v1"), metadata("v2")];

        let mapper = AssemblyMapper::new(
            ElementContainer::new(&left, &infos[0]),
            &[ElementContainer::new(&right, &infos[1])],
            MapperSettings::default(),
        );
        assert!(mapper.namespaces().is_empty());
    }

    #[test]
    fn test_internal_symbols_filtered() {
        let left = assembly("Lib", "1.0").with_namespace(
            NamespaceSymbol::new("Lib")
                .with_type(class("Widget"))
                .with_type(class("Hidden").with_accessibility(Accessibility::Internal)),
        );
        let info = MetadataInformation::new("Lib", "/v1/Lib.dll");

        let public_only = AssemblyMapper::new(
            ElementContainer::new(&left, &info),
            &[],
            MapperSettings::default(),
        );
        assert_eq!(public_only.namespaces()[0].types().len(), 1);

        let with_internals = AssemblyMapper::new(
            ElementContainer::new(&left, &info),
            &[],
            MapperSettings::with_internals(),
        );
        assert_eq!(with_internals.namespaces()[0].types().len(), 2);
    }

    #[test]
    fn test_case_insensitive_alignment() {
        let left = assembly("Lib", "1.0")
            .with_namespace(NamespaceSymbol::new("Lib").with_type(class("Widget")));
        let right = assembly("Lib", "2.0")
            .with_namespace(NamespaceSymbol::new("lib").with_type(class("WIDGET")));
        let infos = [metadata("v1"), metadata("v2")];
        let rights = [ElementContainer::new(&right, &infos[1])];

        let ordinal = AssemblyMapper::new(
            ElementContainer::new(&left, &infos[0]),
            &rights,
            MapperSettings::default(),
        );
        assert_eq!(ordinal.namespaces().len(), 2);

        let relaxed = AssemblyMapper::new(
            ElementContainer::new(&left, &infos[0]),
            &rights,
            MapperSettings::case_insensitive(),
        );
        assert_eq!(relaxed.namespaces().len(), 1);
        let types = relaxed.namespaces()[0].types();
        assert_eq!(types.len(), 1);
        assert!(types[0].pair(0).both().is_some());
    }

    #[test]
    fn test_nested_types_follow_parent() {
        let outer = TypeSymbol::new("", "Outer", TypeKind::Class)
            .with_nested_type(TypeSymbol::new("", "Inner", TypeKind::Class));
        let left = assembly("Lib", "1.0").with_namespace(NamespaceSymbol::new("Lib").with_type(outer));
        let right = assembly("Lib", "2.0").with_namespace(
            NamespaceSymbol::new("Lib").with_type(TypeSymbol::new("", "Outer", TypeKind::Class)),
        );
        let infos = [metadata("v1"), metadata("v2")];

        let mapper = AssemblyMapper::new(
            ElementContainer::new(&left, &infos[0]),
            &[ElementContainer::new(&right, &infos[1])],
            MapperSettings::default(),
        );

        let nested = mapper.namespaces()[0].types()[0].nested_types();
        assert_eq!(nested.len(), 1);
        assert_eq!(
            nested[0].element().left().map(TypeSymbol::doc_id).as_deref(),
            Some("T:Lib.Outer.Inner")
        );
        assert!(nested[0].element().right(0).is_none());
    }
}
