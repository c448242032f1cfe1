use std::cell::OnceCell;

use crate::{
    mapping::{index::MapperIndex, ElementMapper, ElementPair, ElementSide, MapperSettings, TypeMapper},
    symbols::{ElementContainer, NamespaceSymbol, TypeSymbol},
};

/// Mapper node for one namespace.
///
/// Besides the namespace symbol of each side, a node carries the types that side forwards
/// into this namespace. A side that only reaches the namespace through forwards is marked
/// forwards-only: its slot holds the destination assembly's namespace, whose own types are
/// not part of the forwarding assembly and are never enumerated.
#[derive(Debug)]
pub struct NamespaceMapper<'a> {
    element: ElementMapper<'a, NamespaceSymbol>,
    settings: MapperSettings,
    forwards_only: Vec<bool>,
    forwarded_types: Vec<Vec<&'a TypeSymbol>>,
    types: OnceCell<Vec<TypeMapper<'a>>>,
}

impl<'a> NamespaceMapper<'a> {
    pub(crate) fn new(right_count: usize, settings: MapperSettings) -> Self {
        Self {
            element: ElementMapper::new(right_count),
            settings,
            forwards_only: vec![false; right_count + 1],
            forwarded_types: vec![Vec::new(); right_count + 1],
            types: OnceCell::new(),
        }
    }

    pub(crate) fn add_element(
        &mut self,
        side: ElementSide,
        container: ElementContainer<'a, NamespaceSymbol>,
        forwards_only: bool,
    ) {
        if self.element.slot(side).is_none() {
            self.forwards_only[side.index()] = forwards_only;
        }
        self.element.add_element(side, container);
    }

    pub(crate) fn add_forwarded_types(&mut self, side: ElementSide, types: Vec<&'a TypeSymbol>) {
        self.forwarded_types[side.index()].extend(types);
    }

    /// The left and right slots of this namespace.
    #[must_use]
    pub fn element(&self) -> &ElementMapper<'a, NamespaceSymbol> {
        &self.element
    }

    /// The left namespace paired with right `index`.
    #[must_use]
    pub fn pair(&self, index: usize) -> ElementPair<'a, NamespaceSymbol> {
        self.element.pair(index)
    }

    /// Returns `true` if `side` only contributes forwarded types to this namespace.
    #[must_use]
    pub fn is_forwards_only(&self, side: ElementSide) -> bool {
        self.forwards_only
            .get(side.index())
            .copied()
            .unwrap_or(false)
    }

    /// Types forwarded into this namespace by `side`.
    #[must_use]
    pub fn forwarded_types(&self, side: ElementSide) -> &[&'a TypeSymbol] {
        self.forwarded_types
            .get(side.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Type mappers, built on first access.
    pub fn types(&self) -> &[TypeMapper<'a>] {
        self.types.get_or_init(|| self.build_types())
    }

    fn build_types(&self) -> Vec<TypeMapper<'a>> {
        let right_count = self.element.right_count();
        let comparer = self.settings.comparer;
        let mut index = MapperIndex::new();

        for side in ElementSide::all(right_count) {
            let Some(container) = self.element.slot(side) else {
                continue;
            };

            let declared: &'a [TypeSymbol] = if self.is_forwards_only(side) {
                &[]
            } else {
                &container.element.types
            };

            let forwarded = self.forwarded_types(side).iter().copied();
            for ty in declared.iter().chain(forwarded) {
                if !self.settings.is_visible(ty.accessibility) {
                    continue;
                }

                index
                    .get_or_insert_with(comparer.type_key(ty), || {
                        TypeMapper::new(right_count, self.settings)
                    })
                    .add_element(side, ElementContainer::new(ty, container.metadata));
            }
        }

        index.into_vec()
    }
}
