use std::cell::OnceCell;

use crate::{
    mapping::{
        index::MapperIndex, ElementMapper, ElementPair, ElementSide, MapperSettings, MemberMapper,
    },
    symbols::{ElementContainer, TypeSymbol},
};

/// Mapper node for one type, with lazily built members and nested types.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    element: ElementMapper<'a, TypeSymbol>,
    settings: MapperSettings,
    members: OnceCell<Vec<MemberMapper<'a>>>,
    nested_types: OnceCell<Vec<TypeMapper<'a>>>,
}

impl<'a> TypeMapper<'a> {
    pub(crate) fn new(right_count: usize, settings: MapperSettings) -> Self {
        Self {
            element: ElementMapper::new(right_count),
            settings,
            members: OnceCell::new(),
            nested_types: OnceCell::new(),
        }
    }

    pub(crate) fn add_element(&mut self, side: ElementSide, container: ElementContainer<'a, TypeSymbol>) {
        self.element.add_element(side, container);
    }

    /// The left and right slots of this type.
    #[must_use]
    pub fn element(&self) -> &ElementMapper<'a, TypeSymbol> {
        &self.element
    }

    /// The left type paired with right `index`.
    #[must_use]
    pub fn pair(&self, index: usize) -> ElementPair<'a, TypeSymbol> {
        self.element.pair(index)
    }

    /// Returns `true` if the members of this type should be compared for right `index`.
    ///
    /// Member differences are only meaningful when the type exists on both sides; a missing
    /// type is reported once at the type level.
    #[must_use]
    pub fn should_diff_members(&self, index: usize) -> bool {
        self.element.left().is_some() && self.element.right(index).is_some()
    }

    /// Member mappers, built on first access.
    pub fn members(&self) -> &[MemberMapper<'a>] {
        self.members.get_or_init(|| self.build_members())
    }

    /// Nested type mappers, built on first access.
    pub fn nested_types(&self) -> &[TypeMapper<'a>] {
        self.nested_types.get_or_init(|| self.build_nested_types())
    }

    fn build_members(&self) -> Vec<MemberMapper<'a>> {
        let right_count = self.element.right_count();
        let comparer = self.settings.comparer;
        let mut index = MapperIndex::new();

        for side in ElementSide::all(right_count) {
            let Some(container) = self.element.slot(side) else {
                continue;
            };

            for member in &container.element.members {
                if !self.settings.is_visible(member.accessibility) {
                    continue;
                }

                index
                    .get_or_insert_with(comparer.member_key(member), || {
                        MemberMapper::new(right_count)
                    })
                    .element_mut()
                    .add_element(side, ElementContainer::new(member, container.metadata));
            }
        }

        index.into_vec()
    }

    fn build_nested_types(&self) -> Vec<TypeMapper<'a>> {
        let right_count = self.element.right_count();
        let comparer = self.settings.comparer;
        let mut index = MapperIndex::new();

        for side in ElementSide::all(right_count) {
            let Some(container) = self.element.slot(side) else {
                continue;
            };

            for nested in &container.element.nested_types {
                if !self.settings.is_visible(nested.accessibility) {
                    continue;
                }

                index
                    .get_or_insert_with(comparer.type_key(nested), || {
                        TypeMapper::new(right_count, self.settings)
                    })
                    .add_element(side, ElementContainer::new(nested, container.metadata));
            }
        }

        index.into_vec()
    }
}
