use crate::{
    mapping::{ElementMapper, ElementPair},
    symbols::MemberSymbol,
};

/// Mapper node for one member signature of a mapped type.
///
/// Members are leaves of the tree.
#[derive(Debug)]
pub struct MemberMapper<'a> {
    element: ElementMapper<'a, MemberSymbol>,
}

impl<'a> MemberMapper<'a> {
    pub(crate) fn new(right_count: usize) -> Self {
        Self {
            element: ElementMapper::new(right_count),
        }
    }

    pub(crate) fn element_mut(&mut self) -> &mut ElementMapper<'a, MemberSymbol> {
        &mut self.element
    }

    /// The left and right slots of this member.
    #[must_use]
    pub fn element(&self) -> &ElementMapper<'a, MemberSymbol> {
        &self.element
    }

    /// The left member paired with right `index`.
    #[must_use]
    pub fn pair(&self, index: usize) -> ElementPair<'a, MemberSymbol> {
        self.element.pair(index)
    }
}
