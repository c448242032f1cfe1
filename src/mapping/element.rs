use crate::symbols::ElementContainer;

/// A position within a mapper node: the left input or one of the right inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementSide {
    /// The left (baseline) input.
    Left,
    /// The right input with the given index.
    Right(usize),
}

impl ElementSide {
    /// Every side of a run with `right_count` rights, left first.
    pub fn all(right_count: usize) -> impl Iterator<Item = ElementSide> {
        std::iter::once(ElementSide::Left).chain((0..right_count).map(ElementSide::Right))
    }

    /// Dense index of this side: `0` for the left, `i + 1` for right `i`.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            ElementSide::Left => 0,
            ElementSide::Right(index) => index + 1,
        }
    }
}

/// The left and one right element of a mapper node.
#[derive(Debug)]
pub struct ElementPair<'a, T> {
    /// Element on the left, if present.
    pub left: Option<&'a T>,
    /// Element on the selected right, if present.
    pub right: Option<&'a T>,
}

impl<'a, T> ElementPair<'a, T> {
    /// Create a pair.
    #[must_use]
    pub fn new(left: Option<&'a T>, right: Option<&'a T>) -> Self {
        Self { left, right }
    }

    /// Both elements, if both sides are present.
    #[must_use]
    pub fn both(&self) -> Option<(&'a T, &'a T)> {
        self.left.zip(self.right)
    }
}

impl<T> Clone for ElementPair<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ElementPair<'_, T> {}

/// One left slot and a fixed number of right slots for a single symbol position.
///
/// The number of right slots is fixed at construction and equals the number of right inputs
/// of the whole comparison, so index `i` always refers to the same right input at every level
/// of the tree.
#[derive(Debug)]
pub struct ElementMapper<'a, T> {
    left: Option<ElementContainer<'a, T>>,
    rights: Vec<Option<ElementContainer<'a, T>>>,
}

impl<'a, T> ElementMapper<'a, T> {
    /// Create an empty node with `right_count` right slots.
    #[must_use]
    pub fn new(right_count: usize) -> Self {
        Self {
            left: None,
            rights: (0..right_count).map(|_| None).collect(),
        }
    }

    /// Place `container` into the slot for `side`.
    ///
    /// The first element placed into a slot wins; later elements for the same slot (for
    /// example two symbols that collide under a case-insensitive comparer) are ignored.
    pub fn add_element(&mut self, side: ElementSide, container: ElementContainer<'a, T>) {
        let slot = match side {
            ElementSide::Left => Some(&mut self.left),
            ElementSide::Right(index) => self.rights.get_mut(index),
        };

        debug_assert!(slot.is_some(), "right index out of range");
        if let Some(slot) = slot {
            if slot.is_none() {
                *slot = Some(container);
            }
        }
    }

    /// The container in the slot for `side`.
    #[must_use]
    pub fn slot(&self, side: ElementSide) -> Option<ElementContainer<'a, T>> {
        match side {
            ElementSide::Left => self.left,
            ElementSide::Right(index) => self.rights.get(index).copied().flatten(),
        }
    }

    /// The left element.
    #[must_use]
    pub fn left(&self) -> Option<&'a T> {
        self.left.map(|c| c.element)
    }

    /// The element of right `index`.
    #[must_use]
    pub fn right(&self, index: usize) -> Option<&'a T> {
        self.slot(ElementSide::Right(index)).map(|c| c.element)
    }

    /// All right slots.
    #[must_use]
    pub fn rights(&self) -> &[Option<ElementContainer<'a, T>>] {
        &self.rights
    }

    /// Number of right slots.
    #[must_use]
    pub fn right_count(&self) -> usize {
        self.rights.len()
    }

    /// The left element paired with right `index`.
    #[must_use]
    pub fn pair(&self, index: usize) -> ElementPair<'a, T> {
        ElementPair::new(self.left(), self.right(index))
    }

    /// Returns `true` if at least one slot is filled.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.left.is_some() || self.rights.iter().any(Option::is_some)
    }
}
