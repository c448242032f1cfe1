use std::collections::HashMap;

use crate::symbols::SymbolKey;

/// Child mappers of one node, in first-seen order, addressable by symbol key while the level
/// is being built.
pub(crate) struct MapperIndex<M> {
    mappers: Vec<M>,
    positions: HashMap<SymbolKey, usize>,
}

impl<M> MapperIndex<M> {
    pub(crate) fn new() -> Self {
        Self {
            mappers: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// The mapper registered for `key`, created with `create` on first use.
    pub(crate) fn get_or_insert_with(&mut self, key: SymbolKey, create: impl FnOnce() -> M) -> &mut M {
        let next = self.mappers.len();
        let position = *self.positions.entry(key).or_insert(next);
        if position == next {
            self.mappers.push(create());
        }
        &mut self.mappers[position]
    }

    pub(crate) fn into_vec(self) -> Vec<M> {
        self.mappers
    }
}
