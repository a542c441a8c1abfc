use std::collections::HashSet;

use crate::item::ItemId;

/// Items of one drop area that are still animating towards the position a
/// previous reorder gave them.
///
/// While an id is in the set the reorder engine treats it as an impassable
/// boundary.
#[derive(Clone, Debug, Default)]
pub struct InMotionSet {
    ids: HashSet<ItemId>,
}

impl InMotionSet {
    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.ids.iter()
    }

    pub(crate) fn insert(&mut self, id: ItemId) -> bool {
        self.ids.insert(id)
    }

    /// Mark the transition of `id` as finished. Returns `false` if it was not in motion.
    pub(crate) fn settle(&mut self, id: &ItemId) -> bool {
        self.ids.remove(id)
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&ItemId) -> bool) {
        self.ids.retain(|id| keep(id));
    }
}

impl Extend<ItemId> for InMotionSet {
    fn extend<I: IntoIterator<Item = ItemId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}
