//! Backpacks: items that are also holders.

use super::{ItemHandle, ItemId};

/// Backpack-specific data.
///
/// `contents` is kept sorted ascending by effective weight (stable, so ties
/// keep insertion order). The world re-sorts after every committed change
/// that can move a weight, which keeps the lightest and heaviest item O(1).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Backpack {
    capacity: u64,
    contents: Vec<ItemHandle>,
}

impl Backpack {
    pub(crate) fn new(capacity: u64) -> Self {
        Self {
            capacity,
            contents: Vec::new(),
        }
    }

    /// Maximum total effective weight of the contents.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Contents, lightest first.
    pub fn contents(&self) -> &[ItemHandle] {
        &self.contents
    }

    pub fn contains(&self, item: ItemHandle) -> bool {
        self.contents.contains(&item)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn lowest_weight_item(&self) -> Option<ItemHandle> {
        self.contents.first().copied()
    }

    pub fn highest_weight_item(&self) -> Option<ItemHandle> {
        self.contents.last().copied()
    }

    pub(crate) fn push(&mut self, item: ItemHandle) {
        self.contents.push(item);
    }

    /// Removes `item`, returning whether it was present.
    pub(crate) fn remove(&mut self, item: ItemHandle) -> bool {
        match self.contents.iter().position(|&held| held == item) {
            Some(index) => {
                self.contents.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn replace_contents(&mut self, contents: Vec<ItemHandle>) {
        self.contents = contents;
    }

    /// Normalises a requested id to an odd positive number.
    ///
    /// Odd positives are kept, odd negatives are mirrored, even negatives
    /// become `|id + 1|` and even non-negatives become `id + 1`.
    pub fn normalize_id(id: i64) -> ItemId {
        let normalized = if id % 2 != 0 {
            id.unsigned_abs()
        } else if id < 0 {
            (id + 1).unsigned_abs()
        } else {
            id.unsigned_abs() + 1
        };
        ItemId(normalized)
    }
}
