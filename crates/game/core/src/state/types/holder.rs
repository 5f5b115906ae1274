//! Who can possess an item.

use std::fmt;

use super::{EntityId, ItemHandle};

/// An entity that can possess items: a monster or a container item.
///
/// Items store a `Holder` as a back-reference only; the holder's own anchors
/// or contents are the source of truth for membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Holder {
    /// Root holder: a monster carrying the item in one of its anchors.
    Monster(EntityId),
    /// Nested holder: a backpack carrying the item among its contents.
    Container(ItemHandle),
}

impl Holder {
    pub fn as_monster(self) -> Option<EntityId> {
        match self {
            Self::Monster(id) => Some(id),
            Self::Container(_) => None,
        }
    }

    pub fn as_container(self) -> Option<ItemHandle> {
        match self {
            Self::Monster(_) => None,
            Self::Container(handle) => Some(handle),
        }
    }
}

impl From<EntityId> for Holder {
    fn from(id: EntityId) -> Self {
        Self::Monster(id)
    }
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monster(id) => write!(f, "{id}"),
            Self::Container(handle) => write!(f, "container {handle}"),
        }
    }
}
