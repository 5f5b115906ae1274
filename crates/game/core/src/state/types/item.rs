//! Item state shared by every item kind.
//!
//! An item only knows its own base numbers and who holds it. Anything that
//! depends on other items (a backpack's total weight, for instance) is computed
//! by the [`World`](crate::state::World) that owns the item.

use super::{Backpack, Holder, ItemId, Purse, Weapon};

/// Item kind with kind-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Weapon(Weapon),
    Purse(Purse),
    /// A container: the only kind that is also a [`Holder`].
    Backpack(Backpack),
}

/// Data-free discriminant of [`ItemKind`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    Weapon,
    Purse,
    Backpack,
}

impl ItemKind {
    pub fn category(&self) -> ItemCategory {
        match self {
            Self::Weapon(_) => ItemCategory::Weapon,
            Self::Purse(_) => ItemCategory::Purse,
            Self::Backpack(_) => ItemCategory::Backpack,
        }
    }
}

/// One item in the world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    id: ItemId,
    weight: u64,
    value: u64,
    holder: Option<Holder>,
    kind: ItemKind,
}

impl Item {
    pub(crate) fn new(id: ItemId, weight: u64, value: u64, kind: ItemKind) -> Self {
        Self {
            id,
            weight,
            value,
            holder: None,
            kind,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Base weight of the item itself, excluding dukats or contents.
    pub fn own_weight(&self) -> u64 {
        self.weight
    }

    /// Base value of the item itself, excluding dukats or contents.
    pub fn own_value(&self) -> u64 {
        self.value
    }

    pub fn holder(&self) -> Option<Holder> {
        self.holder
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    pub fn as_weapon(&self) -> Option<&Weapon> {
        match &self.kind {
            ItemKind::Weapon(weapon) => Some(weapon),
            _ => None,
        }
    }

    pub fn as_purse(&self) -> Option<&Purse> {
        match &self.kind {
            ItemKind::Purse(purse) => Some(purse),
            _ => None,
        }
    }

    pub fn as_backpack(&self) -> Option<&Backpack> {
        match &self.kind {
            ItemKind::Backpack(backpack) => Some(backpack),
            _ => None,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ItemKind::Backpack(_))
    }

    pub(crate) fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    pub(crate) fn set_value(&mut self, value: u64) {
        self.value = value;
    }

    pub(crate) fn set_holder(&mut self, holder: Option<Holder>) {
        self.holder = holder;
    }

    pub(crate) fn purse_mut(&mut self) -> Option<&mut Purse> {
        match &mut self.kind {
            ItemKind::Purse(purse) => Some(purse),
            _ => None,
        }
    }

    pub(crate) fn backpack_mut(&mut self) -> Option<&mut Backpack> {
        match &mut self.kind {
            ItemKind::Backpack(backpack) => Some(backpack),
            _ => None,
        }
    }
}
