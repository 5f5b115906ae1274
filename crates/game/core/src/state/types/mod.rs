pub mod backpack;
pub mod common;
pub mod holder;
pub mod item;
pub mod monster;
pub mod purse;
pub mod weapon;

pub use backpack::Backpack;
pub use common::{EntityId, ItemHandle, ItemId};
pub use holder::Holder;
pub use item::{Item, ItemCategory, ItemKind};
pub use monster::{Anchors, ContentDepth, Monster, MonsterBuilder};
pub use purse::{DukatOutcome, Purse};
pub use weapon::Weapon;
