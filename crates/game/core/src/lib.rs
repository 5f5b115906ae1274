//! Possession hierarchy for game entities.
//!
//! Monsters carry items in a fixed row of anchors; backpacks carry further
//! items, to any depth. `possession-core` keeps that holder graph consistent
//! under mutation: every item has at most one holder, capacities hold at
//! every level, and no backpack ever ends up inside itself. All state lives
//! in a [`World`], and all mutation goes through its methods.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod state;
pub mod validation;

pub use combat::{AttackOutcome, AttackResult, resolve_attack};
pub use config::GameConfig;
pub use env::{PcgRng, RngOracle};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Backpack, ContentDepth, DukatOutcome, EntityId, HoldingError, Holder, Item, ItemCategory,
    ItemHandle, ItemId, ItemKind, Monster, MonsterBuilder, Purse, Registry, RejectReason, Weapon,
    World,
};
