//! Combat resolution between monsters.
//!
//! The functions in [`hit`], [`damage`] and [`result`] are pure: they read
//! stats and a roll and report what would happen. Only
//! [`World::hit_other_monster`](crate::state::World::hit_other_monster) draws
//! the roll and writes the defender's hitpoints.
//!
//! # Core Functions
//!
//! - `battle_value`: the roll, capped by the attacker's hitpoints
//! - `check_hit`: battle value against the defender's protection
//! - `calculate_damage`: base damage + weapon damage + strength bonus
//! - `resolve_attack`: hit check and damage in one step

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::{apply_damage, calculate_damage, strength_bonus};
pub use hit::{battle_value, check_hit};
pub use result::{AttackOutcome, AttackResult, resolve_attack};
