//! Monsters: the root holders of the possession graph.

use arrayvec::ArrayVec;

use super::ItemHandle;
use crate::config::GameConfig;
use crate::state::HoldingError;
use crate::validation;

/// How far [`World::all_item_ids`](crate::state::World::all_item_ids) descends
/// into equipped containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentDepth {
    /// Descend at most this many container levels. `Levels(0)` lists anchors only.
    Levels(u32),
    /// Descend through every nested container.
    Unbounded,
}

impl ContentDepth {
    /// Anchors plus the direct contents of equipped containers.
    pub const SHALLOW: Self = Self::Levels(1);

    pub(crate) fn allows(self, level: u32) -> bool {
        match self {
            Self::Levels(max) => level <= max,
            Self::Unbounded => true,
        }
    }
}

impl Default for ContentDepth {
    fn default() -> Self {
        Self::SHALLOW
    }
}

/// Anchor slots of a monster. Length is fixed at construction.
pub type Anchors = ArrayVec<Option<ItemHandle>, { GameConfig::MAX_ANCHORS }>;

/// A monster: named fighter with stats and a fixed row of anchors.
///
/// # Invariants
///
/// - `0 <= hitpoints <= max_hitpoints` and `max_hitpoints > 0`
/// - `anchors.len()` never changes after construction
/// - every `Some(item)` in `anchors` has `item.holder == Holder::Monster(self)`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    name: String,
    damage: u32,
    protection: u32,
    max_protection: u32,
    hitpoints: u32,
    max_hitpoints: u32,
    strength: u32,
    anchors: Anchors,
}

impl Monster {
    /// Starts a builder for a monster called `name`.
    pub fn builder(name: impl Into<String>) -> MonsterBuilder {
        MonsterBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn protection(&self) -> u32 {
        self.protection
    }

    pub fn max_protection(&self) -> u32 {
        self.max_protection
    }

    pub fn hitpoints(&self) -> u32 {
        self.hitpoints
    }

    pub fn max_hitpoints(&self) -> u32 {
        self.max_hitpoints
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    /// Total weight this monster can carry across all anchors.
    pub fn carrying_capacity(&self) -> u64 {
        u64::from(self.strength) * GameConfig::CARRY_PER_STRENGTH
    }

    #[inline]
    pub fn has_died(&self) -> bool {
        self.hitpoints == 0
    }

    pub fn nb_anchors(&self) -> usize {
        self.anchors.len()
    }

    pub fn anchors(&self) -> &[Option<ItemHandle>] {
        &self.anchors
    }

    /// Item in `anchor`, or `None` if empty or out of range.
    pub fn anchor(&self, anchor: usize) -> Option<ItemHandle> {
        self.anchors.get(anchor).copied().flatten()
    }

    /// Index of the anchor holding `item`.
    pub fn anchor_of(&self, item: ItemHandle) -> Option<usize> {
        self.anchors.iter().position(|slot| *slot == Some(item))
    }

    pub fn has_equipped(&self, item: ItemHandle) -> bool {
        self.anchor_of(item).is_some()
    }

    pub fn equipped(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        self.anchors.iter().flatten().copied()
    }

    pub fn nb_equipped_items(&self) -> usize {
        self.equipped().count()
    }

    pub fn nb_free_anchors(&self) -> usize {
        self.nb_anchors() - self.nb_equipped_items()
    }

    pub fn first_free_anchor(&self) -> Option<usize> {
        self.anchors.iter().position(Option::is_none)
    }

    /// Replaces the maximum hitpoints, lowering current hitpoints if needed.
    pub fn set_max_hitpoints(&mut self, max_hitpoints: u32) -> Result<(), HoldingError> {
        if !validation::is_valid_max_hitpoints(max_hitpoints) {
            return Err(HoldingError::invalid("max_hitpoints", "must be positive"));
        }
        self.max_hitpoints = max_hitpoints;
        self.hitpoints = self.hitpoints.min(max_hitpoints);
        Ok(())
    }

    pub fn set_hitpoints(&mut self, hitpoints: u32) -> Result<(), HoldingError> {
        if !validation::is_valid_hitpoints(hitpoints, self.max_hitpoints) {
            return Err(HoldingError::invalid(
                "hitpoints",
                "must not exceed max_hitpoints",
            ));
        }
        self.hitpoints = hitpoints;
        Ok(())
    }

    /// Lowers hitpoints by `amount`, clamping at zero. Returns the new hitpoints.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hitpoints = self.hitpoints.saturating_sub(amount);
        self.hitpoints
    }

    /// Replaces the protection ceiling. It may not drop below the current
    /// protection.
    pub fn set_max_protection(&mut self, max_protection: u32) -> Result<(), HoldingError> {
        if !validation::is_valid_max_protection(max_protection) {
            return Err(HoldingError::invalid(
                "max_protection",
                "must be 1 or a prime number",
            ));
        }
        if !validation::is_valid_protection(self.protection, max_protection) {
            return Err(HoldingError::invalid(
                "max_protection",
                "must not be below the current protection",
            ));
        }
        self.max_protection = max_protection;
        Ok(())
    }

    /// Sets damage, clamping into `[MIN_MONSTER_DAMAGE, ceiling]`.
    pub(crate) fn set_damage_clamped(&mut self, damage: i64, ceiling: u32) {
        self.damage = clamp_damage(damage, ceiling);
    }

    pub(crate) fn set_anchor(&mut self, anchor: usize, item: Option<ItemHandle>) {
        if let Some(slot) = self.anchors.get_mut(anchor) {
            *slot = item;
        }
    }
}

fn clamp_damage(damage: i64, ceiling: u32) -> u32 {
    let floor = i64::from(GameConfig::MIN_MONSTER_DAMAGE);
    let ceiling = i64::from(ceiling.max(GameConfig::MIN_MONSTER_DAMAGE));
    // Bounded by `ceiling`, which came from a u32.
    damage.clamp(floor, ceiling) as u32
}

/// Builder for spawning a monster through
/// [`World::spawn_monster`](crate::state::World::spawn_monster).
///
/// The starting weapon goes to [`GameConfig::WEAPON_ANCHOR`], the starting
/// backpack to [`GameConfig::BACKPACK_ANCHOR`], and stowed items into that
/// backpack, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterBuilder {
    pub(crate) name: String,
    pub(crate) damage: i64,
    pub(crate) protection: u32,
    pub(crate) max_hitpoints: u32,
    pub(crate) strength: u32,
    pub(crate) anchors: usize,
    pub(crate) weapon: Option<ItemHandle>,
    pub(crate) backpack: Option<ItemHandle>,
    pub(crate) stowed: Vec<ItemHandle>,
}

impl MonsterBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage: i64::from(GameConfig::MIN_MONSTER_DAMAGE),
            protection: GameConfig::MIN_PROTECTION,
            max_hitpoints: 10,
            strength: 10,
            anchors: GameConfig::MIN_ANCHORS,
            weapon: None,
            backpack: None,
            stowed: Vec::new(),
        }
    }

    /// Base damage. Out-of-range values are clamped, never rejected.
    pub fn damage(mut self, damage: i64) -> Self {
        self.damage = damage;
        self
    }

    pub fn protection(mut self, protection: u32) -> Self {
        self.protection = protection;
        self
    }

    pub fn max_hitpoints(mut self, max_hitpoints: u32) -> Self {
        self.max_hitpoints = max_hitpoints;
        self
    }

    pub fn strength(mut self, strength: u32) -> Self {
        self.strength = strength;
        self
    }

    pub fn anchors(mut self, anchors: usize) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn weapon(mut self, weapon: ItemHandle) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn backpack(mut self, backpack: ItemHandle) -> Self {
        self.backpack = Some(backpack);
        self
    }

    /// Adds an item to be stored in the starting backpack.
    pub fn stow(mut self, item: ItemHandle) -> Self {
        self.stowed.push(item);
        self
    }

    /// Validates scalar stats and produces a monster with empty anchors.
    pub(crate) fn validated(
        &self,
        max_monster_damage: u32,
        max_protection: u32,
    ) -> Result<Monster, HoldingError> {
        if !validation::is_valid_name(&self.name) {
            return Err(HoldingError::invalid(
                "name",
                "must start with a capital letter followed by letters, digits, spaces or apostrophes",
            ));
        }
        if !validation::is_valid_protection(self.protection, max_protection) {
            return Err(HoldingError::invalid(
                "protection",
                "must be 1 or a prime number not above the protection ceiling",
            ));
        }
        if !validation::is_valid_max_hitpoints(self.max_hitpoints) {
            return Err(HoldingError::invalid("max_hitpoints", "must be positive"));
        }
        if !validation::is_valid_anchor_count(self.anchors) {
            return Err(HoldingError::invalid(
                "anchors",
                "must lie between MIN_ANCHORS and MAX_ANCHORS",
            ));
        }
        if !self.stowed.is_empty() && self.backpack.is_none() {
            return Err(HoldingError::invalid(
                "stowed",
                "stowed items need a starting backpack",
            ));
        }

        let mut anchors = Anchors::new();
        anchors.extend(std::iter::repeat_n(None, self.anchors));

        Ok(Monster {
            name: self.name.clone(),
            damage: clamp_damage(self.damage, max_monster_damage),
            protection: self.protection,
            max_protection,
            hitpoints: self.max_hitpoints,
            max_hitpoints: self.max_hitpoints,
            strength: self.strength,
            anchors,
        })
    }
}
