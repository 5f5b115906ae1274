//! Per-world allocation state: weapon ids, damage ceilings, draw counters.
//!
//! A registry is created once per [`World`](super::World) and dies with it.
//! Nothing here is process-global, so two worlds never share ids or ceilings.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::GameConfig;
use crate::env::{PcgRng, RngOracle, RollStream, compute_seed};
use crate::state::{EntityId, HoldingError, ItemId};
use crate::validation;

pub struct Registry {
    game_seed: u64,
    rng: Box<dyn RngOracle>,
    weapon_ids: BTreeSet<u64>,
    weapon_draws: u64,
    attack_nonce: u64,
    max_weapon_damage: u32,
    max_monster_damage: u32,
}

impl Registry {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, PcgRng)
    }

    pub fn with_rng(config: &GameConfig, rng: impl RngOracle + 'static) -> Self {
        Self {
            game_seed: config.game_seed,
            rng: Box::new(rng),
            weapon_ids: BTreeSet::new(),
            weapon_draws: 0,
            attack_nonce: 0,
            max_weapon_damage: config.max_weapon_damage,
            max_monster_damage: config.max_monster_damage,
        }
    }

    /// Random draws tried before falling back to probing upwards.
    const WEAPON_ID_DRAWS: u32 = 16;

    /// Allocates a fresh weapon id: odd, positive, never handed out before.
    ///
    /// Draws a few random candidates, then walks the odd ids upwards from the
    /// last draw, so even a constant oracle always yields a new id.
    pub fn next_weapon_id(&mut self) -> ItemId {
        let mut candidate = 1;
        for _ in 0..Self::WEAPON_ID_DRAWS {
            candidate = self.draw_weapon_id();
            if self.weapon_ids.insert(candidate) {
                return ItemId(candidate);
            }
        }
        while !self.weapon_ids.insert(candidate) {
            candidate = odd_positive(candidate.wrapping_add(2));
        }
        ItemId(candidate)
    }

    fn draw_weapon_id(&mut self) -> u64 {
        let seed = compute_seed(self.game_seed, self.weapon_draws, RollStream::WeaponId, 0);
        self.weapon_draws += 1;
        odd_positive(self.rng.next_u64(seed))
    }

    /// Returns an id to the pool after an aborted weapon construction.
    pub(crate) fn release_weapon_id(&mut self, id: ItemId) {
        self.weapon_ids.remove(&id.0);
    }

    pub fn is_weapon_id_taken(&self, id: ItemId) -> bool {
        self.weapon_ids.contains(&id.0)
    }

    pub fn issued_weapon_ids(&self) -> usize {
        self.weapon_ids.len()
    }

    /// Draws an attack roll in `[0, ATTACK_ROLL_MAX]` for `attacker`.
    pub(crate) fn roll_attack(&mut self, attacker: EntityId) -> u32 {
        let seed = compute_seed(
            self.game_seed,
            self.attack_nonce,
            RollStream::Attack,
            attacker.0,
        );
        self.attack_nonce += 1;
        self.rng.range(seed, 0, GameConfig::ATTACK_ROLL_MAX)
    }

    /// Number of attack rolls drawn so far.
    pub fn attack_nonce(&self) -> u64 {
        self.attack_nonce
    }

    pub fn max_weapon_damage(&self) -> u32 {
        self.max_weapon_damage
    }

    pub fn max_monster_damage(&self) -> u32 {
        self.max_monster_damage
    }

    /// Changes the weapon damage ceiling. Existing weapons keep their damage.
    pub fn set_max_weapon_damage(&mut self, max_damage: u32) -> Result<(), HoldingError> {
        if !validation::is_valid_max_damage(max_damage) {
            return Err(HoldingError::invalid(
                "max_weapon_damage",
                "must not be below the minimum damage",
            ));
        }
        self.max_weapon_damage = max_damage;
        Ok(())
    }

    /// Changes the monster damage ceiling. Existing monsters keep their damage.
    pub fn set_max_monster_damage(&mut self, max_damage: u32) -> Result<(), HoldingError> {
        if !validation::is_valid_max_damage(max_damage) {
            return Err(HoldingError::invalid(
                "max_monster_damage",
                "must not be below the minimum damage",
            ));
        }
        self.max_monster_damage = max_damage;
        Ok(())
    }
}

/// Clears the sign bit so ids stay within the positive i64 range, then forces
/// the value odd.
fn odd_positive(raw: u64) -> u64 {
    (raw & i64::MAX as u64) | 1
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("game_seed", &self.game_seed)
            .field("weapon_ids", &self.weapon_ids.len())
            .field("weapon_draws", &self.weapon_draws)
            .field("attack_nonce", &self.attack_nonce)
            .field("max_weapon_damage", &self.max_weapon_damage)
            .field("max_monster_damage", &self.max_monster_damage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields the same id for the first two draws, forcing one collision.
    struct Stuck;

    impl RngOracle for Stuck {
        fn next_u32(&self, seed: u64) -> u32 {
            let repeated = [0, 1].map(|nonce| compute_seed(0, nonce, RollStream::WeaponId, 0));
            if repeated.contains(&seed) { 4 } else { 8 }
        }
    }

    #[test]
    fn weapon_ids_are_odd_positive_and_unique() {
        let mut registry = Registry::new(&GameConfig::with_seed(99));
        let ids: Vec<ItemId> = (0..200).map(|_| registry.next_weapon_id()).collect();

        for id in &ids {
            assert_eq!(id.0 % 2, 1);
            assert!(id.0 <= i64::MAX as u64);
        }
        let unique: BTreeSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(registry.issued_weapon_ids(), 200);
    }

    #[test]
    fn colliding_draws_are_retried() {
        let mut registry = Registry::with_rng(&GameConfig::new(), Stuck);

        let first = registry.next_weapon_id();
        let second = registry.next_weapon_id();
        assert_ne!(first, second);
        assert_eq!(registry.weapon_draws, 3);

        registry.release_weapon_id(second);
        assert!(!registry.is_weapon_id_taken(second));
        assert!(registry.is_weapon_id_taken(first));
    }

    /// Returns the same value for every draw.
    struct Constant;

    impl RngOracle for Constant {
        fn next_u32(&self, _seed: u64) -> u32 {
            7
        }
    }

    #[test]
    fn constant_oracle_falls_back_to_probing() {
        let mut registry = Registry::with_rng(&GameConfig::new(), Constant);

        let ids: Vec<ItemId> = (0..5).map(|_| registry.next_weapon_id()).collect();

        let unique: BTreeSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(ids.iter().all(|id| id.0 % 2 == 1));
        assert_eq!(ids[1].0, ids[0].0 + 2);
        assert_eq!(
            registry.weapon_draws,
            1 + 4 * u64::from(Registry::WEAPON_ID_DRAWS)
        );
    }

    #[test]
    fn probing_wraps_back_into_the_positive_range() {
        assert_eq!(odd_positive((i64::MAX as u64).wrapping_add(2)), 1);
    }

    #[test]
    fn two_registries_with_the_same_seed_agree() {
        let config = GameConfig::with_seed(5);
        let mut a = Registry::new(&config);
        let mut b = Registry::new(&config);
        assert_eq!(a.next_weapon_id(), b.next_weapon_id());
        assert_eq!(a.roll_attack(EntityId(0)), b.roll_attack(EntityId(0)));
    }

    #[test]
    fn ceilings_reject_values_below_minimum() {
        let mut registry = Registry::new(&GameConfig::new());

        registry.set_max_weapon_damage(40).unwrap();
        assert_eq!(registry.max_weapon_damage(), 40);
        assert!(registry.set_max_monster_damage(0).is_err());
        assert_eq!(
            registry.max_monster_damage(),
            GameConfig::DEFAULT_MAX_MONSTER_DAMAGE
        );
    }
}
