/// Tunable parameters and fixed rule constants for a possession world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Base seed for every deterministic roll (weapon ids, attack rolls).
    pub game_seed: u64,

    /// Upper bound for weapon damage. Shared by every weapon in the world.
    pub max_weapon_damage: u32,

    /// Upper bound for monster base damage. Shared by every monster in the world.
    pub max_monster_damage: u32,

    /// Initial protection ceiling given to newly spawned monsters.
    pub max_protection: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of anchors a monster may be built with.
    pub const MAX_ANCHORS: usize = 16;
    /// Minimum number of anchors a monster must be built with.
    pub const MIN_ANCHORS: usize = 3;

    // ===== fixed rules =====
    /// Anchor used for the starting weapon of a monster.
    pub const WEAPON_ANCHOR: usize = 0;
    /// Anchor used for the starting backpack of a monster.
    pub const BACKPACK_ANCHOR: usize = 2;
    pub const MIN_WEAPON_DAMAGE: u32 = 1;
    pub const MIN_MONSTER_DAMAGE: u32 = 1;
    pub const MIN_PROTECTION: u32 = 1;
    /// Weapons are never worth more than this.
    pub const MAX_WEAPON_VALUE: u64 = 20;
    /// Weight added to a purse by every dukat it holds.
    pub const DUKAT_WEIGHT: u64 = 50;
    /// Carrying capacity granted per point of strength.
    pub const CARRY_PER_STRENGTH: u64 = 12_000;
    /// Attack rolls are drawn uniformly from `0..=ATTACK_ROLL_MAX`.
    pub const ATTACK_ROLL_MAX: u32 = 30;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GAME_SEED: u64 = 0;
    pub const DEFAULT_MAX_WEAPON_DAMAGE: u32 = 20;
    pub const DEFAULT_MAX_MONSTER_DAMAGE: u32 = 20;
    pub const DEFAULT_MAX_PROTECTION: u32 = 40;

    pub fn new() -> Self {
        Self {
            game_seed: Self::DEFAULT_GAME_SEED,
            max_weapon_damage: Self::DEFAULT_MAX_WEAPON_DAMAGE,
            max_monster_damage: Self::DEFAULT_MAX_MONSTER_DAMAGE,
            max_protection: Self::DEFAULT_MAX_PROTECTION,
        }
    }

    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_max_weapon_damage(mut self, max_weapon_damage: u32) -> Self {
        self.max_weapon_damage = max_weapon_damage;
        self
    }

    #[must_use]
    pub fn with_max_monster_damage(mut self, max_monster_damage: u32) -> Self {
        self.max_monster_damage = max_monster_damage;
        self
    }

    #[must_use]
    pub fn with_max_protection(mut self, max_protection: u32) -> Self {
        self.max_protection = max_protection;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "game_seed": 7 }"#).unwrap();

        assert_eq!(config.game_seed, 7);
        assert_eq!(config.max_weapon_damage, GameConfig::DEFAULT_MAX_WEAPON_DAMAGE);
        assert_eq!(config.max_protection, GameConfig::DEFAULT_MAX_PROTECTION);
    }
}
