use crate::validation;

/// Weapon-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    damage: u32,
}

impl Weapon {
    pub(crate) fn new(damage: u32) -> Self {
        Self { damage }
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    /// Damage is valid when it lies in `[MIN_WEAPON_DAMAGE, max_damage]`.
    pub fn is_valid_damage(damage: u32, max_damage: u32) -> bool {
        validation::is_valid_weapon_damage(damage, max_damage)
    }

    /// Weapons are worth at most [`MAX_WEAPON_VALUE`](crate::config::GameConfig::MAX_WEAPON_VALUE).
    pub fn is_valid_value(value: u64) -> bool {
        validation::is_valid_weapon_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn damage_bounds_follow_the_shared_ceiling() {
        assert!(Weapon::is_valid_damage(1, 20));
        assert!(Weapon::is_valid_damage(20, 20));
        assert!(!Weapon::is_valid_damage(0, 20));
        assert!(!Weapon::is_valid_damage(21, 20));
        assert!(Weapon::is_valid_damage(40, 40));
    }

    #[test]
    fn value_is_capped() {
        assert!(Weapon::is_valid_value(0));
        assert!(Weapon::is_valid_value(GameConfig::MAX_WEAPON_VALUE));
        assert!(!Weapon::is_valid_value(GameConfig::MAX_WEAPON_VALUE + 1));
    }
}
