//! Combat result types and attack resolution.

use tracing::debug;

use super::damage::{apply_damage, calculate_damage};
use super::hit::{battle_value, check_hit};
use crate::state::{EntityId, HoldingError, Monster, World};

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    /// The battle value did not beat the defender's protection.
    Miss,
    /// The attack landed.
    Hit,
}

/// Result of a combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,

    /// The raw roll in `[0, ATTACK_ROLL_MAX]`.
    pub roll: u32,

    /// The roll capped by the attacker's hitpoints.
    pub battle_value: u32,

    /// Damage dealt (None if miss).
    pub damage: Option<u32>,

    /// Defender hitpoints after the attack.
    pub defender_hitpoints: u32,
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        self.outcome == AttackOutcome::Hit
    }
}

/// Resolve one attack (hit check + damage calculation) without touching either
/// monster.
///
/// # Arguments
///
/// * `attacker` - the monster striking
/// * `defender` - the monster being struck
/// * `weapon_damage` - damage of the attacker's wielded weapon, 0 if unarmed
/// * `roll` - random roll in `[0, ATTACK_ROLL_MAX]`
pub fn resolve_attack(
    attacker: &Monster,
    defender: &Monster,
    weapon_damage: u32,
    roll: u32,
) -> AttackResult {
    let battle_value = battle_value(roll, attacker.hitpoints());

    if !check_hit(battle_value, defender.protection()) {
        return AttackResult {
            outcome: AttackOutcome::Miss,
            roll,
            battle_value,
            damage: None,
            defender_hitpoints: defender.hitpoints(),
        };
    }

    let damage = calculate_damage(attacker.damage(), weapon_damage, attacker.strength());
    AttackResult {
        outcome: AttackOutcome::Hit,
        roll,
        battle_value,
        damage: Some(damage),
        defender_hitpoints: apply_damage(defender.hitpoints(), damage),
    }
}

impl World {
    /// Lets `attacker` strike `defender` once.
    ///
    /// Draws the roll from the world's deterministic RNG, fights with the
    /// first weapon in the attacker's anchors and lowers the defender's
    /// hitpoints on a hit.
    pub fn hit_other_monster(
        &mut self,
        attacker: EntityId,
        defender: EntityId,
    ) -> Result<AttackResult, HoldingError> {
        self.monster(defender)?;
        let weapon_damage = self
            .wielded_weapon(attacker)?
            .and_then(|weapon| self.item(weapon).ok())
            .and_then(|weapon| weapon.as_weapon())
            .map_or(0, |weapon| weapon.damage());

        let roll = self.registry_mut().roll_attack(attacker);
        let result = resolve_attack(
            self.monster(attacker)?,
            self.monster(defender)?,
            weapon_damage,
            roll,
        );

        if let Some(damage) = result.damage {
            self.monster_mut(defender)?.take_damage(damage);
        }
        debug!(
            %attacker,
            %defender,
            roll,
            outcome = %result.outcome,
            damage = ?result.damage,
            hitpoints = result.defender_hitpoints,
            "attack resolved"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::RngOracle;

    fn monster(name: &str, protection: u32, strength: u32) -> Monster {
        Monster::builder(name)
            .damage(5)
            .protection(protection)
            .max_hitpoints(20)
            .strength(strength)
            .validated(20, 40)
            .unwrap()
    }

    #[test]
    fn roll_at_or_below_protection_misses() {
        let attacker = monster("Grog", 1, 10);
        let defender = monster("Mag", 7, 10);

        let result = resolve_attack(&attacker, &defender, 5, 7);
        assert_eq!(result.outcome, AttackOutcome::Miss);
        assert_eq!(result.damage, None);
        assert_eq!(result.defender_hitpoints, 20);
    }

    #[test]
    fn hit_adds_weapon_and_strength() {
        let attacker = monster("Grog", 1, 11);
        let defender = monster("Mag", 7, 10);

        let result = resolve_attack(&attacker, &defender, 4, 12);
        assert!(result.is_hit());
        assert_eq!(result.damage, Some(11));
        assert_eq!(result.defender_hitpoints, 9);
    }

    /// Returns `u32::MAX` for every draw.
    struct Max;

    impl RngOracle for Max {
        fn next_u32(&self, _seed: u64) -> u32 {
            u32::MAX
        }
    }

    #[test]
    fn world_attack_draws_and_applies_damage() {
        let mut world = World::with_rng(GameConfig::new(), Max);
        let sword = world.spawn_weapon(1, 5, 5, None).unwrap();
        let grog = world
            .spawn_monster(
                Monster::builder("Grog")
                    .damage(5)
                    .max_hitpoints(40)
                    .strength(11)
                    .weapon(sword),
            )
            .unwrap();
        let mag = world
            .spawn_monster(Monster::builder("Mag").protection(7).max_hitpoints(20))
            .unwrap();

        // u32::MAX % 31 == 3, so the roll is 3: a miss against protection 7.
        let miss = world.hit_other_monster(grog, mag).unwrap();
        assert_eq!(miss.roll, 3);
        assert_eq!(miss.outcome, AttackOutcome::Miss);
        assert_eq!(world.registry().attack_nonce(), 1);

        let weak = world
            .spawn_monster(Monster::builder("Weak").protection(2).max_hitpoints(20))
            .unwrap();
        let hit = world.hit_other_monster(grog, weak).unwrap();
        assert_eq!(hit.damage, Some(12));
        assert_eq!(world.monster(weak).unwrap().hitpoints(), 8);
    }

    #[test]
    fn unknown_monsters_are_reported() {
        let mut world = World::new(GameConfig::new());
        let grog = world.spawn_monster(Monster::builder("Grog")).unwrap();

        assert!(matches!(
            world.hit_other_monster(grog, EntityId(5)),
            Err(HoldingError::UnknownMonster { .. })
        ));
        assert_eq!(world.registry().attack_nonce(), 0);
    }
}
