//! Hit checks.

/// The roll a monster actually fights with: never more than its hitpoints,
/// so a wounded monster hits less often.
pub fn battle_value(roll: u32, attacker_hitpoints: u32) -> u32 {
    roll.min(attacker_hitpoints)
}

/// An attack lands when the battle value beats the defender's protection.
pub fn check_hit(battle_value: u32, defender_protection: u32) -> bool {
    battle_value > defender_protection
}
