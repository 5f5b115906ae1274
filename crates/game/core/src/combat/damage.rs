//! Damage calculation and application.

/// Extra damage from strength: `(strength - 5) / 3`, rounded toward zero.
pub fn strength_bonus(strength: u32) -> i64 {
    (i64::from(strength) - 5) / 3
}

/// Calculate damage from a landed hit.
///
/// # Formula
///
/// ```text
/// damage = monster_damage + weapon_damage + (strength - 5) / 3
/// floored at 0
/// ```
pub fn calculate_damage(monster_damage: u32, weapon_damage: u32, strength: u32) -> u32 {
    let total = i64::from(monster_damage) + i64::from(weapon_damage) + strength_bonus(strength);
    u32::try_from(total.max(0)).unwrap_or(u32::MAX)
}

/// Apply damage to current HP.
///
/// Returns the new HP value (clamped to 0).
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
