//! Pure predicates over primitive values.
//!
//! None of these look at the holder graph; they are the value-level rules
//! monsters and items are checked against before they enter a world.

use crate::config::GameConfig;

/// A name starts with an ASCII capital and continues with at least one
/// letter, digit, space or apostrophe.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest = chars.as_str();
    first.is_ascii_uppercase()
        && !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '\'')
}

/// Trial-division primality check.
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let n = u64::from(n);
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

/// Protection lies in `[MIN_PROTECTION, max_protection]` and is 1 or prime.
pub fn is_valid_protection(protection: u32, max_protection: u32) -> bool {
    (GameConfig::MIN_PROTECTION..=max_protection).contains(&protection)
        && (protection == 1 || is_prime(protection))
}

/// A protection ceiling is at least `MIN_PROTECTION` and is 1 or prime.
pub fn is_valid_max_protection(max_protection: u32) -> bool {
    max_protection >= GameConfig::MIN_PROTECTION && (max_protection == 1 || is_prime(max_protection))
}

pub fn is_valid_max_hitpoints(max_hitpoints: u32) -> bool {
    max_hitpoints > 0
}

pub fn is_valid_hitpoints(hitpoints: u32, max_hitpoints: u32) -> bool {
    hitpoints <= max_hitpoints
}

pub fn is_valid_anchor_count(anchors: usize) -> bool {
    (GameConfig::MIN_ANCHORS..=GameConfig::MAX_ANCHORS).contains(&anchors)
}

/// Weapon damage lies in `[MIN_WEAPON_DAMAGE, max_damage]`.
pub fn is_valid_weapon_damage(damage: u32, max_damage: u32) -> bool {
    (GameConfig::MIN_WEAPON_DAMAGE..=max_damage).contains(&damage)
}

pub fn is_valid_weapon_value(value: u64) -> bool {
    value <= GameConfig::MAX_WEAPON_VALUE
}

/// Backpack capacities may be zero but never negative.
pub fn is_valid_capacity(capacity: i64) -> bool {
    capacity >= 0
}

/// Damage ceilings may never drop below the smallest allowed damage.
pub fn is_valid_max_damage(max_damage: u32) -> bool {
    max_damage >= GameConfig::MIN_WEAPON_DAMAGE.max(GameConfig::MIN_MONSTER_DAMAGE)
}

/// Mean strength of two monsters.
pub fn average_strength(first: u32, second: u32) -> f32 {
    (first as f32 + second as f32) / 2.0
}

/// Two monsters form a valid pairing when their mean strength is exactly 10.
pub fn is_valid_average_strength(first: u32, second: u32) -> bool {
    u64::from(first) + u64::from(second) == 20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert!(is_valid_name("Grog"));
        assert!(is_valid_name("Old Mag'ra 2"));
        assert!(!is_valid_name("grog"));
        assert!(!is_valid_name("G"));
        assert!(!is_valid_name("Grog2.0"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn primes() {
        let primes: Vec<u32> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(4_294_967_291));
    }

    #[test]
    fn protection_bounds() {
        assert!(is_valid_protection(11, 40));
        assert!(is_valid_protection(1, 40));
        assert!(!is_valid_protection(0, 40));
        assert!(!is_valid_protection(4, 40));
        assert!(!is_valid_protection(43, 40));
    }

    #[test]
    fn protection_ceiling() {
        assert!(is_valid_max_protection(11));
        assert!(!is_valid_max_protection(8));
        assert!(!is_valid_max_protection(0));
    }

    #[test]
    fn anchors_and_hitpoints() {
        assert!(is_valid_anchor_count(GameConfig::MIN_ANCHORS));
        assert!(!is_valid_anchor_count(GameConfig::MIN_ANCHORS - 1));
        assert!(!is_valid_anchor_count(GameConfig::MAX_ANCHORS + 1));
        assert!(is_valid_hitpoints(9, 10));
        assert!(!is_valid_hitpoints(20, 10));
        assert!(!is_valid_max_hitpoints(0));
    }

    #[test]
    fn weapon_bounds_and_capacity() {
        assert!(is_valid_weapon_damage(1, 20));
        assert!(!is_valid_weapon_damage(0, 20));
        assert!(!is_valid_weapon_damage(21, 20));
        assert!(is_valid_weapon_value(20));
        assert!(!is_valid_weapon_value(21));
        assert!(is_valid_capacity(0));
        assert!(!is_valid_capacity(-1));
    }

    #[test]
    fn strength_pairs() {
        assert_eq!(average_strength(8, 12), 10.0);
        assert!(is_valid_average_strength(8, 12));
        assert!(!is_valid_average_strength(10, 11));
    }
}
