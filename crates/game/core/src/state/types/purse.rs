//! Purses: items whose weight and value grow with the dukats inside.

use super::ItemId;
use crate::config::GameConfig;

/// Purse-specific data.
///
/// The dukat count never exceeds `capacity`. A deposit that would overflow
/// the purse tears it instead (see [`DukatOutcome::Torn`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Purse {
    capacity: u32,
    dukats: u32,
}

/// Result of a dukat deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DukatOutcome {
    /// The dukats fit and were stored.
    Stored { dukats: u32 },
    /// The deposit overflowed the purse: every dukat and the base value are gone.
    Torn { lost_dukats: u32, lost_value: u64 },
}

impl DukatOutcome {
    pub fn is_torn(&self) -> bool {
        matches!(self, Self::Torn { .. })
    }
}

impl Purse {
    /// Creates an empty purse. Non-positive capacities become 1.
    pub(crate) fn with_capacity(capacity: i64) -> Self {
        let capacity = u32::try_from(capacity.max(1)).unwrap_or(u32::MAX);
        Self {
            capacity,
            dukats: 0,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn dukats(&self) -> u32 {
        self.dukats
    }

    /// Weight contributed by the dukats alone.
    pub fn dukat_weight(&self) -> u64 {
        u64::from(self.dukats) * GameConfig::DUKAT_WEIGHT
    }

    /// True if depositing `amount` more dukats would overflow the purse.
    pub fn would_tear(&self, amount: u32) -> bool {
        u64::from(self.dukats) + u64::from(amount) > u64::from(self.capacity)
    }

    /// Stores `amount` dukats. Callers check [`Self::would_tear`] first.
    pub(crate) fn store(&mut self, amount: u32) {
        debug_assert!(!self.would_tear(amount));
        self.dukats += amount;
    }

    /// Removes `amount` dukats, saturating at zero.
    pub(crate) fn withdraw(&mut self, amount: u32) {
        self.dukats = self.dukats.saturating_sub(amount);
    }

    /// Empties the purse, returning the number of dukats lost.
    pub(crate) fn tear(&mut self) -> u32 {
        std::mem::take(&mut self.dukats)
    }

    /// Maps a requested id onto the Fibonacci sequence.
    ///
    /// Negative ids are mirrored, zero becomes 1, any other id is rounded up to
    /// the smallest Fibonacci number not below it.
    pub fn normalize_id(id: i64) -> ItemId {
        let wanted = id.unsigned_abs().max(1);
        let (mut a, mut b) = (1_u64, 1_u64);
        while b < wanted {
            match a.checked_add(b) {
                Some(next) => {
                    a = b;
                    b = next;
                }
                None => break,
            }
        }
        ItemId(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fibonacci_ids_are_kept() {
        for fib in [1, 2, 3, 5, 8, 13, 21, 144] {
            assert_eq!(Purse::normalize_id(fib), ItemId(fib as u64));
        }
    }

    #[test]
    fn other_ids_round_up_to_next_fibonacci() {
        assert_eq!(Purse::normalize_id(0), ItemId(1));
        assert_eq!(Purse::normalize_id(4), ItemId(5));
        assert_eq!(Purse::normalize_id(111), ItemId(144));
        assert_eq!(Purse::normalize_id(-7), ItemId(8));
    }

    #[test]
    fn most_negative_id_still_maps_into_u64() {
        assert_eq!(
            Purse::normalize_id(i64::MIN),
            ItemId(12_200_160_415_121_876_738)
        );
    }

    #[test]
    fn capacity_is_at_least_one() {
        assert_eq!(Purse::with_capacity(0).capacity(), 1);
        assert_eq!(Purse::with_capacity(-5).capacity(), 1);
        assert_eq!(Purse::with_capacity(10).capacity(), 10);
    }

    #[test]
    fn overflowing_deposit_is_detected() {
        let mut purse = Purse::with_capacity(10);
        assert!(!purse.would_tear(10));
        purse.store(4);
        assert!(purse.would_tear(7));
        assert_eq!(purse.dukat_weight(), 4 * GameConfig::DUKAT_WEIGHT);
        assert_eq!(purse.tear(), 4);
        assert_eq!(purse.dukats(), 0);
    }
}
