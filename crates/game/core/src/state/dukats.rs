//! Dukat deposits and withdrawals.
//!
//! Dukats weigh [`GameConfig::DUKAT_WEIGHT`] each, so a deposit is a weight
//! change that every holder above the purse must be able to bear. An
//! overflowing deposit is the exception: it tears the purse, which only ever
//! lowers weights.

use tracing::{debug, info};

use super::{DukatOutcome, HoldingError, Holder, ItemHandle, Purse, RejectReason, World};
use crate::config::GameConfig;

impl World {
    /// Adds `amount` dukats to `purse`.
    ///
    /// If the purse would overflow it tears instead: every dukat and its base
    /// value are lost, and the outcome says so.
    pub fn add_dukats(&mut self, purse: ItemHandle, amount: u32) -> Result<DukatOutcome, HoldingError> {
        self.check_deposit(purse, amount, None)?;
        Ok(self.deposit(purse, amount))
    }

    /// Takes `amount` dukats out of `purse`.
    pub fn remove_dukats(&mut self, purse: ItemHandle, amount: u32) -> Result<u32, HoldingError> {
        let available = self.purse(purse)?.dukats();
        if amount > available {
            return Err(HoldingError::InsufficientDukats {
                available,
                requested: amount,
            });
        }
        self.withdraw(purse, amount);
        Ok(available - amount)
    }

    /// Moves `amount` dukats from one purse to another.
    ///
    /// The deposit is checked before anything is withdrawn, so a refusal
    /// leaves both purses untouched. Holders above both purses lose the
    /// withdrawn weight as they gain the deposit, so only holders above the
    /// target alone must bear it. The deposit may tear the target.
    pub fn transfer_dukats(
        &mut self,
        from: ItemHandle,
        to: ItemHandle,
        amount: u32,
    ) -> Result<DukatOutcome, HoldingError> {
        let available = self.purse(from)?.dukats();
        self.purse(to)?;
        if amount > available {
            return Err(HoldingError::InsufficientDukats {
                available,
                requested: amount,
            });
        }
        if from == to {
            return Ok(DukatOutcome::Stored { dukats: available });
        }
        self.check_deposit(to, amount, Some(from))?;

        self.withdraw(from, amount);
        Ok(self.deposit(to, amount))
    }

    fn purse(&self, purse: ItemHandle) -> Result<&Purse, HoldingError> {
        self.item(purse)?
            .as_purse()
            .ok_or(HoldingError::invalid("purse", "item is not a purse"))
    }

    /// Refuses deposits whose extra weight a holder above the purse cannot bear.
    ///
    /// Holders above `source`, the purse the dukats are withdrawn from, are
    /// not checked.
    fn check_deposit(
        &self,
        purse: ItemHandle,
        amount: u32,
        source: Option<ItemHandle>,
    ) -> Result<(), HoldingError> {
        let target = self.purse(purse)?;
        if target.would_tear(amount) {
            return Ok(());
        }
        let unchanged: Vec<Holder> = match source {
            Some(source) => self.holder_chain(self.item(source)?.holder()).collect(),
            None => Vec::new(),
        };
        let extra = u64::from(amount) * GameConfig::DUKAT_WEIGHT;
        let holder = self.item(purse)?.holder();
        self.check_bears_except(holder, extra, &unchanged)
            .map_err(|reason: RejectReason| {
                debug!(%purse, amount, %reason, "deposit refused");
                HoldingError::CannotObtain {
                    item: purse,
                    reason,
                }
            })
    }

    fn deposit(&mut self, purse: ItemHandle, amount: u32) -> DukatOutcome {
        let Ok(item) = self.item_mut(purse) else {
            return DukatOutcome::Stored { dukats: 0 };
        };
        let lost_value = item.own_value();
        let Some(wallet) = item.purse_mut() else {
            return DukatOutcome::Stored { dukats: 0 };
        };

        let outcome = if wallet.would_tear(amount) {
            let lost_dukats = wallet.tear();
            item.set_value(0);
            info!(%purse, amount, lost_dukats, lost_value, "purse torn");
            DukatOutcome::Torn {
                lost_dukats,
                lost_value,
            }
        } else {
            wallet.store(amount);
            DukatOutcome::Stored {
                dukats: wallet.dukats(),
            }
        };

        let holder = self.items.get(purse.index()).and_then(|item| item.holder());
        self.resort_upwards(holder);
        outcome
    }

    fn withdraw(&mut self, purse: ItemHandle, amount: u32) {
        let Ok(item) = self.item_mut(purse) else {
            return;
        };
        if let Some(wallet) = item.purse_mut() {
            wallet.withdraw(amount);
        }
        let holder = item.holder();
        self.resort_upwards(holder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflowing_deposit_tears_the_purse() {
        let mut world = World::new(GameConfig::new());
        let purse = world.spawn_purse(111, 0, 10, 10, 0, None).unwrap();

        let outcome = world.add_dukats(purse, 15).unwrap();

        assert_eq!(
            outcome,
            DukatOutcome::Torn {
                lost_dukats: 0,
                lost_value: 10
            }
        );
        let item = world.item(purse).unwrap();
        assert_eq!(item.as_purse().unwrap().dukats(), 0);
        assert_eq!(item.own_value(), 0);
        assert_eq!(world.effective_value(purse).unwrap(), 0);
    }

    #[test]
    fn deposits_grow_weight_and_value() {
        let mut world = World::new(GameConfig::new());
        let purse = world.spawn_purse(1, 2, 3, 10, 0, None).unwrap();

        assert_eq!(
            world.add_dukats(purse, 4).unwrap(),
            DukatOutcome::Stored { dukats: 4 }
        );
        assert_eq!(world.effective_weight(purse).unwrap(), 202);
        assert_eq!(world.effective_value(purse).unwrap(), 7);
        assert_eq!(world.remove_dukats(purse, 3).unwrap(), 1);
        assert_eq!(
            world.remove_dukats(purse, 2),
            Err(HoldingError::InsufficientDukats {
                available: 1,
                requested: 2
            })
        );
    }

    #[test]
    fn deposit_refused_when_a_holder_cannot_bear_it() {
        let mut world = World::new(GameConfig::new());
        let pack = world.spawn_backpack(1, 0, 0, 120, None).unwrap();
        let purse = world
            .spawn_purse(1, 0, 0, 10, 1, Some(Holder::Container(pack)))
            .unwrap();

        let err = world.add_dukats(purse, 2).unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::AncestorOverCapacity));
        assert_eq!(world.item(purse).unwrap().as_purse().unwrap().dukats(), 1);
        world.add_dukats(purse, 1).unwrap();
        assert_eq!(world.content_weight(pack).unwrap(), 100);
    }

    #[test]
    fn transfer_checks_the_target_before_withdrawing() {
        let mut world = World::new(GameConfig::new());
        let pack = world.spawn_backpack(1, 0, 0, 60, None).unwrap();
        let rich = world.spawn_purse(1, 0, 0, 10, 5, None).unwrap();
        let poor = world
            .spawn_purse(2, 0, 0, 10, 0, Some(Holder::Container(pack)))
            .unwrap();

        assert!(world.transfer_dukats(rich, poor, 2).is_err());
        assert_eq!(world.item(rich).unwrap().as_purse().unwrap().dukats(), 5);

        assert_eq!(
            world.transfer_dukats(rich, poor, 1).unwrap(),
            DukatOutcome::Stored { dukats: 1 }
        );
        assert_eq!(world.item(rich).unwrap().as_purse().unwrap().dukats(), 4);
        assert!(matches!(
            world.transfer_dukats(poor, rich, 9),
            Err(HoldingError::InsufficientDukats { .. })
        ));
    }

    #[test]
    fn deposits_keep_enclosing_backpacks_sorted() {
        let mut world = World::new(GameConfig::new());
        let pack = world.spawn_backpack(1, 0, 0, 10_000, None).unwrap();
        let purse = world
            .spawn_purse(1, 1, 0, 100, 0, Some(Holder::Container(pack)))
            .unwrap();
        let knife = world
            .spawn_weapon(1, 10, 1, Some(Holder::Container(pack)))
            .unwrap();
        assert_eq!(world.lowest_weight_item(pack), Ok(Some(purse)));

        world.add_dukats(purse, 1).unwrap();

        assert_eq!(world.lowest_weight_item(pack), Ok(Some(knife)));
        world.check_invariants().unwrap();
    }

    #[test]
    fn transfer_within_a_full_backpack_is_weight_neutral() {
        let mut world = World::new(GameConfig::new());
        let pack = world.spawn_backpack(1, 0, 0, 100, None).unwrap();
        let a = world
            .spawn_purse(1, 0, 0, 10, 2, Some(Holder::Container(pack)))
            .unwrap();
        let b = world
            .spawn_purse(2, 0, 0, 10, 0, Some(Holder::Container(pack)))
            .unwrap();

        assert_eq!(
            world.transfer_dukats(a, b, 1).unwrap(),
            DukatOutcome::Stored { dukats: 1 }
        );
        assert_eq!(world.content_weight(pack).unwrap(), 100);
        world.check_invariants().unwrap();
    }

    #[test]
    fn transfer_into_a_nested_backpack_only_checks_the_new_branch() {
        let mut world = World::new(GameConfig::new());
        let outer = world.spawn_backpack(1, 0, 0, 100, None).unwrap();
        let inner = world
            .spawn_backpack(3, 0, 0, 60, Some(Holder::Container(outer)))
            .unwrap();
        let a = world
            .spawn_purse(1, 0, 0, 10, 2, Some(Holder::Container(outer)))
            .unwrap();
        let b = world
            .spawn_purse(2, 0, 0, 10, 0, Some(Holder::Container(inner)))
            .unwrap();

        world.transfer_dukats(a, b, 1).unwrap();
        assert_eq!(world.content_weight(outer).unwrap(), 100);

        let err = world.transfer_dukats(a, b, 1).unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::AncestorOverCapacity));
        assert_eq!(world.item(a).unwrap().as_purse().unwrap().dukats(), 1);
        assert_eq!(world.item(b).unwrap().as_purse().unwrap().dukats(), 1);
        world.check_invariants().unwrap();
    }
}
