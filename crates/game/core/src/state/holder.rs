//! The holder contract shared by monsters and backpacks.
//!
//! `check_obtain` is the one acceptance rule. Every placement, whether from
//! spawning, `equip`, `set_holder` or the equipment operations, runs through
//! it before touching the graph.

use tracing::debug;

use super::transfer::Slot;
use super::{HoldingError, Holder, ItemHandle, RejectReason, World};

impl World {
    /// Diagnoses whether `holder` would accept `item`.
    ///
    /// An item already held by `holder` is re-validated: the holder must still
    /// be within its own capacity. Otherwise the item must be free, must not
    /// enclose the holder, and its effective weight must fit the holder and
    /// every holder above it. Monsters additionally need a free anchor.
    pub fn check_obtain(&self, holder: Holder, item: ItemHandle) -> Result<(), RejectReason> {
        let target = self.items.get(item.index()).ok_or(RejectReason::NullItem)?;
        self.ensure_holder_exists(holder)?;

        if target.holder() == Some(holder) {
            return self.bears(holder, 0).then_some(()).ok_or(RejectReason::OverCapacity);
        }
        if target.holder().is_some() {
            return Err(RejectReason::AlreadyHeld);
        }
        if self
            .holder_chain(Some(holder))
            .any(|above| above == Holder::Container(item))
        {
            return Err(RejectReason::WouldCreateCycle);
        }

        let weight = self.weight_of(item);
        if !self.bears(holder, weight) {
            return Err(RejectReason::OverCapacity);
        }
        match holder {
            Holder::Monster(monster) => {
                let has_free_anchor = self
                    .monsters
                    .get(monster.index())
                    .and_then(|monster| monster.first_free_anchor())
                    .is_some();
                if !has_free_anchor {
                    return Err(RejectReason::NoFreeAnchor);
                }
            }
            Holder::Container(container) => {
                let parent = self.items.get(container.index()).and_then(|held| held.holder());
                self.check_bears(parent, weight)?;
            }
        }
        Ok(())
    }

    pub fn can_obtain(&self, holder: Holder, item: ItemHandle) -> bool {
        self.check_obtain(holder, item).is_ok()
    }

    /// `None` is always valid; otherwise `holder` must be able to obtain `item`.
    pub fn is_valid_holder(&self, item: ItemHandle, holder: Option<Holder>) -> bool {
        holder.is_none_or(|holder| self.can_obtain(holder, item))
    }

    pub fn has_as_equipment(&self, holder: Holder, item: ItemHandle) -> bool {
        match holder {
            Holder::Monster(monster) => self
                .monsters
                .get(monster.index())
                .is_some_and(|monster| monster.has_equipped(item)),
            Holder::Container(container) => self
                .backpack(container)
                .is_ok_and(|backpack| backpack.contains(item)),
        }
    }

    /// Places a free item with `holder`: the first free anchor of a monster,
    /// or the contents of a backpack.
    pub fn equip(&mut self, holder: Holder, item: ItemHandle) -> Result<(), HoldingError> {
        let refuse = |reason: RejectReason| {
            debug!(%item, %holder, %reason, "equip refused");
            HoldingError::CannotObtain { item, reason }
        };
        if self.holder(item).ok().flatten() == Some(holder) {
            return Err(refuse(RejectReason::AlreadyHeld));
        }
        self.check_obtain(holder, item).map_err(refuse)?;
        self.place(holder, item);
        Ok(())
    }

    /// Changes the holder of `item`.
    ///
    /// `None` detaches the item from its current holder. Naming the current
    /// holder again re-validates without moving anything. Any other holder
    /// must accept the item, which therefore has to be free first.
    pub fn set_holder(
        &mut self,
        item: ItemHandle,
        holder: Option<Holder>,
    ) -> Result<(), HoldingError> {
        let current = self.item(item)?.holder();
        let Some(holder) = holder else {
            if current.is_some() {
                self.transfer(item, None);
            }
            return Ok(());
        };

        self.check_obtain(holder, item)
            .map_err(|reason| HoldingError::InvalidHolder { item, holder, reason })?;
        if current != Some(holder) {
            self.place(holder, item);
        }
        Ok(())
    }

    /// Checks that `holder`, and every holder above it, can take `extra` more
    /// weight.
    pub(crate) fn check_bears(&self, holder: Option<Holder>, extra: u64) -> Result<(), RejectReason> {
        self.check_bears_except(holder, extra, &[])
    }

    /// Like [`check_bears`](Self::check_bears), skipping the holders in
    /// `unchanged` whose net weight stays the same.
    pub(crate) fn check_bears_except(
        &self,
        holder: Option<Holder>,
        extra: u64,
        unchanged: &[Holder],
    ) -> Result<(), RejectReason> {
        if self
            .holder_chain(holder)
            .filter(|above| !unchanged.contains(above))
            .all(|above| self.bears(above, extra))
        {
            Ok(())
        } else {
            Err(RejectReason::AncestorOverCapacity)
        }
    }

    /// True if `holder` stays within its own capacity after `extra` more weight.
    fn bears(&self, holder: Holder, extra: u64) -> bool {
        match holder {
            Holder::Monster(monster) => {
                let Ok(load) = self.equipment_load(monster) else {
                    return false;
                };
                self.monsters.get(monster.index()).is_some_and(|monster| {
                    load.saturating_add(extra) <= monster.carrying_capacity()
                })
            }
            Holder::Container(container) => {
                let Ok(backpack) = self.backpack(container) else {
                    return false;
                };
                self.sum_weights(backpack.contents()).saturating_add(extra) <= backpack.capacity()
            }
        }
    }

    fn ensure_holder_exists(&self, holder: Holder) -> Result<(), RejectReason> {
        let exists = match holder {
            Holder::Monster(monster) => self.monsters.get(monster.index()).is_some(),
            Holder::Container(container) => self.backpack(container).is_ok(),
        };
        exists.then_some(()).ok_or(RejectReason::UnknownHolder)
    }

    /// Attaches an item already accepted by `check_obtain`.
    pub(crate) fn place(&mut self, holder: Holder, item: ItemHandle) {
        let slot = match holder {
            Holder::Monster(monster) => {
                let Some(anchor) = self
                    .monsters
                    .get(monster.index())
                    .and_then(|monster| monster.first_free_anchor())
                else {
                    return;
                };
                Slot::Anchor(monster, anchor)
            }
            Holder::Container(container) => Slot::Content(container),
        };
        self.transfer(item, Some(slot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{EntityId, Monster};

    fn world() -> World {
        World::new(GameConfig::with_seed(3))
    }

    #[test]
    fn equip_sets_both_directions() {
        let mut world = world();
        let pack = world.spawn_backpack(1, 5, 5, 100, None).unwrap();
        let sword = world.spawn_weapon(10, 5, 5, None).unwrap();

        world.equip(Holder::Container(pack), sword).unwrap();

        assert_eq!(world.holder(sword).unwrap(), Some(Holder::Container(pack)));
        assert!(world.has_as_equipment(Holder::Container(pack), sword));
        world.check_invariants().unwrap();
    }

    #[test]
    fn backpack_cannot_hold_itself_or_an_ancestor() {
        let mut world = world();
        let outer = world.spawn_backpack(1, 1, 1, 100, None).unwrap();
        let inner = world
            .spawn_backpack(3, 1, 1, 100, Some(Holder::Container(outer)))
            .unwrap();

        assert_eq!(
            world.check_obtain(Holder::Container(outer), outer),
            Err(RejectReason::WouldCreateCycle)
        );
        // `outer` is held by nobody but encloses `inner`.
        assert_eq!(
            world.check_obtain(Holder::Container(inner), outer),
            Err(RejectReason::WouldCreateCycle)
        );
        world.check_invariants().unwrap();
    }

    #[test]
    fn held_items_must_be_released_first() {
        let mut world = world();
        let left = world.spawn_backpack(1, 1, 1, 100, None).unwrap();
        let right = world.spawn_backpack(3, 1, 1, 100, None).unwrap();
        let sword = world
            .spawn_weapon(1, 5, 5, Some(Holder::Container(left)))
            .unwrap();

        let err = world.set_holder(sword, Some(Holder::Container(right))).unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::AlreadyHeld));

        world.set_holder(sword, None).unwrap();
        world.set_holder(sword, Some(Holder::Container(right))).unwrap();
        assert!(world.has_as_equipment(Holder::Container(right), sword));
        assert!(!world.has_as_equipment(Holder::Container(left), sword));
    }

    #[test]
    fn naming_the_current_holder_is_a_no_op() {
        let mut world = world();
        let pack = world.spawn_backpack(1, 1, 1, 100, None).unwrap();
        let sword = world
            .spawn_weapon(1, 5, 5, Some(Holder::Container(pack)))
            .unwrap();

        world.set_holder(sword, Some(Holder::Container(pack))).unwrap();
        assert_eq!(world.backpack(pack).unwrap().len(), 1);

        let again = world.equip(Holder::Container(pack), sword).unwrap_err();
        assert_eq!(again.reject_reason(), Some(RejectReason::AlreadyHeld));
    }

    #[test]
    fn ancestors_must_bear_the_extra_weight() {
        let mut world = world();
        let outer = world.spawn_backpack(1, 0, 0, 10, None).unwrap();
        let inner = world
            .spawn_backpack(3, 0, 0, 100, Some(Holder::Container(outer)))
            .unwrap();
        let anvil = world.spawn_weapon(1, 50, 5, None).unwrap();

        assert_eq!(
            world.check_obtain(Holder::Container(inner), anvil),
            Err(RejectReason::AncestorOverCapacity)
        );
        assert!(world.backpack(inner).unwrap().is_empty());
    }

    #[test]
    fn monsters_need_a_free_anchor() {
        let mut world = world();
        let grog = world
            .spawn_monster(Monster::builder("Grog").strength(10))
            .unwrap();
        for _ in 0..GameConfig::MIN_ANCHORS {
            let dagger = world.spawn_weapon(1, 1, 1, None).unwrap();
            world.equip(Holder::Monster(grog), dagger).unwrap();
        }
        let spare = world.spawn_weapon(1, 1, 1, None).unwrap();

        assert_eq!(
            world.check_obtain(Holder::Monster(grog), spare),
            Err(RejectReason::NoFreeAnchor)
        );
        assert!(!world.is_valid_holder(spare, Some(Holder::Monster(grog))));
        assert!(world.is_valid_holder(spare, None));
    }

    #[test]
    fn unknown_holders_and_items_are_reported() {
        let world = world();
        assert_eq!(
            world.check_obtain(Holder::Monster(EntityId(4)), ItemHandle(0)),
            Err(RejectReason::NullItem)
        );

        let mut world = world;
        let sword = world.spawn_weapon(1, 1, 1, None).unwrap();
        assert_eq!(
            world.check_obtain(Holder::Monster(EntityId(4)), sword),
            Err(RejectReason::UnknownHolder)
        );
        assert_eq!(
            world.check_obtain(Holder::Container(sword), sword),
            Err(RejectReason::UnknownHolder)
        );
    }
}
