//! Anchor-level equipment management for monsters.

use tracing::debug;

use super::transfer::Slot;
use super::{ContentDepth, EntityId, HoldingError, Holder, ItemHandle, ItemId, RejectReason, World};

impl World {
    /// Equips `item` into a specific anchor of `monster`.
    ///
    /// Checked in order: the monster exists, the anchor is in range, the
    /// anchor is empty, the monster can obtain the item.
    pub fn equip_in_anchor(
        &mut self,
        monster: EntityId,
        item: ItemHandle,
        anchor: usize,
    ) -> Result<(), HoldingError> {
        let target = self.monster(monster)?;
        let anchors = target.nb_anchors();
        if anchor >= anchors {
            return Err(HoldingError::IndexOutOfRange { anchor, anchors });
        }
        if let Some(occupant) = target.anchor(anchor) {
            return Err(HoldingError::SlotOccupied { anchor, occupant });
        }

        let holder = Holder::Monster(monster);
        if self.holder(item).ok().flatten() == Some(holder) {
            return Err(HoldingError::CannotObtain {
                item,
                reason: RejectReason::AlreadyHeld,
            });
        }
        // The free-anchor rule is satisfied by `anchor` itself.
        self.check_obtain(holder, item).map_err(|reason| {
            debug!(%item, %monster, anchor, %reason, "equip in anchor refused");
            HoldingError::CannotObtain { item, reason }
        })?;

        self.transfer(item, Some(Slot::Anchor(monster, anchor)));
        Ok(())
    }

    /// Takes `item` off `monster`, leaving its anchor empty and the item free.
    pub fn unequip(&mut self, monster: EntityId, item: ItemHandle) -> Result<usize, HoldingError> {
        self.item(item)?;
        let anchor = self
            .monster(monster)?
            .anchor_of(item)
            .ok_or(HoldingError::NotEquipped { item, monster })?;

        self.transfer(item, None);
        Ok(anchor)
    }

    /// Replaces `old` with `new` in the same anchor.
    ///
    /// Not atomic: `old` is unequipped first, and if `new` is then refused the
    /// anchor stays empty and the refusal is returned.
    pub fn swap_item(
        &mut self,
        monster: EntityId,
        old: ItemHandle,
        new: ItemHandle,
    ) -> Result<(), HoldingError> {
        let anchor = self.unequip(monster, old)?;
        self.equip_in_anchor(monster, new, anchor).inspect_err(|err| {
            debug!(%monster, anchor, %old, %new, error = %err, "swap left anchor empty");
        })
    }

    /// Stores `item` in the first equipped backpack, in anchor order, that
    /// accepts it.
    pub fn store_in_backpack(
        &mut self,
        monster: EntityId,
        item: ItemHandle,
    ) -> Result<ItemHandle, HoldingError> {
        self.item(item)?;
        let backpacks = self.equipped_backpacks(monster)?;

        let mut first_refusal = None;
        for backpack in backpacks {
            match self.check_obtain(Holder::Container(backpack), item) {
                Ok(()) => {
                    self.transfer(item, Some(Slot::Content(backpack)));
                    return Ok(backpack);
                }
                Err(reason) => {
                    first_refusal.get_or_insert(reason);
                }
            }
        }
        Err(HoldingError::CannotObtain {
            item,
            reason: first_refusal.unwrap_or(RejectReason::NoContainer),
        })
    }

    /// Unequips a weapon. Refuses items that are not weapons.
    pub fn destroy_weapon(&mut self, monster: EntityId, weapon: ItemHandle) -> Result<(), HoldingError> {
        if !self.item(weapon)?.is_weapon() {
            return Err(HoldingError::invalid("weapon", "item is not a weapon"));
        }
        self.unequip(monster, weapon)?;
        Ok(())
    }

    /// Ids of every equipped item, then of items inside equipped backpacks
    /// down to `depth` container levels.
    pub fn all_item_ids(
        &self,
        monster: EntityId,
        depth: ContentDepth,
    ) -> Result<Vec<ItemId>, HoldingError> {
        let monster = self.monster(monster)?;
        let mut ids = Vec::new();
        let mut level: Vec<ItemHandle> = monster.equipped().collect();
        let mut descended = 0_u32;

        while !level.is_empty() {
            ids.extend(level.iter().filter_map(|&item| self.item(item).ok().map(|item| item.id())));
            descended += 1;
            if !depth.allows(descended) {
                break;
            }
            level = level
                .iter()
                .filter_map(|&item| self.backpack(item).ok())
                .flat_map(|backpack| backpack.contents().iter().copied())
                .collect();
        }
        Ok(ids)
    }

    /// Backpacks sitting directly in the monster's anchors, in anchor order.
    pub fn equipped_backpacks(&self, monster: EntityId) -> Result<Vec<ItemHandle>, HoldingError> {
        Ok(self
            .monster(monster)?
            .equipped()
            .filter(|&item| self.item(item).is_ok_and(|item| item.is_container()))
            .collect())
    }

    /// The weapon a monster fights with: the first weapon in anchor order.
    pub fn wielded_weapon(&self, monster: EntityId) -> Result<Option<ItemHandle>, HoldingError> {
        Ok(self
            .monster(monster)?
            .equipped()
            .find(|&item| self.item(item).is_ok_and(|item| item.is_weapon())))
    }
}
