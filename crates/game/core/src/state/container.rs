//! Backpack-specific operations.

use super::{HoldingError, Holder, ItemHandle, World};

impl World {
    /// Takes `item` out of `container`, leaving the item free.
    pub fn remove_item(&mut self, container: ItemHandle, item: ItemHandle) -> Result<(), HoldingError> {
        if !self.backpack(container)?.contains(item) {
            return Err(HoldingError::NotFound { item, container });
        }
        self.transfer(item, None);
        Ok(())
    }

    /// Equips `items` into `container` one by one.
    ///
    /// Stops at the first refusal and reports its position. Items placed
    /// before the refusal stay in the container. Returns how many were placed.
    pub fn equip_many(
        &mut self,
        container: ItemHandle,
        items: &[ItemHandle],
    ) -> Result<usize, HoldingError> {
        self.backpack(container)?;
        for (index, &item) in items.iter().enumerate() {
            self.equip(Holder::Container(container), item)
                .map_err(|source| HoldingError::BatchFailed {
                    index,
                    source: Box::new(source),
                })?;
        }
        Ok(items.len())
    }

    pub fn lowest_weight_item(&self, container: ItemHandle) -> Result<Option<ItemHandle>, HoldingError> {
        Ok(self.backpack(container)?.lowest_weight_item())
    }

    pub fn highest_weight_item(&self, container: ItemHandle) -> Result<Option<ItemHandle>, HoldingError> {
        Ok(self.backpack(container)?.highest_weight_item())
    }
}
