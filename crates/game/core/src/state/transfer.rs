//! The single path through which possession changes.
//!
//! [`World::transfer`] detaches an item from whatever holds it, attaches it to
//! the new slot and re-sorts every backpack whose weight moved. Callers
//! validate first; the transfer itself cannot fail.

use tracing::debug;

use super::{EntityId, Holder, ItemHandle, World};

/// Where an item lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Anchor(EntityId, usize),
    Content(ItemHandle),
}

impl Slot {
    fn holder(self) -> Holder {
        match self {
            Self::Anchor(monster, _) => Holder::Monster(monster),
            Self::Content(container) => Holder::Container(container),
        }
    }
}

impl World {
    /// Moves `item` into `to`, or detaches it when `to` is `None`.
    ///
    /// Updates both the holder's membership and the item's back-reference.
    pub(crate) fn transfer(&mut self, item: ItemHandle, to: Option<Slot>) {
        let from = self.detach(item);
        if let Some(slot) = to {
            self.attach(item, slot);
        }

        debug!(
            %item,
            from = ?from,
            to = ?to.map(Slot::holder),
            "transfer"
        );
        self.resort_upwards(from);
        self.resort_upwards(to.map(Slot::holder));
    }

    fn detach(&mut self, item: ItemHandle) -> Option<Holder> {
        let previous = self.items.get(item.index()).and_then(|held| held.holder())?;
        match previous {
            Holder::Monster(monster) => {
                if let Some(monster) = self.monsters.get_mut(monster.index()) {
                    if let Some(anchor) = monster.anchor_of(item) {
                        monster.set_anchor(anchor, None);
                    }
                }
            }
            Holder::Container(container) => {
                if let Some(backpack) = self
                    .items
                    .get_mut(container.index())
                    .and_then(|held| held.backpack_mut())
                {
                    backpack.remove(item);
                }
            }
        }
        if let Some(held) = self.items.get_mut(item.index()) {
            held.set_holder(None);
        }
        Some(previous)
    }

    fn attach(&mut self, item: ItemHandle, slot: Slot) {
        match slot {
            Slot::Anchor(monster, anchor) => {
                if let Some(monster) = self.monsters.get_mut(monster.index()) {
                    monster.set_anchor(anchor, Some(item));
                }
            }
            Slot::Content(container) => {
                if let Some(backpack) = self
                    .items
                    .get_mut(container.index())
                    .and_then(|held| held.backpack_mut())
                {
                    backpack.push(item);
                }
            }
        }
        if let Some(held) = self.items.get_mut(item.index()) {
            held.set_holder(Some(slot.holder()));
        }
    }

    /// Re-sorts `start` and every backpack above it by effective weight.
    pub(crate) fn resort_upwards(&mut self, start: Option<Holder>) {
        let containers: Vec<ItemHandle> = self
            .holder_chain(start)
            .filter_map(Holder::as_container)
            .collect();
        for container in containers {
            self.resort(container);
        }
    }

    fn resort(&mut self, container: ItemHandle) {
        let Ok(backpack) = self.backpack(container) else {
            return;
        };
        let mut keyed: Vec<(u64, ItemHandle)> = backpack
            .contents()
            .iter()
            .map(|&inner| (self.weight_of(inner), inner))
            .collect();
        // Stable: equal weights keep insertion order.
        keyed.sort_by_key(|&(weight, _)| weight);

        if let Some(backpack) = self
            .items
            .get_mut(container.index())
            .and_then(|held| held.backpack_mut())
        {
            backpack.replace_contents(keyed.into_iter().map(|(_, inner)| inner).collect());
        }
    }
}
