//! Authoritative possession state.
//!
//! [`World`] owns every item and monster and is the only place the holder
//! graph changes. Items point at their holder through [`Holder`]; holders list
//! their items in anchors or backpack contents. Both sides are updated
//! together by a single private transfer path, so callers never observe one
//! side without the other.
mod container;
mod dukats;
mod equipment;
mod error;
mod holder;
mod registry;
mod transfer;
pub mod types;

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::env::RngOracle;

pub use error::{HoldingError, RejectReason};
pub use registry::Registry;
pub use types::{
    Anchors, Backpack, ContentDepth, DukatOutcome, EntityId, Holder, Item, ItemCategory,
    ItemHandle, ItemId, ItemKind, Monster, MonsterBuilder, Purse, Weapon,
};

use crate::validation;

/// Arena of items and monsters plus the per-world [`Registry`].
///
/// Handles returned by the `spawn_*` methods stay valid for the lifetime of
/// the world. Every rejected operation leaves the world unchanged unless its
/// documentation says otherwise.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    registry: Registry,
    items: Vec<Item>,
    monsters: Vec<Monster>,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        let registry = Registry::new(&config);
        Self::with_registry(config, registry)
    }

    /// Creates a world drawing weapon ids and attack rolls from `rng`.
    pub fn with_rng(config: GameConfig, rng: impl RngOracle + 'static) -> Self {
        let registry = Registry::with_rng(&config, rng);
        Self::with_registry(config, registry)
    }

    fn with_registry(config: GameConfig, registry: Registry) -> Self {
        Self {
            config,
            registry,
            items: Vec::new(),
            monsters: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn nb_items(&self) -> usize {
        self.items.len()
    }

    pub fn nb_monsters(&self) -> usize {
        self.monsters.len()
    }

    /// Every item handle in spawn order.
    pub fn item_handles(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        (0..self.items.len()).map_while(|index| u32::try_from(index).ok().map(ItemHandle))
    }

    /// Every monster id in spawn order.
    pub fn monster_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.monsters.len()).map_while(|index| u32::try_from(index).ok().map(EntityId))
    }

    pub fn item(&self, item: ItemHandle) -> Result<&Item, HoldingError> {
        self.items
            .get(item.index())
            .ok_or(HoldingError::NullItem { item })
    }

    pub(crate) fn item_mut(&mut self, item: ItemHandle) -> Result<&mut Item, HoldingError> {
        self.items
            .get_mut(item.index())
            .ok_or(HoldingError::NullItem { item })
    }

    pub fn monster(&self, monster: EntityId) -> Result<&Monster, HoldingError> {
        self.monsters
            .get(monster.index())
            .ok_or(HoldingError::UnknownMonster { monster })
    }

    /// Mutable access for stat changes. Anchors can only change through the
    /// world's equipment operations.
    pub fn monster_mut(&mut self, monster: EntityId) -> Result<&mut Monster, HoldingError> {
        self.monsters
            .get_mut(monster.index())
            .ok_or(HoldingError::UnknownMonster { monster })
    }

    /// The backpack data of `container`, which must be a backpack.
    pub fn backpack(&self, container: ItemHandle) -> Result<&Backpack, HoldingError> {
        self.item(container)?
            .as_backpack()
            .ok_or(HoldingError::invalid("container", "item is not a backpack"))
    }

    pub fn holder(&self, item: ItemHandle) -> Result<Option<Holder>, HoldingError> {
        Ok(self.item(item)?.holder())
    }

    // ------------------------------------------------------------------------
    // Weight and value
    // ------------------------------------------------------------------------

    /// Weight including dukats and, for backpacks, everything inside.
    pub fn effective_weight(&self, item: ItemHandle) -> Result<u64, HoldingError> {
        self.item(item)?;
        Ok(self.weight_of(item))
    }

    /// Value including dukats and, for backpacks, everything inside.
    pub fn effective_value(&self, item: ItemHandle) -> Result<u64, HoldingError> {
        self.item(item)?;
        Ok(self.value_of(item))
    }

    /// Summed effective weight of a backpack's contents.
    pub fn content_weight(&self, container: ItemHandle) -> Result<u64, HoldingError> {
        let backpack = self.backpack(container)?;
        Ok(self.sum_weights(backpack.contents()))
    }

    /// Summed effective weight of everything in the monster's anchors.
    pub fn equipment_load(&self, monster: EntityId) -> Result<u64, HoldingError> {
        let monster = self.monster(monster)?;
        Ok(monster
            .equipped()
            .fold(0, |load, item| load.saturating_add(self.weight_of(item))))
    }

    pub fn equipment_value(&self, monster: EntityId) -> Result<u64, HoldingError> {
        let monster = self.monster(monster)?;
        Ok(monster
            .equipped()
            .fold(0, |total, item| total.saturating_add(self.value_of(item))))
    }

    /// Weight of a handle known to be live. Dangling handles weigh nothing.
    pub(crate) fn weight_of(&self, item: ItemHandle) -> u64 {
        let Some(item) = self.items.get(item.index()) else {
            return 0;
        };
        let own = item.own_weight();
        match item.kind() {
            ItemKind::Weapon(_) => own,
            ItemKind::Purse(purse) => own.saturating_add(purse.dukat_weight()),
            ItemKind::Backpack(backpack) => own.saturating_add(self.sum_weights(backpack.contents())),
        }
    }

    pub(crate) fn value_of(&self, item: ItemHandle) -> u64 {
        let Some(item) = self.items.get(item.index()) else {
            return 0;
        };
        let own = item.own_value();
        match item.kind() {
            ItemKind::Weapon(_) => own,
            ItemKind::Purse(purse) => own.saturating_add(u64::from(purse.dukats())),
            ItemKind::Backpack(backpack) => backpack
                .contents()
                .iter()
                .fold(own, |total, &inner| total.saturating_add(self.value_of(inner))),
        }
    }

    fn sum_weights(&self, items: &[ItemHandle]) -> u64 {
        items
            .iter()
            .fold(0, |total, &inner| total.saturating_add(self.weight_of(inner)))
    }

    /// The monster ultimately carrying `item`, through any number of backpacks.
    pub fn indirect_holder(&self, item: ItemHandle) -> Result<Option<EntityId>, HoldingError> {
        let start = self.item(item)?.holder();
        Ok(self.holder_chain(start).find_map(Holder::as_monster))
    }

    /// Walks from `start` up through enclosing backpacks, ending at a monster
    /// or at a backpack nobody holds.
    pub(crate) fn holder_chain(&self, start: Option<Holder>) -> impl Iterator<Item = Holder> + '_ {
        std::iter::successors(start, |holder| match holder {
            Holder::Monster(_) => None,
            Holder::Container(container) => self
                .items
                .get(container.index())
                .and_then(Item::holder),
        })
    }

    // ------------------------------------------------------------------------
    // Spawning
    // ------------------------------------------------------------------------

    /// Creates a weapon with a freshly allocated id and places it with `holder`.
    ///
    /// If the placement is refused the weapon is not created and its id is
    /// returned to the registry.
    pub fn spawn_weapon(
        &mut self,
        value: u64,
        weight: u64,
        damage: u32,
        holder: Option<Holder>,
    ) -> Result<ItemHandle, HoldingError> {
        if !Weapon::is_valid_damage(damage, self.registry.max_weapon_damage()) {
            return Err(HoldingError::invalid(
                "damage",
                "must lie between the minimum and the current weapon damage ceiling",
            ));
        }
        if !Weapon::is_valid_value(value) {
            return Err(HoldingError::invalid(
                "value",
                "weapon value exceeds MAX_WEAPON_VALUE",
            ));
        }

        let id = self.registry.next_weapon_id();
        let item = Item::new(id, weight, value, ItemKind::Weapon(Weapon::new(damage)));
        self.spawn_item(item, holder).inspect_err(|_| {
            self.registry.release_weapon_id(id);
        })
    }

    /// Creates a purse.
    ///
    /// `id` is rounded onto the Fibonacci sequence, a non-positive capacity
    /// becomes 1 and a negative dukat count becomes 0. Starting dukats above
    /// the capacity tear the purse before it is placed.
    pub fn spawn_purse(
        &mut self,
        id: i64,
        weight: u64,
        value: u64,
        capacity: i64,
        dukats: i64,
        holder: Option<Holder>,
    ) -> Result<ItemHandle, HoldingError> {
        let mut purse = Purse::with_capacity(capacity);
        let mut value = value;
        let dukats = u32::try_from(dukats.max(0)).unwrap_or(u32::MAX);
        if purse.would_tear(dukats) {
            info!(dukats, capacity = purse.capacity(), "purse torn at creation");
            value = 0;
        } else {
            purse.store(dukats);
        }

        let item = Item::new(Purse::normalize_id(id), weight, value, ItemKind::Purse(purse));
        self.spawn_item(item, holder)
    }

    /// Creates an empty backpack. `id` is normalised to an odd positive number.
    pub fn spawn_backpack(
        &mut self,
        id: i64,
        weight: u64,
        value: u64,
        capacity: i64,
        holder: Option<Holder>,
    ) -> Result<ItemHandle, HoldingError> {
        if !validation::is_valid_capacity(capacity) {
            return Err(HoldingError::invalid("capacity", "must not be negative"));
        }
        let backpack = Backpack::new(capacity.unsigned_abs());
        let item = Item::new(
            Backpack::normalize_id(id),
            weight,
            value,
            ItemKind::Backpack(backpack),
        );
        self.spawn_item(item, holder)
    }

    /// Pushes `item` and places it with `holder`, popping it again on refusal.
    fn spawn_item(&mut self, item: Item, holder: Option<Holder>) -> Result<ItemHandle, HoldingError> {
        let handle = ItemHandle(next_index(self.items.len(), "item")?);
        let category = item.category();
        self.items.push(item);

        if let Some(holder) = holder {
            if let Err(reason) = self.check_obtain(holder, handle) {
                self.items.pop();
                debug!(%handle, %holder, %reason, "spawn refused");
                return Err(HoldingError::InvalidHolder {
                    item: handle,
                    holder,
                    reason,
                });
            }
            self.place(holder, handle);
        }

        debug!(%handle, %category, "spawned item");
        Ok(handle)
    }

    /// Creates a monster and places its starting equipment.
    ///
    /// The weapon goes to [`GameConfig::WEAPON_ANCHOR`], the backpack to
    /// [`GameConfig::BACKPACK_ANCHOR`], stowed items into that backpack. If
    /// any placement fails, every earlier placement is undone and no monster
    /// is created.
    pub fn spawn_monster(&mut self, builder: MonsterBuilder) -> Result<EntityId, HoldingError> {
        let monster = builder.validated(
            self.registry.max_monster_damage(),
            self.config.max_protection,
        )?;
        let id = EntityId(next_index(self.monsters.len(), "monster")?);
        self.monsters.push(monster);

        let mut placed = Vec::new();
        if let Err(err) = self.place_starting_equipment(id, &builder, &mut placed) {
            for item in placed.into_iter().rev() {
                self.transfer(item, None);
            }
            self.monsters.pop();
            debug!(monster = %id, error = %err, "monster spawn rolled back");
            return Err(err);
        }

        info!(
            monster = %id,
            name = builder.name.as_str(),
            anchors = builder.anchors,
            "spawned monster"
        );
        Ok(id)
    }

    /// Places the builder's items, recording each successful placement in
    /// `placed` so a failure can be unwound in reverse.
    fn place_starting_equipment(
        &mut self,
        monster: EntityId,
        builder: &MonsterBuilder,
        placed: &mut Vec<ItemHandle>,
    ) -> Result<(), HoldingError> {
        if let Some(weapon) = builder.weapon {
            if !self.item(weapon)?.is_weapon() {
                return Err(HoldingError::invalid("weapon", "starting weapon is not a weapon"));
            }
            self.equip_in_anchor(monster, weapon, GameConfig::WEAPON_ANCHOR)?;
            placed.push(weapon);
        }
        if let Some(backpack) = builder.backpack {
            if !self.item(backpack)?.is_container() {
                return Err(HoldingError::invalid(
                    "backpack",
                    "starting backpack is not a backpack",
                ));
            }
            self.equip_in_anchor(monster, backpack, GameConfig::BACKPACK_ANCHOR)?;
            placed.push(backpack);
            for &item in &builder.stowed {
                self.equip(Holder::Container(backpack), item)?;
                placed.push(item);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Validated setters
    // ------------------------------------------------------------------------

    /// Replaces an item's base value. Weapons are capped at
    /// [`GameConfig::MAX_WEAPON_VALUE`].
    pub fn set_item_value(&mut self, item: ItemHandle, value: u64) -> Result<(), HoldingError> {
        let target = self.item_mut(item)?;
        if target.is_weapon() && !Weapon::is_valid_value(value) {
            return Err(HoldingError::invalid(
                "value",
                "weapon value exceeds MAX_WEAPON_VALUE",
            ));
        }
        target.set_value(value);
        Ok(())
    }

    /// Re-identifies a backpack or purse under its kind's normalisation
    /// policy. Weapon ids are fixed for life.
    pub fn set_item_id(&mut self, item: ItemHandle, id: i64) -> Result<ItemId, HoldingError> {
        let target = self.item_mut(item)?;
        let normalized = match target.kind() {
            ItemKind::Weapon(_) => {
                return Err(HoldingError::invalid("id", "weapon ids cannot change"));
            }
            ItemKind::Purse(_) => Purse::normalize_id(id),
            ItemKind::Backpack(_) => Backpack::normalize_id(id),
        };
        target.set_id(normalized);
        Ok(normalized)
    }

    /// Sets a monster's base damage, clamped into the current damage range.
    pub fn set_monster_damage(&mut self, monster: EntityId, damage: i64) -> Result<u32, HoldingError> {
        let ceiling = self.registry.max_monster_damage();
        let monster = self.monster_mut(monster)?;
        monster.set_damage_clamped(damage, ceiling);
        Ok(monster.damage())
    }

    // ------------------------------------------------------------------------
    // Consistency
    // ------------------------------------------------------------------------

    /// Verifies the whole holder graph agrees with itself.
    ///
    /// Checks that back-references and membership match in both directions,
    /// that no item is listed twice, that no backpack contains itself, that
    /// capacities hold and that backpack contents are sorted by weight.
    pub fn check_invariants(&self) -> Result<(), HoldingError> {
        let mut listed = vec![0_u32; self.items.len()];
        let violation = |item: ItemHandle, detail: &'static str| {
            Err(HoldingError::InvariantViolated { item, detail })
        };

        for (id, monster) in self.monster_ids().zip(&self.monsters) {
            for item in monster.equipped() {
                let Some(entry) = listed.get_mut(item.index()) else {
                    return violation(item, "anchor holds a dangling handle");
                };
                *entry += 1;
                if self.items[item.index()].holder() != Some(Holder::Monster(id)) {
                    return violation(item, "anchored item does not point back at its monster");
                }
            }
            let load = monster
                .equipped()
                .fold(0_u64, |load, item| load.saturating_add(self.weight_of(item)));
            if load > monster.carrying_capacity() {
                if let Some(item) = monster.equipped().next() {
                    return violation(item, "monster carries more than its capacity");
                }
            }
        }

        for handle in self.item_handles() {
            let item = &self.items[handle.index()];
            if let Some(backpack) = item.as_backpack() {
                let mut previous = 0_u64;
                for &inner in backpack.contents() {
                    let Some(entry) = listed.get_mut(inner.index()) else {
                        return violation(handle, "backpack holds a dangling handle");
                    };
                    *entry += 1;
                    if self.items[inner.index()].holder() != Some(Holder::Container(handle)) {
                        return violation(inner, "stored item does not point back at its backpack");
                    }
                    let weight = self.weight_of(inner);
                    if weight < previous {
                        return violation(handle, "backpack contents are not sorted by weight");
                    }
                    previous = weight;
                }
                if self.sum_weights(backpack.contents()) > backpack.capacity() {
                    return violation(handle, "backpack holds more than its capacity");
                }
                if self
                    .holder_chain(item.holder())
                    .any(|holder| holder == Holder::Container(handle))
                {
                    return violation(handle, "backpack contains itself");
                }
            }
        }

        for handle in self.item_handles() {
            let expected = u32::from(self.items[handle.index()].holder().is_some());
            if listed[handle.index()] != expected {
                return violation(handle, "holder back-reference and membership disagree");
            }
        }
        Ok(())
    }
}

/// Index the next pushed element of an arena of length `len` will get.
fn next_index(len: usize, arena: &'static str) -> Result<u32, HoldingError> {
    u32::try_from(len).map_err(|_| HoldingError::ArenaFull { arena })
}
