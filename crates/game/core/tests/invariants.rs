//! Randomised operation sequences checked against the graph invariants.
//!
//! Operations are drawn from the crate's own deterministic RNG so every run
//! replays the same sequence.

use possession_core::env::{RollStream, compute_seed};
use possession_core::{
    ContentDepth, EntityId, GameConfig, Holder, ItemHandle, Monster, PcgRng, RngOracle, World,
};

/// Debug rendering of every item and monster. Two equal snapshots mean the
/// holder graph, weights and stats are identical.
fn snapshot(world: &World) -> Vec<String> {
    let items = world
        .item_handles()
        .map(|handle| format!("{:?}", world.item(handle)));
    let monsters = world
        .monster_ids()
        .map(|id| format!("{:?}", world.monster(id)));
    items.chain(monsters).collect()
}

struct Dice {
    seed: u64,
    nonce: u64,
}

impl Dice {
    fn roll(&mut self, max: u32) -> u32 {
        let seed = compute_seed(self.seed, self.nonce, RollStream::Attack, 0);
        self.nonce += 1;
        PcgRng.range(seed, 0, max)
    }
}

fn populated_world() -> (World, Vec<EntityId>) {
    let mut world = World::new(GameConfig::with_seed(77));
    let monsters = ["Grog", "Mag'ra", "Old Tusk"]
        .into_iter()
        .map(|name| {
            world
                .spawn_monster(Monster::builder(name).strength(1).anchors(5))
                .expect("monster should spawn")
        })
        .collect();
    for index in 0..12 {
        let id = i64::from(index) * 2 + 1;
        world
            .spawn_backpack(id, 1 + u64::from(index % 4), 1, 400, None)
            .expect("backpack should spawn");
        world
            .spawn_weapon(u64::from(index % 20), 1 + u64::from(index) * 37, 1 + index % 20, None)
            .expect("weapon should spawn");
        world
            .spawn_purse(id, 1, 1, 4, 0, None)
            .expect("purse should spawn");
    }
    (world, monsters)
}

#[test]
fn invariants_hold_under_random_operations() {
    let (mut world, monsters) = populated_world();
    let mut dice = Dice { seed: 9, nonce: 0 };
    let nb_items = world.nb_items() as u32;

    for _ in 0..2_000 {
        let item = ItemHandle(dice.roll(nb_items - 1));
        let other = ItemHandle(dice.roll(nb_items - 1));
        let monster = monsters[dice.roll(monsters.len() as u32 - 1) as usize];
        let before = snapshot(&world);

        let (result, atomic) = match dice.roll(9) {
            0 => (world.equip(Holder::Container(other), item).map(drop), true),
            1 => (world.equip(Holder::Monster(monster), item).map(drop), true),
            2 => (world.remove_item(other, item).map(drop), true),
            3 => (world.unequip(monster, item).map(drop), true),
            4 => (world.store_in_backpack(monster, item).map(drop), true),
            5 => (world.add_dukats(item, dice.roll(5)).map(drop), true),
            6 => (world.remove_dukats(item, dice.roll(3)).map(drop), true),
            7 => (world.set_holder(item, None), true),
            8 => {
                let anchor = dice.roll(5) as usize;
                (world.equip_in_anchor(monster, item, anchor), true)
            }
            _ => (world.swap_item(monster, item, other), false),
        };

        world
            .check_invariants()
            .unwrap_or_else(|err| panic!("invariant broken: {err}"));
        if result.is_err() && atomic {
            assert_eq!(before, snapshot(&world), "rejected call changed the world");
        }
    }
}

#[test]
fn removal_is_idempotent() {
    let (mut world, monsters) = populated_world();
    let grog = monsters[0];
    let pack = ItemHandle(0);
    let knife = ItemHandle(1);

    world.equip(Holder::Monster(grog), pack).unwrap();
    world.equip(Holder::Container(pack), knife).unwrap();
    world.remove_item(pack, knife).unwrap();
    let after_first = snapshot(&world);

    for _ in 0..3 {
        assert!(world.remove_item(pack, knife).is_err());
        assert!(world.unequip(grog, knife).is_err());
        assert_eq!(snapshot(&world), after_first);
    }
}

#[test]
fn no_item_is_listed_twice_after_moves() {
    let (mut world, monsters) = populated_world();
    let pack = ItemHandle(0);
    let spare = ItemHandle(3);
    let knife = ItemHandle(1);

    world.equip(Holder::Monster(monsters[0]), pack).unwrap();
    world.equip(Holder::Monster(monsters[1]), spare).unwrap();
    world.equip(Holder::Container(pack), knife).unwrap();
    world.set_holder(knife, None).unwrap();
    world.set_holder(knife, Some(Holder::Container(spare))).unwrap();

    let everything: Vec<_> = monsters
        .iter()
        .flat_map(|&monster| world.all_item_ids(monster, ContentDepth::Unbounded).unwrap())
        .collect();
    let knife_id = world.item(knife).unwrap().id();
    assert_eq!(everything.iter().filter(|&&id| id == knife_id).count(), 1);
    assert_eq!(world.indirect_holder(knife).unwrap(), Some(monsters[1]));
    world.check_invariants().unwrap();
}
