//! Reference scenarios.
//!
//! Each scenario builds a fresh world, performs the moves it describes and
//! checks the outcome. A failed check aborts with an error naming the
//! scenario.

use anyhow::{Context, Result, ensure};
use clap::Parser;
use possession_core::{
    ContentDepth, GameConfig, HoldingError, Holder, Monster, RejectReason, World,
};
use tracing::info;

/// Run the reference scenarios and report each result
#[derive(Parser, Debug)]
pub struct Scenarios {
    /// Run only the scenario with this name
    #[arg(long)]
    pub only: Option<String>,
}

type Scenario = fn(GameConfig) -> Result<()>;

const SCENARIOS: &[(&str, Scenario)] = &[
    ("backpack-capacity", backpack_capacity),
    ("purse-tear", purse_tear),
    ("anchor-occupancy", anchor_occupancy),
    ("failed-swap", failed_swap),
    ("nested-backpacks", nested_backpacks),
];

impl Scenarios {
    pub fn execute(self, config: GameConfig) -> Result<()> {
        let selected: Vec<_> = SCENARIOS
            .iter()
            .filter(|(name, _)| self.only.as_deref().is_none_or(|only| only == *name))
            .collect();
        if selected.is_empty() {
            anyhow::bail!("no scenario named {:?}", self.only.unwrap_or_default());
        }

        for (name, run) in selected {
            info!(scenario = name, "running");
            run(config.clone()).with_context(|| format!("scenario {name} failed"))?;
            println!("ok  {name}");
        }
        Ok(())
    }
}

fn backpack_capacity(config: GameConfig) -> Result<()> {
    let mut world = World::new(config);
    let backpack = world.spawn_backpack(110, 5, 5, 110, None)?;
    let light = world.spawn_weapon(10, 5, 5, None)?;
    let heavy = world.spawn_weapon(10, 50_000_000, 5, None)?;

    world.equip(Holder::Container(backpack), light)?;
    ensure!(world.content_weight(backpack)? == 5);

    let refused = world.equip(Holder::Container(backpack), heavy);
    ensure!(matches!(refused, Err(HoldingError::CannotObtain { .. })));
    ensure!(world.content_weight(backpack)? == 5);
    Ok(())
}

fn purse_tear(config: GameConfig) -> Result<()> {
    let mut world = World::new(config);
    let purse = world.spawn_purse(111, 0, 10, 10, 0, None)?;

    let outcome = world.add_dukats(purse, 15)?;
    ensure!(outcome.is_torn());
    ensure!(world.effective_value(purse)? == 0);
    Ok(())
}

fn anchor_occupancy(config: GameConfig) -> Result<()> {
    let mut world = World::new(config);
    let sword = world.spawn_weapon(10, 5, 5, None)?;
    let backpack = world.spawn_backpack(110, 5, 5, 5, None)?;
    let grog = world.spawn_monster(
        Monster::builder("Grog")
            .damage(5)
            .protection(5)
            .strength(100)
            .anchors(4)
            .weapon(sword)
            .backpack(backpack),
    )?;
    let dagger = world.spawn_weapon(2, 2, 2, None)?;

    let refused = world.equip_in_anchor(grog, dagger, 2);
    ensure!(matches!(refused, Err(HoldingError::SlotOccupied { .. })));
    world.equip_in_anchor(grog, dagger, 3)?;
    ensure!(world.monster(grog)?.nb_free_anchors() == 1);
    Ok(())
}

fn failed_swap(config: GameConfig) -> Result<()> {
    let mut world = World::new(config);
    let old = world.spawn_weapon(1, 5, 5, None)?;
    let new = world.spawn_weapon(1, 20_000, 5, None)?;
    let grog = world.spawn_monster(Monster::builder("Grog").strength(1).weapon(old))?;

    let refused = world.swap_item(grog, old, new);
    ensure!(refused.is_err_and(|err| err.reject_reason() == Some(RejectReason::OverCapacity)));
    ensure!(world.monster(grog)?.anchor(GameConfig::WEAPON_ANCHOR).is_none());
    ensure!(world.holder(old)?.is_none() && world.holder(new)?.is_none());
    Ok(())
}

fn nested_backpacks(config: GameConfig) -> Result<()> {
    let mut world = World::new(config);
    let outer = world.spawn_backpack(1, 2, 1, 1_000, None)?;
    let grog = world.spawn_monster(Monster::builder("Grog").backpack(outer))?;
    let inner = world.spawn_backpack(3, 2, 1, 500, Some(Holder::Container(outer)))?;
    let purse = world.spawn_purse(5, 1, 1, 10, 4, Some(Holder::Container(inner)))?;

    ensure!(world.indirect_holder(purse)? == Some(grog));
    ensure!(world.check_obtain(Holder::Container(inner), outer) == Err(RejectReason::WouldCreateCycle));
    ensure!(world.all_item_ids(grog, ContentDepth::SHALLOW)?.len() == 2);
    ensure!(world.all_item_ids(grog, ContentDepth::Unbounded)?.len() == 3);
    world.check_invariants()?;
    Ok(())
}
