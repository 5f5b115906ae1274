//! Two monsters trade blows until one of them dies.

use anyhow::Result;
use clap::Parser;
use possession_core::{GameConfig, Monster, World};
use tracing::info;

/// Let two monsters fight until one dies
#[derive(Parser, Debug)]
pub struct Duel {
    /// Strength of the first monster
    #[arg(long, default_value_t = 12)]
    pub first_strength: u32,

    /// Strength of the second monster
    #[arg(long, default_value_t = 8)]
    pub second_strength: u32,

    /// Give up after this many rounds
    #[arg(long, default_value_t = 100)]
    pub max_rounds: u32,
}

impl Duel {
    pub fn execute(self, config: GameConfig) -> Result<()> {
        let mut world = World::new(config);

        let axe = world.spawn_weapon(12, 40, 7, None)?;
        let club = world.spawn_weapon(4, 60, 4, None)?;
        let grog = world.spawn_monster(
            Monster::builder("Grog")
                .damage(4)
                .protection(5)
                .max_hitpoints(40)
                .strength(self.first_strength)
                .weapon(axe),
        )?;
        let mag = world.spawn_monster(
            Monster::builder("Mag'ra")
                .damage(6)
                .protection(7)
                .max_hitpoints(40)
                .strength(self.second_strength)
                .weapon(club),
        )?;

        if possession_core::validation::is_valid_average_strength(
            self.first_strength,
            self.second_strength,
        ) {
            info!("evenly matched pairing");
        }

        for round in 1..=self.max_rounds {
            for (attacker, defender) in [(grog, mag), (mag, grog)] {
                let result = world.hit_other_monster(attacker, defender)?;
                println!(
                    "round {round:>3}: {} -> {}: {} (roll {}, hp left {})",
                    world.monster(attacker)?.name(),
                    world.monster(defender)?.name(),
                    result.outcome,
                    result.roll,
                    result.defender_hitpoints,
                );
                if world.monster(defender)?.has_died() {
                    println!("{} wins", world.monster(attacker)?.name());
                    return Ok(());
                }
            }
        }
        println!("no winner after {} rounds", self.max_rounds);
        Ok(())
    }
}
