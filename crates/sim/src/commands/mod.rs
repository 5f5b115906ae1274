mod duel;
mod scenarios;

pub use duel::Duel;
pub use scenarios::Scenarios;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use possession_core::GameConfig;

/// World settings shared by every command.
#[derive(Args, Debug)]
pub struct WorldArgs {
    /// JSON file with a GameConfig; flags below override its fields
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for weapon ids and attack rolls
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Weapon damage ceiling
    #[arg(long, global = true)]
    pub max_weapon_damage: Option<u32>,

    /// Monster damage ceiling
    #[arg(long, global = true)]
    pub max_monster_damage: Option<u32>,

    /// Protection ceiling for new monsters
    #[arg(long, global = true)]
    pub max_protection: Option<u32>,
}

impl WorldArgs {
    pub fn into_config(self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.game_seed = seed;
        }
        if let Some(max) = self.max_weapon_damage {
            config.max_weapon_damage = max;
        }
        if let Some(max) = self.max_monster_damage {
            config.max_monster_damage = max;
        }
        if let Some(max) = self.max_protection {
            config.max_protection = max;
        }

        if !possession_core::validation::is_valid_max_damage(config.max_weapon_damage)
            || !possession_core::validation::is_valid_max_damage(config.max_monster_damage)
        {
            anyhow::bail!("damage ceilings must be at least 1");
        }
        if !possession_core::validation::is_valid_max_protection(config.max_protection) {
            anyhow::bail!("--max-protection must be 1 or a prime number");
        }
        Ok(config)
    }
}
