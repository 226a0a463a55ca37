//! Subcommands of the `tactics` binary.
mod adjacent;
mod pick;
mod query;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tactics_core::Character;

use crate::config::{CliConfig, Session};

pub use adjacent::Adjacent;
pub use pick::Pick;
pub use query::Query;

/// Where the scene and grid come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Scene snapshot (.ron or .json) [env: TACTICS_SCENE]
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Grid configuration TOML [env: TACTICS_GRID_CONFIG]
    #[arg(long)]
    pub grid_config: Option<PathBuf>,
}

impl SessionArgs {
    pub fn load(&self, config: &CliConfig) -> Result<Session> {
        config
            .clone()
            .with_overrides(self.grid_config.clone(), self.scene.clone())
            .load()
    }
}

pub(crate) fn print_characters(characters: &[Character]) {
    if characters.is_empty() {
        println!("no creatures");
        return;
    }
    for character in characters {
        println!(
            "{:<20} {:<12} {:<16} {}",
            character.name,
            character.disposition.to_string(),
            character.token.to_string(),
            character.position
        );
    }
}
