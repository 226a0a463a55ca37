//! Adjacency and distance between two named tokens.
use anyhow::{Context, Result};
use clap::Parser;
use tactics_core::{Anchor, EntityIndex};

use super::SessionArgs;
use crate::config::CliConfig;

/// Check whether two creatures stand next to each other
#[derive(Parser, Debug)]
pub struct Adjacent {
    #[command(flatten)]
    pub session: SessionArgs,

    /// First creature's name
    pub first: String,

    /// Second creature's name
    pub second: String,
}

impl Adjacent {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let session = self.session.load(config)?;
        let index = EntityIndex::new(Some(&session.scene), session.metric);

        let first = index
            .character_named(&self.first)
            .with_context(|| format!("no token named `{}`", self.first))?;
        let second = index
            .character_named(&self.second)
            .with_context(|| format!("no token named `{}`", self.second))?;

        let distance = session.metric.distance(first.position, second.position);
        let adjacent = session
            .metric
            .is_adjacent(&Anchor::from(&first), &Anchor::from(&second));

        println!(
            "{} and {} are {} ({distance:.2} squares apart)",
            first.name,
            second.name,
            if adjacent { "adjacent" } else { "not adjacent" }
        );
        Ok(())
    }
}
