//! One-shot area evaluation, no picking involved.
use anyhow::{Context, Result};
use clap::Parser;
use tactics_core::{Coordinate, EntityIndex, FactionFilter, SelfSquare, TargetQuery};

use super::{SessionArgs, print_characters};
use crate::config::CliConfig;
use crate::prompt::parse_point;

/// List the creatures inside an area
#[derive(Parser, Debug)]
pub struct Query {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Center the area on this creature's tokens
    #[arg(long, conflicts_with = "at", required_unless_present = "at")]
    pub caster: Option<String>,

    /// Center the area on a scene point, `x,y`
    #[arg(long, value_parser = parse_point)]
    pub at: Option<Coordinate>,

    /// Area radius in squares
    #[arg(long, default_value_t = 1)]
    pub radius: u32,

    /// all, allies or enemies (relative to the caster)
    #[arg(long, default_value = "all")]
    pub filter: FactionFilter,

    /// Count the center square as part of the area
    #[arg(long)]
    pub include_center: bool,
}

impl Query {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let session = self.session.load(config)?;
        let index = EntityIndex::new(Some(&session.scene), session.metric);

        let query = match (&self.caster, self.at) {
            (Some(name), _) => {
                let caster = index
                    .character_named(name)
                    .with_context(|| format!("no token named `{name}`"))?;
                TargetQuery::from_character(&caster, &index)
            }
            (None, Some(point)) => TargetQuery::from_point(point),
            (None, None) => anyhow::bail!("pass --caster or --at"),
        };
        let self_square = if self.include_center {
            SelfSquare::Include
        } else {
            SelfSquare::Exclude
        };
        let query = query
            .with_radius(self.radius)
            .with_filter(self.filter)
            .with_self_square(self_square);

        print_characters(&query.evaluate(&index));
        Ok(())
    }
}
