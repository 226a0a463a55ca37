//! Interactive pick from standard input.
use anyhow::{Context, Result};
use clap::Parser;
use tactics_core::{Coordinate, EntityIndex, FactionFilter, Selection, TargetQuery};
use tactics_runtime::{Event, EventBus, InteractivePicker, Topic};
use tokio::sync::broadcast::error::RecvError;

use super::{SessionArgs, print_characters};
use crate::config::CliConfig;
use crate::prompt::StdinPickSource;

/// Pick targets for a creature, one square per line on stdin
#[derive(Parser, Debug)]
pub struct Pick {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Creature the pick is anchored on
    #[arg(long)]
    pub caster: String,

    /// Maximum pick distance in squares
    #[arg(long, default_value_t = 5)]
    pub range: u32,

    /// Burst radius around the picked square (square picks only)
    #[arg(long, default_value_t = 0)]
    pub radius: u32,

    /// all, allies or enemies (relative to the caster)
    #[arg(long, default_value = "all")]
    pub filter: FactionFilter,

    /// Pick a square instead of a creature
    #[arg(long)]
    pub point: bool,

    /// Icon attached to the cursor
    #[arg(long)]
    pub icon: Option<String>,
}

impl Pick {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let session = self.session.load(config)?;
        let index = EntityIndex::new(Some(&session.scene), session.metric);
        let caster = index
            .character_named(&self.caster)
            .with_context(|| format!("no token named `{}`", self.caster))?;

        let bus = EventBus::new();
        let mut events = bus.subscribe(Topic::Notice);
        let printer = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(Event::Notice(notice)) => eprintln!("[{}] {}", notice.level, notice.message),
                    Ok(Event::Chat(message)) => println!("{message}"),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "notice printer fell behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        let source = StdinPickSource::new();
        let picker = InteractivePicker::new(&source, &bus);
        let query = TargetQuery::from_character(&caster, &index)
            .with_range(self.range)
            .with_filter(self.filter);

        let outcome = if self.point {
            match picker
                .select_point(&query, &session.metric, self.icon.as_deref())
                .await?
            {
                Selection::Selected(area) => {
                    let center = area.single_origin()?;
                    let square = session.metric.snap_to_grid(center);
                    match occupants(&index, center).as_slice() {
                        [] => println!("picked {square}"),
                        names => println!("picked {square} (occupied by {})", names.join(", ")),
                    }
                    Some(area.with_radius(self.radius).evaluate(&index))
                }
                Selection::Cancelled => None,
            }
        } else {
            picker
                .select_characters(&query, &index, self.icon.as_deref())
                .await?
                .into_option()
        };

        // Closing the bus lets the printer drain and stop.
        drop(bus);
        printer.await?;

        match outcome {
            Some(characters) => print_characters(&characters),
            None => println!("cancelled"),
        }
        Ok(())
    }
}

/// Names of the tokens standing on the square under `point`.
fn occupants<'a>(index: &EntityIndex<'a>, point: Coordinate) -> Vec<&'a str> {
    index
        .entities_at(point)
        .map(|entity| entity.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use tactics_core::{ActorId, Disposition, GridMetric, PlacedEntity, Scene, TokenId};

    use super::*;

    #[test]
    fn occupants_lists_stacked_tokens() {
        let token = |id: &str, name: &str, x: f64| {
            PlacedEntity::new(
                TokenId::new(id),
                ActorId::new(id),
                name,
                Coordinate::new(x, 300.0),
                Disposition::HOSTILE,
            )
        };
        let scene = Scene::new(
            "Bridge",
            vec![token("t1", "Troll", 300.0), token("t2", "Imp", 350.0), token("t3", "Bat", 500.0)],
        );
        let index = EntityIndex::new(Some(&scene), GridMetric::default());

        assert_eq!(occupants(&index, Coordinate::new(340.0, 380.0)), ["Troll", "Imp"]);
        assert!(occupants(&index, Coordinate::new(40.0, 40.0)).is_empty());
    }
}
