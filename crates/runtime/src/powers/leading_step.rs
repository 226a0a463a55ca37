//! Avenger escape that drags an adjacent enemy along.
//!
//! The avenger teleports up to 5 squares, then pulls one adjacent enemy to a
//! square next to where the avenger landed.
use tactics_core::{Anchor, Character, EntityResolver, FactionFilter, Selection, TargetQuery};
use tracing::info;

use super::{PowerContext, PowerReport, PowerSummary};
use crate::api::Result;
use crate::chat::ChatMessage;
use crate::vfx::{PowerSource, VfxSequence};

const NAME: &str = "Leading Step";
const RANGE: u32 = 5;

pub async fn leading_step(ctx: &PowerContext<'_>) -> Result<PowerReport> {
    let host = &ctx.host;
    let avenger = &ctx.caster;
    let index = ctx.index();
    let vfx = host.vfx()?;

    let adjacent = EntityResolver::dedupe(
        index.adjacent_to(&Anchor::from(avenger), avenger.disposition.opposite()),
    );
    let enemy = match adjacent.as_slice() {
        [] => {
            let reason = "No adjacent enemies found to target.";
            host.warn(reason);
            return Ok(PowerReport::Aborted {
                reason: reason.to_string(),
            });
        }
        [only] => only.clone(),
        _ => {
            let query = TargetQuery::from_character(avenger, &index)
                .with_range(1)
                .with_filter(FactionFilter::Enemies);
            match pick_one(ctx, &query).await? {
                Some(enemy) => enemy,
                None => return Ok(PowerReport::Cancelled),
            }
        }
    };

    let query = TargetQuery::from_character(avenger, &index).with_range(RANGE);
    let Selection::Selected(area) = ctx.picker.select_point(&query, &ctx.metric, ctx.icon()).await?
    else {
        return Ok(PowerReport::Cancelled);
    };
    let destination = area.single_origin()?;
    vfx.play(&VfxSequence::teleport(avenger, destination, PowerSource::Divine))
        .await?;
    let landed = ctx.metric.snap_to_grid(destination);

    let mut summary = PowerSummary::new(NAME);
    summary.teleported_to = Some(landed);

    // Measured from the square the avenger landed on, not the one it left.
    let pull = TargetQuery::from_point(landed).with_range(1);
    let Selection::Selected(area) = ctx.picker.select_point(&pull, &ctx.metric, ctx.icon()).await?
    else {
        host.post(ChatMessage::power(
            &avenger.name,
            NAME,
            format!(
                "{} teleports away from {}, but fails to pull them along!",
                avenger.name, enemy.name
            ),
        ));
        return Ok(PowerReport::Resolved(summary));
    };
    let enemy_destination = area.single_origin()?;

    if !ctx
        .metric
        .is_adjacent(&Anchor::Point(landed), &Anchor::Point(enemy_destination))
    {
        host.warn(
            "Enemy destination must be adjacent to your new position. Please select an adjacent square.",
        );
        host.post(ChatMessage::power(
            &avenger.name,
            NAME,
            format!(
                "{} teleports away, but {} resists being pulled along!",
                avenger.name, enemy.name
            ),
        ));
        return Ok(PowerReport::Resolved(summary));
    }

    vfx.play(&VfxSequence::teleport(&enemy, enemy_destination, PowerSource::Radiant))
        .await?;
    vfx.play(&VfxSequence::beam(landed, enemy_destination, PowerSource::Divine))
        .await?;
    host.post(ChatMessage::power(
        &avenger.name,
        NAME,
        format!(
            "{} teleports away from {}'s attack, then yanks the enemy along to a new position!",
            avenger.name, enemy.name
        ),
    ));

    let pulled_to = ctx.metric.snap_to_grid(enemy_destination);
    info!(
        avenger = %avenger.name,
        enemy = %enemy.name,
        %landed,
        %pulled_to,
        "leading step resolved"
    );
    summary.pulled.push((enemy, pulled_to));
    Ok(PowerReport::Resolved(summary))
}

async fn pick_one(ctx: &PowerContext<'_>, query: &TargetQuery) -> Result<Option<Character>> {
    let index = ctx.index();
    Ok(ctx
        .picker
        .select_characters(query, &index, ctx.icon())
        .await?
        .into_option()
        .and_then(|selected| selected.into_iter().next()))
}
