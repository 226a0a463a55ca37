//! Triggered benefits the shaman's spirit companion grants to allies next to
//! it. The spirit speaks the chat line; the shaman supplies the modifiers.
use tactics_content::Ability;
use tactics_core::{Anchor, Character, FactionFilter, TargetQuery, TargetingError};
use tracing::info;

use super::{PowerContext, PowerReport, PowerSummary, names};
use crate::api::Result;
use crate::chat::ChatMessage;
use crate::combat::roll_formula;
use crate::host::{HealRequest, RollRequest};
use crate::vfx::{PowerSource, VfxSequence};

const SHARING: &str = "Sharing the Kill";
const PROTECTING: &str = "Protecting Strike";

/// Allies next to the spirit regain 1d6 + the shaman's Wisdom modifier.
pub async fn sharing_the_kill(ctx: &PowerContext<'_>, spirit: &str) -> Result<PowerReport> {
    let host = &ctx.host;
    let (spirit, allies) = allies_near(ctx, spirit)?;
    let mut summary = PowerSummary::new(SHARING);
    if allies.is_empty() {
        return Ok(PowerReport::Resolved(summary));
    }

    let wis = host.actors()?.ability_mod(&ctx.caster.actor, Ability::Wis);
    let roll = roll_formula(host, RollRequest::new("1d6 + @wis").bind("wis", wis)).await?;

    let health = host.health()?;
    let vfx = host.vfx()?;
    for ally in &allies {
        health.heal(&ally.actor, HealRequest::flat(roll.total)).await?;
        vfx.play(&VfxSequence::healing(ally, PowerSource::Nature))
            .await?;
        summary.healed.push((ally.clone(), roll.total));
    }
    host.post(ChatMessage::healing(&spirit.name, &names(&allies), roll.total, SHARING));

    info!(
        spirit = %spirit.name,
        allies = allies.len(),
        amount = roll.total,
        "sharing the kill resolved"
    );
    Ok(PowerReport::Resolved(summary))
}

/// Allies next to the spirit gain the shaman's Constitution modifier in
/// temporary hit points.
pub async fn protecting_strike(ctx: &PowerContext<'_>, spirit: &str) -> Result<PowerReport> {
    let host = &ctx.host;
    let (spirit, allies) = allies_near(ctx, spirit)?;
    let mut summary = PowerSummary::new(PROTECTING);
    if allies.is_empty() {
        return Ok(PowerReport::Resolved(summary));
    }

    let con = host.actors()?.ability_mod(&ctx.caster.actor, Ability::Con);
    let health = host.health()?;
    for ally in &allies {
        health.temp_heal(&ally.actor, con).await?;
        summary.temp_hp.push((ally.clone(), con));
    }
    host.post(ChatMessage::temp_hp(&spirit.name, &names(&allies), con, PROTECTING));

    info!(
        spirit = %spirit.name,
        allies = allies.len(),
        amount = con,
        "protecting strike resolved"
    );
    Ok(PowerReport::Resolved(summary))
}

fn allies_near(ctx: &PowerContext<'_>, spirit: &str) -> Result<(Character, Vec<Character>)> {
    let index = ctx.index();
    let spirit = index
        .character_named(spirit)
        .ok_or_else(|| TargetingError::NameNotFound(spirit.to_string()))?;
    let allies = TargetQuery::from_anchors([Anchor::from(&spirit)])
        .with_radius(1)
        .with_faction(FactionFilter::Allies, Some(spirit.disposition))
        .evaluate(&index);
    Ok((spirit, allies))
}
