//! Shaman heal channelled through a spirit companion.
//!
//! Targets picked within 5 squares spend a surge and regain its value plus
//! the caster's Constitution modifier, doubled when they stand next to the
//! spirit. Allies next to the spirit then gain temporary hit points equal to
//! the caster's Wisdom modifier.
use tactics_content::Ability;
use tactics_core::{Anchor, Character, FactionFilter, Selection, TargetQuery, TargetingError};
use tracing::{info, warn};

use super::{PowerContext, PowerReport, PowerSummary, names};
use crate::api::Result;
use crate::chat::ChatMessage;
use crate::host::{HealRequest, HostError};
use crate::vfx::{PowerSource, Timing, VfxSequence};

const NAME: &str = "Healing Spirit";
const AURA: &str = "Strengthening Spirit";

pub async fn healing_spirit(ctx: &PowerContext<'_>, spirit: &str) -> Result<PowerReport> {
    let host = &ctx.host;
    let caster = &ctx.caster;
    let actors = host.actors()?;
    let index = ctx.index();

    let spirit = index
        .character_named(spirit)
        .ok_or_else(|| TargetingError::NameNotFound(spirit.to_string()))?;
    let con = actors.ability_mod(&caster.actor, Ability::Con);
    let wis = actors.ability_mod(&caster.actor, Ability::Wis);

    let query = TargetQuery::from_character(caster, &index).with_range(5);
    let Selection::Selected(targets) = ctx
        .picker
        .select_characters(&query, &index, ctx.icon())
        .await?
    else {
        return Ok(PowerReport::Cancelled);
    };

    let mut summary = PowerSummary::new(NAME);
    let health = host.health()?;
    let vfx = host.vfx()?;
    let spirit_anchor = Anchor::from(&spirit);

    for target in targets {
        let near_spirit = ctx.metric.is_adjacent(&spirit_anchor, &Anchor::from(&target));
        let bonus = if near_spirit { con * 2 } else { con };

        match health.heal(&target.actor, HealRequest::surge(bonus)).await {
            Ok(()) => {}
            Err(err @ HostError::Rejected { .. }) => {
                warn!(target = %target.name, %err, "heal refused");
                host.warn(format!("{} cannot spend a healing surge.", target.name));
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        let animation = match ctx.icon() {
            Some(icon) => VfxSequence::custom(icon, &target, 0.5)
                .with_timing(Timing::new(500, 2500, 1000)),
            None => VfxSequence::healing(&target, PowerSource::Nature),
        };
        vfx.play(&animation).await?;

        let surge_value = actors.healing_surges(&target.actor).map_or(0, |pool| pool.value);
        summary.healed.push((target, surge_value + bonus));
    }

    let adjacent: Vec<Character> = TargetQuery::from_anchors([spirit_anchor])
        .with_radius(1)
        .with_faction(FactionFilter::Allies, Some(spirit.disposition))
        .evaluate(&index);

    for ally in &adjacent {
        health.temp_heal(&ally.actor, wis).await?;
        vfx.play(&VfxSequence::aura(ally, PowerSource::Nature)).await?;
        summary.temp_hp.push((ally.clone(), wis));
    }
    if !adjacent.is_empty() {
        host.post(ChatMessage::temp_hp(&spirit.name, &names(&adjacent), wis, AURA));
    }

    info!(
        caster = %caster.name,
        healed = summary.healed.len(),
        strengthened = summary.temp_hp.len(),
        "healing spirit resolved"
    );
    Ok(PowerReport::Resolved(summary))
}
