//! Paladin touch heal. Spends one of the paladin's surges; the ally regains
//! the better of the two surge values plus the paladin's Charisma modifier.
use tactics_content::Ability;
use tactics_core::{FactionFilter, Selection, TargetQuery};
use tracing::info;

use super::{PowerContext, PowerReport, PowerSummary};
use crate::api::Result;
use crate::chat::ChatMessage;
use crate::host::HealRequest;
use crate::vfx::{PowerSource, VfxSequence};

const NAME: &str = "Lay on Hands";

pub async fn lay_on_hands(ctx: &PowerContext<'_>) -> Result<PowerReport> {
    let host = &ctx.host;
    let paladin = &ctx.caster;
    let actors = host.actors()?;

    let surges = actors.healing_surges(&paladin.actor).unwrap_or_default();
    if surges.is_exhausted() {
        let reason = "You don't have any healing surges left to use this power.";
        host.warn(reason);
        return Ok(PowerReport::Aborted {
            reason: reason.to_string(),
        });
    }

    let index = ctx.index();
    let query = TargetQuery::from_character(paladin, &index)
        .with_range(1)
        .with_filter(FactionFilter::Allies);
    let Selection::Selected(targets) = ctx
        .picker
        .select_characters(&query, &index, ctx.icon())
        .await?
    else {
        return Ok(PowerReport::Cancelled);
    };
    let Some(target) = targets.into_iter().next() else {
        return Ok(PowerReport::Cancelled);
    };

    let target_surge = actors
        .healing_surges(&target.actor)
        .map_or(0, |pool| pool.value);
    let amount = surges.value.max(target_surge) + actors.ability_mod(&paladin.actor, Ability::Cha);

    host.health()?
        .heal(&target.actor, HealRequest::flat(amount))
        .await?;
    host.vfx()?
        .play(&VfxSequence::healing(&target, PowerSource::Divine))
        .await?;
    actors.set_surges(&paladin.actor, surges.remaining - 1)?;

    host.post(ChatMessage::healing(
        &paladin.name,
        &[target.name.as_str()],
        amount,
        NAME,
    ));
    info!(paladin = %paladin.name, target = %target.name, amount, "lay on hands resolved");

    let mut summary = PowerSummary::new(NAME);
    summary.healed.push((target, amount));
    Ok(PowerReport::Resolved(summary))
}
