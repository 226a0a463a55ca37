//! Paladin teleport that ends next to a foe the paladin has marked.
//!
//! Range is 1 + Charisma modifier. The landing square must be adjacent to an
//! enemy under the paladin's divine sanction; the ground around the paladin
//! then turns to ice until the end of their next turn.
use tactics_content::Ability;
use tactics_core::{Anchor, EntityResolver, Selection, TargetQuery};
use tracing::info;

use super::{PowerContext, PowerReport, PowerSummary};
use crate::api::{Result, RuntimeError};
use crate::chat::ChatMessage;
use crate::effects::{DurationKind, EffectLibrary, add_effect, create_effect, has_effect_from};
use crate::vfx::{PowerSource, VfxSequence};

const NAME: &str = "Winter's Arrival";

pub async fn winter_arrival(ctx: &PowerContext<'_>) -> Result<PowerReport> {
    let host = &ctx.host;
    let paladin = &ctx.caster;
    let index = ctx.index();

    let cha = host.actors()?.ability_mod(&paladin.actor, Ability::Cha);
    let range = u32::try_from(1 + cha).unwrap_or(0);
    let query = TargetQuery::from_character(paladin, &index).with_range(range);
    let Selection::Selected(area) = ctx.picker.select_point(&query, &ctx.metric, ctx.icon()).await?
    else {
        return Ok(PowerReport::Cancelled);
    };
    let destination = area.single_origin()?;

    let sanction = EffectLibrary::divine_sanction().name;
    let mut marked = Vec::new();
    let adjacent = EntityResolver::dedupe(
        index.adjacent_to(&Anchor::Point(destination), paladin.disposition.opposite()),
    );
    for enemy in adjacent {
        if has_effect_from(host, &enemy.token, &sanction, &paladin.actor).await? {
            marked.push(enemy);
        }
    }
    let Some(quarry) = marked.first() else {
        let reason = "You must teleport to a space adjacent to an enemy marked by you.";
        host.warn(reason);
        return Ok(PowerReport::Aborted {
            reason: reason.to_string(),
        });
    };

    let vfx = host.vfx()?;
    vfx.play(&VfxSequence::teleport(paladin, destination, PowerSource::Water))
        .await?;
    let landed = ctx.metric.snap_to_grid(destination);

    let mut summary = PowerSummary::new(NAME);
    summary.teleported_to = Some(landed);

    let template = EffectLibrary::icy_ground(NAME, &paladin.name);
    match create_effect(host, &template, DurationKind::EndOfUserTurn, paladin) {
        Ok(effect) => {
            add_effect(host, &paladin.token, &effect).await?;
            summary
                .effects
                .push((paladin.token.clone(), effect.name().to_string()));
        }
        // The user has been warned; the teleport already happened.
        Err(RuntimeError::NoActiveCombat) => {}
        Err(err) => return Err(err),
    }
    vfx.play(&VfxSequence::aura(landed, PowerSource::Water)).await?;

    host.post(ChatMessage::power(
        &paladin.name,
        NAME,
        format!(
            "{} teleports through shadow to pursue {}, leaving icy ground in their wake. \
             All adjacent squares are now difficult terrain!",
            paladin.name, quarry.name
        ),
    ));
    info!(paladin = %paladin.name, quarry = %quarry.name, %landed, "winter's arrival resolved");
    Ok(PowerReport::Resolved(summary))
}
