//! Rogue flurry against every current target.
//!
//! Dexterity vs. Will. A hit deals 5d6 + Dexterity modifier and leaves the
//! target at a penalty to all defenses equal to the rogue's Charisma
//! modifier until the end of the rogue's next turn.
use tactics_content::{Ability, Defense};
use tactics_core::{Character, EntityResolver};
use tracing::info;

use super::{PowerContext, PowerReport, PowerSummary};
use crate::api::Result;
use crate::chat::ChatMessage;
use crate::combat::{Power, roll_attack, roll_formula};
use crate::effects::{DurationKind, EffectLibrary, create_effect, replace_effect};
use crate::host::RollRequest;
use crate::vfx::{PowerSource, VfxSequence};

const NAME: &str = "Feinting Flurry";

pub async fn feinting_flurry(ctx: &PowerContext<'_>) -> Result<PowerReport> {
    let host = &ctx.host;
    let rogue = &ctx.caster;

    let targets: Vec<Character> = host
        .user()?
        .targets()
        .iter()
        .filter_map(|token| ctx.scene.tokens.iter().find(|t| &t.id == token))
        .map(EntityResolver::resolve_actor)
        .collect();
    if targets.is_empty() {
        let reason = "Please select a target before using this power.";
        host.warn(reason);
        return Ok(PowerReport::Aborted {
            reason: reason.to_string(),
        });
    }

    let actors = host.actors()?;
    let dex = actors.ability_mod(&rogue.actor, Ability::Dex);
    let cha = actors.ability_mod(&rogue.actor, Ability::Cha);
    let penalty = create_effect(
        host,
        &EffectLibrary::defense_penalty(NAME, cha),
        DurationKind::EndOfUserTurn,
        rogue,
    )?;

    let power = Power::new(NAME, Defense::Will);
    let vfx = host.vfx()?;
    let mut summary = PowerSummary::new(NAME);

    for target in targets {
        let Some(attack) = roll_attack(host, rogue, &power, std::slice::from_ref(&target))
            .await?
            .into_iter()
            .next()
        else {
            return Ok(PowerReport::Cancelled);
        };

        if !attack.hit {
            host.post(ChatMessage::power(
                &rogue.name,
                NAME,
                format!("The feints fail to throw off {}'s guard!", target.name),
            ));
            summary.misses.push(target);
            continue;
        }

        let damage = roll_formula(host, RollRequest::new("5d6 + @dex").bind("dex", dex)).await?;
        host.post(ChatMessage::power(
            &rogue.name,
            format!("{NAME} - Damage"),
            format!("{} takes {} damage.", target.name, damage.total),
        ));

        replace_effect(host, &target.token, &penalty).await?;
        vfx.play(&VfxSequence::impact(&target, PowerSource::Arcane))
            .await?;
        host.post(ChatMessage::power(
            &rogue.name,
            NAME,
            format!(
                "{} is thrown off guard and takes a -{cha} penalty to all defenses against \
                 {}'s attacks until the end of {}'s next turn.",
                target.name, rogue.name, rogue.name
            ),
        ));
        summary
            .effects
            .push((target.token.clone(), penalty.name().to_string()));
        summary.hits.push(target);
    }

    info!(
        rogue = %rogue.name,
        hits = summary.hits.len(),
        misses = summary.misses.len(),
        "feinting flurry resolved"
    );
    Ok(PowerReport::Resolved(summary))
}
