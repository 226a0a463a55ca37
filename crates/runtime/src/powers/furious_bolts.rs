//! Lightning that chains between foes.
//!
//! The primary target is an enemy within 20 squares. Each hit lets the
//! caster pick another enemy within 10 squares of the last one hit; a
//! creature is never attacked twice and the first miss ends the chain. The
//! caster then gains an attack bonus equal to the number of hits.
use std::collections::HashSet;

use tactics_content::{Ability, Defense};
use tactics_core::{Anchor, Character, FactionFilter, Selection, TargetQuery};
use tracing::{debug, info};

use super::{PowerContext, PowerReport, PowerSummary, names, plural};
use crate::api::{Result, RuntimeError};
use crate::chat::ChatMessage;
use crate::combat::{DEFAULT_CRIT_THRESHOLD, Power, is_critical, roll_attack, roll_damage, roll_formula};
use crate::effects::{DurationKind, EffectLibrary, add_effect, create_effect};
use crate::host::RollRequest;
use crate::vfx::{PowerSource, VfxSequence};

const NAME: &str = "Furious Bolts";
const PRIMARY_RANGE: u32 = 20;
const CHAIN_RANGE: u32 = 10;

pub async fn furious_bolts(ctx: &PowerContext<'_>) -> Result<PowerReport> {
    let host = &ctx.host;
    let caster = &ctx.caster;
    let index = ctx.index();
    let vfx = host.vfx()?;
    let power = Power::new(NAME, Defense::Ref).with_damage_type("lightning");
    let cha = host.actors()?.ability_mod(&caster.actor, Ability::Cha);

    let query = TargetQuery::from_character(caster, &index)
        .with_range(PRIMARY_RANGE)
        .with_filter(FactionFilter::Enemies);
    let Selection::Selected(selected) = ctx
        .picker
        .select_characters(&query, &index, ctx.icon())
        .await?
    else {
        return Ok(PowerReport::Cancelled);
    };
    let Some(primary) = selected.into_iter().next() else {
        return Ok(PowerReport::Cancelled);
    };

    let mut summary = PowerSummary::new(NAME);
    let mut attacked = HashSet::from([primary.actor.clone()]);

    let Some(attack) = roll_attack(host, caster, &power, std::slice::from_ref(&primary))
        .await?
        .into_iter()
        .next()
    else {
        return Ok(PowerReport::Cancelled);
    };

    if !attack.hit {
        host.post(ChatMessage::power(
            &caster.name,
            NAME,
            format!("The lightning bolts miss {}!", primary.name),
        ));
        summary.misses.push(primary);
        return Ok(PowerReport::Resolved(summary));
    }

    let critical = is_critical(&attack.roll, DEFAULT_CRIT_THRESHOLD);
    roll_damage(host, caster, &power, std::slice::from_ref(&primary), critical).await?;
    vfx.play(&VfxSequence::impact(&primary, PowerSource::Lightning))
        .await?;
    summary.hits.push(primary.clone());

    // Enemies are always judged from the caster's side, wherever the chain is.
    let enemies_near = |anchor: Anchor| {
        TargetQuery::from_anchors([anchor])
            .with_faction(FactionFilter::Enemies, Some(caster.disposition))
    };

    let mut current = primary;
    loop {
        let anchor = Anchor::from(&current);
        let remaining: Vec<Character> = enemies_near(anchor.clone())
            .with_radius(CHAIN_RANGE)
            .evaluate(&index)
            .into_iter()
            .filter(|c| !attacked.contains(&c.actor))
            .collect();
        if remaining.is_empty() {
            debug!(from = %current.name, "no enemy left to chain to");
            break;
        }

        let pick = enemies_near(anchor).with_range(CHAIN_RANGE);
        let Selection::Selected(selected) = ctx
            .picker
            .select_characters(&pick, &index, ctx.icon())
            .await?
        else {
            break;
        };
        // A square may hold a fresh enemy behind one already struck.
        let Some(first) = selected.first().map(|c| c.name.clone()) else {
            break;
        };
        let Some(next) = selected
            .into_iter()
            .find(|c| !attacked.contains(&c.actor))
        else {
            host.warn(format!(
                "{first} has already been attacked. Choose a different target."
            ));
            continue;
        };
        attacked.insert(next.actor.clone());

        vfx.play(&VfxSequence::beam(&current, &next, PowerSource::Lightning))
            .await?;

        let Some(attack) = roll_attack(host, caster, &power, std::slice::from_ref(&next))
            .await?
            .into_iter()
            .next()
        else {
            break;
        };

        if !attack.hit {
            vfx.play(&VfxSequence::custom(
                "jb2a.static_electricity.03.blue",
                &next,
                0.5,
            ))
            .await?;
            summary.misses.push(next);
            break;
        }

        let damage = roll_formula(host, RollRequest::new("2d4 + @cha").bind("cha", cha)).await?;
        host.post(ChatMessage::damage(
            &caster.name,
            &[next.name.as_str()],
            damage.total,
            &power.damage_type,
            format!("{NAME} - Secondary Lightning Damage"),
        ));
        vfx.play(&VfxSequence::impact(&next, PowerSource::Lightning))
            .await?;
        summary.hits.push(next.clone());
        current = next;
    }

    let hits = summary.hits.len();
    let template = EffectLibrary::attack_bonus(NAME, hits as u32);
    match create_effect(host, &template, DurationKind::EndOfUserTurn, caster) {
        Ok(effect) => {
            add_effect(host, &caster.token, &effect).await?;
            summary
                .effects
                .push((caster.token.clone(), effect.name().to_string()));
        }
        // The user has been warned; the attacks already happened.
        Err(RuntimeError::NoActiveCombat) => {}
        Err(err) => return Err(err),
    }

    host.post(ChatMessage::power(
        &caster.name,
        NAME,
        format!(
            "Lightning chains through {hits} creature{}: {}. {} gains +{hits} to their next attack roll!",
            plural(hits),
            names(&summary.hits).join(", "),
            caster.name
        ),
    ));
    info!(caster = %caster.name, hits, misses = summary.misses.len(), "furious bolts resolved");
    Ok(PowerReport::Resolved(summary))
}
