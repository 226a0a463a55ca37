//! Kerymwael Teleport Assault.
//!
//! The wielder teleports up to 5 squares and attacks every enemy within one
//! square of the landing point. During combat the targets are also marked.
use tactics_content::Defense;
use tactics_core::{FactionFilter, Selection, TargetQuery};
use tracing::info;

use super::{PowerContext, PowerReport, PowerSummary, names};
use crate::api::Result;
use crate::chat::ChatMessage;
use crate::combat::{AttackOptions, Power, attack_and_damage};
use crate::effects::{DurationKind, EffectLibrary, create_effect, replace_effect};
use crate::vfx::{PowerSource, VfxSequence};

const NAME: &str = "Kerymwael Teleport Assault";
const RANGE: u32 = 5;

pub async fn teleport_assault(ctx: &PowerContext<'_>) -> Result<PowerReport> {
    let host = &ctx.host;
    let caster = &ctx.caster;
    let index = ctx.index();

    let query = TargetQuery::from_character(caster, &index)
        .with_range(RANGE)
        .with_filter(FactionFilter::Enemies);
    let Selection::Selected(area) = ctx.picker.select_point(&query, &ctx.metric, ctx.icon()).await?
    else {
        return Ok(PowerReport::Cancelled);
    };
    let destination = area.single_origin()?;

    let vfx = host.vfx()?;
    vfx.play(&VfxSequence::teleport(caster, destination, PowerSource::Fire))
        .await?;
    vfx.play(&VfxSequence::impact(destination, PowerSource::Fire))
        .await?;
    let landed = ctx.metric.snap_to_grid(destination);

    let mut summary = PowerSummary::new(NAME);
    summary.teleported_to = Some(landed);

    // The picked area keeps the enemy filter and includes its own square.
    let targets = area.with_radius(1).evaluate(&index);
    let power = Power::new(NAME, Defense::Ac).with_damage_type("fire");
    let outcome =
        attack_and_damage(host, caster, &power, &targets, AttackOptions::default()).await?;
    summary.hits = outcome.hits().cloned().collect();
    summary.misses = outcome.misses().cloned().collect();

    if let Some(total) = outcome.damages.first().map(|d| d.total) {
        let damaged: Vec<&str> = outcome.damages.iter().map(|d| d.target.name.as_str()).collect();
        host.post(ChatMessage::damage(
            &caster.name,
            &damaged,
            total,
            &power.damage_type,
            NAME,
        ));
    }

    if host.combat()?.round().is_some() && !targets.is_empty() {
        let mark = create_effect(
            host,
            &EffectLibrary::marked(),
            DurationKind::EndOfUserTurn,
            caster,
        )?;
        for target in &targets {
            replace_effect(host, &target.token, &mark).await?;
            summary
                .effects
                .push((target.token.clone(), mark.name().to_string()));
        }
        host.post(ChatMessage::effect(&caster.name, &names(&targets), mark.name(), NAME));
    }

    info!(
        caster = %caster.name,
        %landed,
        hits = summary.hits.len(),
        misses = summary.misses.len(),
        "teleport assault resolved"
    );
    Ok(PowerReport::Resolved(summary))
}
