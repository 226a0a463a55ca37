//! Area burst 3 within 20. Hit: 4d6 + 12 and stunned. Miss: half damage
//! and dazed.
use tactics_content::Defense;
use tactics_core::{Anchor, FactionFilter, Selection, TargetQuery};
use tracing::info;

use super::{PowerContext, PowerReport, PowerSummary, names, plural};
use crate::api::Result;
use crate::chat::ChatMessage;
use crate::combat::{Power, roll_attack, roll_formula};
use crate::effects::{DurationKind, EffectLibrary, create_effect, replace_effect};
use crate::host::RollRequest;
use crate::vfx::{PowerSource, Timing, VfxSequence};

const NAME: &str = "Thunderclap";
const RANGE: u32 = 20;
const BURST: u32 = 3;

pub async fn thunderclap(ctx: &PowerContext<'_>) -> Result<PowerReport> {
    let host = &ctx.host;
    let caster = &ctx.caster;
    let index = ctx.index();
    let power = Power::new(NAME, Defense::Fort).with_damage_type("thunder");

    // Both outcomes need a combat; fail before the user picks anything.
    let stunned = create_effect(host, &EffectLibrary::stunned(), DurationKind::EndOfUserTurn, caster)?;
    let dazed = create_effect(host, &EffectLibrary::dazed(), DurationKind::EndOfUserTurn, caster)?;

    let query = TargetQuery::from_character(caster, &index).with_range(RANGE);
    let Selection::Selected(area) = ctx.picker.select_point(&query, &ctx.metric, ctx.icon()).await?
    else {
        return Ok(PowerReport::Cancelled);
    };
    let center = area.single_origin()?;
    let burst = area.with_radius(BURST).with_filter(FactionFilter::All);

    let targets = burst.evaluate(&index);
    let mut summary = PowerSummary::new(NAME);
    if targets.is_empty() {
        host.post(ChatMessage::power(&caster.name, NAME, "No creatures in the area of effect."));
        return Ok(PowerReport::Resolved(summary));
    }

    let attacks = roll_attack(host, caster, &power, &targets).await?;
    if attacks.is_empty() {
        return Ok(PowerReport::Cancelled);
    }

    let vfx = host.vfx()?;
    for attack in attacks {
        let target = attack.target;
        let (formula, effect, animation) = if attack.hit {
            (
                "4d6 + 12",
                &stunned,
                VfxSequence::impact(&target, PowerSource::Lightning),
            )
        } else {
            (
                "2d6 + 6",
                &dazed,
                VfxSequence::custom("jb2a.impact.groundcrack.01.blue", &target, 0.7),
            )
        };

        let damage = roll_formula(host, RollRequest::new(formula)).await?;
        let flavor = if attack.hit { "Hit" } else { "Miss" };
        host.post(ChatMessage::damage(
            &caster.name,
            &[target.name.as_str()],
            damage.total,
            &power.damage_type,
            format!("{NAME} - Thunder Damage ({flavor})"),
        ));

        replace_effect(host, &target.token, effect).await?;
        vfx.play(&animation).await?;
        summary
            .effects
            .push((target.token.clone(), effect.name().to_string()));

        if attack.hit {
            summary.hits.push(target);
        } else {
            summary.misses.push(target);
        }
    }

    let burst_vfx = VfxSequence::custom("jb2a.impact.004.blue", Anchor::Point(center), 3.0)
        .with_timing(Timing {
            fade_in: Some(200),
            fade_out: None,
            duration: Some(800),
        });
    vfx.play(&burst_vfx).await?;

    let total = summary.hits.len() + summary.misses.len();
    let mut parts = Vec::new();
    if !summary.hits.is_empty() {
        parts.push(format!(
            "{} stunned ({})",
            summary.hits.len(),
            names(&summary.hits).join(", ")
        ));
    }
    if !summary.misses.is_empty() {
        parts.push(format!(
            "{} dazed ({})",
            summary.misses.len(),
            names(&summary.misses).join(", ")
        ));
    }
    host.post(ChatMessage::power(
        &caster.name,
        NAME,
        format!("{NAME} affects {total} creature{}: {}", plural(total), parts.join(", ")),
    ));

    info!(
        caster = %caster.name,
        stunned = summary.hits.len(),
        dazed = summary.misses.len(),
        "thunderclap resolved"
    );
    Ok(PowerReport::Resolved(summary))
}
