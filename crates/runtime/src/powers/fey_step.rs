//! Eladrin teleport up to 5 squares.
use tactics_core::{Selection, TargetQuery};
use tracing::info;

use super::{PowerContext, PowerReport, PowerSummary};
use crate::api::Result;
use crate::vfx::{PowerSource, VfxSequence};

const NAME: &str = "Fey Step";
const RANGE: u32 = 5;

pub async fn fey_step(ctx: &PowerContext<'_>) -> Result<PowerReport> {
    let caster = &ctx.caster;
    let query = TargetQuery::from_character(caster, &ctx.index()).with_range(RANGE);

    let Selection::Selected(area) = ctx.picker.select_point(&query, &ctx.metric, ctx.icon()).await?
    else {
        return Ok(PowerReport::Cancelled);
    };
    let destination = area.single_origin()?;

    ctx.host
        .vfx()?
        .play(&VfxSequence::teleport(caster, destination, PowerSource::Lightning))
        .await?;

    let landed = ctx.metric.snap_to_grid(destination);
    info!(caster = %caster.name, %landed, "fey step resolved");

    let mut summary = PowerSummary::new(NAME);
    summary.teleported_to = Some(landed);
    Ok(PowerReport::Resolved(summary))
}
