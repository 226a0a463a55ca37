//! Marks every token the user currently targets with divine sanction.
use tracing::info;

use super::{PowerContext, PowerReport, PowerSummary};
use crate::api::Result;
use crate::chat::ChatMessage;
use crate::effects::{DurationKind, EffectLibrary, create_effect, replace_effect};

const NAME: &str = "Ardent Strike";

pub async fn ardent_strike(ctx: &PowerContext<'_>) -> Result<PowerReport> {
    let host = &ctx.host;
    let paladin = &ctx.caster;

    let sanction = create_effect(
        host,
        &EffectLibrary::divine_sanction(),
        DurationKind::EndOfUserTurn,
        paladin,
    )?;

    let mut summary = PowerSummary::new(NAME);
    for token in host.user()?.targets() {
        replace_effect(host, &token, &sanction).await?;
        summary.effects.push((token, sanction.name().to_string()));
    }

    let marked: Vec<&str> = summary
        .effects
        .iter()
        .filter_map(|(token, _)| ctx.scene.tokens.iter().find(|t| &t.id == token))
        .map(|t| t.name.as_str())
        .collect();
    if !marked.is_empty() {
        host.post(ChatMessage::effect(&paladin.name, &marked, sanction.name(), NAME));
    }

    info!(paladin = %paladin.name, marked = summary.effects.len(), "ardent strike resolved");
    Ok(PowerReport::Resolved(summary))
}
