//! Timed effects (conditions, marks, buffs) applied to tokens.
use serde::{Deserialize, Serialize};
use tactics_core::{ActorId, Character, TokenId};
use tracing::debug;

use crate::api::{Result, RuntimeError};
use crate::host::Host;

/// How a change combines with the value it modifies.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChangeMode {
    Custom,
    Multiply,
    #[default]
    Add,
    Downgrade,
    Upgrade,
    Override,
}

/// One data path the effect modifies while active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectChange {
    pub key: String,
    pub mode: ChangeMode,
    pub value: String,
    pub priority: i32,
}

/// Static description of an effect, before it is bound to a combat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub changes: Vec<EffectChange>,
}

impl EffectTemplate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            icon: None,
            changes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_change(mut self, change: EffectChange) -> Self {
        self.changes.push(change);
        self
    }
}

/// When the effect expires relative to the origin's turn.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum DurationKind {
    #[default]
    EndOfUserTurn,
    StartOfUserTurn,
    EndOfTargetTurn,
    SaveEnds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDuration {
    pub rounds: u32,
    pub start_round: u32,
    pub kind: DurationKind,
    /// Initiative of the origin, which anchors turn-relative expiry.
    pub initiative: Option<i32>,
}

/// An effect bound to the current combat and ready to apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectData {
    #[serde(flatten)]
    pub template: EffectTemplate,
    pub duration: EffectDuration,
    pub origin: ActorId,
}

impl EffectData {
    pub fn name(&self) -> &str {
        &self.template.name
    }
}

/// Binds `template` to the running combat on behalf of `origin`.
///
/// The effect lasts until the round after this one. Without a combat the
/// user is warned and the call fails with [`RuntimeError::NoActiveCombat`].
pub fn create_effect(
    host: &Host<'_>,
    template: &EffectTemplate,
    kind: DurationKind,
    origin: &Character,
) -> Result<EffectData> {
    let combat = host.combat()?;
    let Some(round) = combat.round() else {
        host.warn("There is no ongoing combat, cannot produce an effect.");
        return Err(RuntimeError::NoActiveCombat);
    };

    Ok(EffectData {
        template: template.clone(),
        duration: EffectDuration {
            rounds: round + 1,
            start_round: round,
            kind,
            initiative: combat.initiative(&origin.actor),
        },
        origin: origin.actor.clone(),
    })
}

/// Removes any effect with the same name from `token`, then applies `effect`.
pub async fn replace_effect(host: &Host<'_>, token: &TokenId, effect: &EffectData) -> Result<()> {
    let effects = host.effects()?;
    let removed = effects.remove_by_name(token, effect.name()).await?;
    effects.apply(token, effect).await?;
    debug!(%token, effect = effect.name(), removed, "effect replaced");
    Ok(())
}

pub async fn add_effect(host: &Host<'_>, token: &TokenId, effect: &EffectData) -> Result<()> {
    host.effects()?.apply(token, effect).await?;
    debug!(%token, effect = effect.name(), "effect added");
    Ok(())
}

/// True when `token` carries an effect called `name` created by `origin`.
pub async fn has_effect_from(
    host: &Host<'_>,
    token: &TokenId,
    name: &str,
    origin: &ActorId,
) -> Result<bool> {
    let effects = host.effects()?.on_token(token).await?;
    Ok(effects
        .iter()
        .any(|effect| effect.name() == name && &effect.origin == origin))
}

/// Effect templates shared by several powers.
pub struct EffectLibrary;

impl EffectLibrary {
    pub fn divine_sanction() -> EffectTemplate {
        EffectTemplate::new(
            "Divine Sanction",
            "A creature subject to a paladin's divine sanction is marked by the paladin \
             for the duration of the divine sanction, or until marked by a different \
             person. The first time each round a creature marked by a paladin's divine \
             sanction makes an attack that doesn't include the paladin as a target, the \
             marked creature takes [[@tier * 3 + @chaMod]] radiant damage.",
        )
        .with_icon("icons/magic/light/orb-container-orange.webp")
    }

    pub fn stunned() -> EffectTemplate {
        EffectTemplate::new(
            "Stunned",
            "The creature can't take actions, grants combat advantage, and can't flank.",
        )
        .with_icon("icons/svg/daze.svg")
    }

    pub fn dazed() -> EffectTemplate {
        EffectTemplate::new(
            "Dazed",
            "The creature can take only one action on its turn and grants combat advantage.",
        )
        .with_icon("icons/svg/stoned.svg")
    }

    pub fn marked() -> EffectTemplate {
        EffectTemplate::new(
            "Marked",
            "A marked creature takes a -2 penalty to attack rolls for any attack that \
             doesn't include the marking creature as a target.",
        )
        .with_icon("icons/svg/target.svg")
    }

    /// Difficult terrain around `name` until the end of their next turn.
    pub fn icy_ground(power: &str, name: &str) -> EffectTemplate {
        EffectTemplate::new(
            format!("{power} - Icy Ground"),
            format!(
                "All squares adjacent to {name} are difficult terrain until the end of \
                 their next turn."
            ),
        )
        .with_icon("icons/magic/water/barrier-ice-crystal-wall-jagged-blue.webp")
    }

    /// `-penalty` to all four defenses.
    pub fn defense_penalty(power: &str, penalty: i32) -> EffectTemplate {
        let template = EffectTemplate::new(
            format!("{power} - Defense Penalty"),
            format!("-{penalty} penalty to all defenses until the end of the attacker's next turn."),
        )
        .with_icon("icons/conditions/afflicted.svg");
        ["ac", "fortitude", "reflex", "will"]
            .into_iter()
            .fold(template, |template, defense| {
                template.with_change(EffectChange {
                    key: format!("system.defences.{defense}.value"),
                    mode: ChangeMode::Add,
                    value: (-penalty).to_string(),
                    priority: 20,
                })
            })
    }

    /// "+N to your first attack roll next turn".
    pub fn attack_bonus(power: &str, bonus: u32) -> EffectTemplate {
        let plural = if bonus == 1 { "" } else { "s" };
        EffectTemplate::new(
            format!("{power} - Attack Bonus"),
            format!(
                "+{bonus} bonus to your first attack roll on your next turn \
                 (from hitting {bonus} creature{plural} with {power})."
            ),
        )
        .with_icon("icons/magic/lightning/bolt-strike-blue.webp")
        .with_change(EffectChange {
            key: "system.attributes.attack.bonus".to_string(),
            mode: ChangeMode::Add,
            value: bonus.to_string(),
            priority: 20,
        })
    }
}
