use serde::{Deserialize, Serialize};
use tactics_content::Defense;
use tactics_core::{Character, TokenId};
use tracing::debug;

use crate::api::{Result, RuntimeError};
use crate::host::{Host, RollRequest, RollResult};

/// Natural d20 result that scores a critical hit unless a power lowers it.
pub const DEFAULT_CRIT_THRESHOLD: u32 = 20;

/// Defense used when the target's sheet does not list the one attacked.
const FALLBACK_DEFENSE: i32 = 10;

/// The parts of a power the attack helpers need.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub defense: Defense,
    #[serde(default = "Power::untyped")]
    pub damage_type: String,
}

impl Power {
    pub fn new(name: impl Into<String>, defense: Defense) -> Self {
        Self {
            name: name.into(),
            icon: None,
            defense,
            damage_type: Self::untyped(),
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_damage_type(mut self, damage_type: impl Into<String>) -> Self {
        self.damage_type = damage_type.into();
        self
    }

    fn untyped() -> String {
        "untyped".to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttackResult {
    pub target: Character,
    pub hit: bool,
    pub total: i32,
    pub defense: i32,
    pub roll: RollResult,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DamageResult {
    pub target: Character,
    pub total: i32,
    pub damage_type: String,
    pub roll: RollResult,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOptions {
    /// Only hit targets take damage.
    pub skip_damage_on_miss: bool,
    pub critical: bool,
}

impl Default for AttackOptions {
    fn default() -> Self {
        Self {
            skip_damage_on_miss: true,
            critical: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttackOutcome {
    pub attacks: Vec<AttackResult>,
    pub damages: Vec<DamageResult>,
}

impl AttackOutcome {
    pub fn hits(&self) -> impl Iterator<Item = &Character> {
        self.attacks.iter().filter(|a| a.hit).map(|a| &a.target)
    }

    pub fn misses(&self) -> impl Iterator<Item = &Character> {
        self.attacks.iter().filter(|a| !a.hit).map(|a| &a.target)
    }
}

fn mark_targets(host: &Host<'_>, targets: &[Character]) -> Result<()> {
    let tokens: Vec<TokenId> = targets.iter().map(|t| t.token.clone()).collect();
    host.user()?.set_targets(&tokens);
    Ok(())
}

/// Rolls one attack for `power` and compares it to every target's defense.
///
/// No targets, or a roll the user dismissed, yields an empty result.
pub async fn roll_attack(
    host: &Host<'_>,
    attacker: &Character,
    power: &Power,
    targets: &[Character],
) -> Result<Vec<AttackResult>> {
    if targets.is_empty() {
        host.warn("No targets specified for attack.");
        return Ok(Vec::new());
    }
    mark_targets(host, targets)?;

    let Some(roll) = host
        .rolls()?
        .roll_power_attack(&attacker.actor, power)
        .await?
    else {
        debug!(power = %power.name, "attack roll cancelled");
        return Ok(Vec::new());
    };

    let actors = host.actors()?;
    let results = targets
        .iter()
        .map(|target| {
            let defense = actors
                .defense(&target.actor, power.defense)
                .unwrap_or(FALLBACK_DEFENSE);
            let hit = roll.total >= defense;
            debug!(
                power = %power.name,
                target = %target.name,
                total = roll.total,
                defense,
                hit,
                "attack resolved"
            );
            AttackResult {
                target: target.clone(),
                hit,
                total: roll.total,
                defense,
                roll: roll.clone(),
            }
        })
        .collect();
    Ok(results)
}

/// Rolls the power's damage once and applies the total to every target.
pub async fn roll_damage(
    host: &Host<'_>,
    attacker: &Character,
    power: &Power,
    targets: &[Character],
    critical: bool,
) -> Result<Vec<DamageResult>> {
    if targets.is_empty() {
        host.warn("No targets specified for damage.");
        return Ok(Vec::new());
    }
    mark_targets(host, targets)?;

    let Some(roll) = host
        .rolls()?
        .roll_power_damage(&attacker.actor, power, critical)
        .await?
    else {
        debug!(power = %power.name, "damage roll cancelled");
        return Ok(Vec::new());
    };

    Ok(targets
        .iter()
        .map(|target| DamageResult {
            target: target.clone(),
            total: roll.total,
            damage_type: power.damage_type.clone(),
            roll: roll.clone(),
        })
        .collect())
}

/// Attack roll followed by a damage roll for the hit targets (or all of them
/// when `skip_damage_on_miss` is off).
pub async fn attack_and_damage(
    host: &Host<'_>,
    attacker: &Character,
    power: &Power,
    targets: &[Character],
    options: AttackOptions,
) -> Result<AttackOutcome> {
    let attacks = roll_attack(host, attacker, power, targets).await?;

    let damage_targets: Vec<Character> = attacks
        .iter()
        .filter(|a| a.hit || !options.skip_damage_on_miss)
        .map(|a| a.target.clone())
        .collect();

    let damages = if damage_targets.is_empty() {
        Vec::new()
    } else {
        roll_damage(host, attacker, power, &damage_targets, options.critical).await?
    };

    Ok(AttackOutcome { attacks, damages })
}

/// True when the natural d20 of `roll` meets `threshold`.
pub fn is_critical(roll: &RollResult, threshold: u32) -> bool {
    roll.natural(20).is_some_and(|natural| natural >= threshold)
}

/// Evaluates a free-form formula. A dismissed roll is an error here because
/// callers need the total to continue.
pub async fn roll_formula(host: &Host<'_>, request: RollRequest) -> Result<RollResult> {
    let roll = host.rolls()?.evaluate(&request).await?;
    roll.ok_or(RuntimeError::RollCancelled {
        formula: request.formula,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_reads_the_natural_die() {
        assert!(is_critical(&RollResult::d20(20, 5), DEFAULT_CRIT_THRESHOLD));
        assert!(!is_critical(&RollResult::d20(19, 30), DEFAULT_CRIT_THRESHOLD));
        assert!(is_critical(&RollResult::d20(19, 0), 19));
        assert!(!is_critical(&RollResult::flat(40), DEFAULT_CRIT_THRESHOLD));
    }

    #[test]
    fn power_defaults_to_untyped_damage() {
        let power = Power::new("Ardent Strike", Defense::Ac);
        assert_eq!(power.damage_type, "untyped");
    }
}
