//! Traits describing the host collaborators power scripts call into.
//!
//! Reads that the host answers from memory are synchronous; anything that may
//! wait on the host (dice dialogs, animations, document updates) is async.
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tactics_content::{Ability, Defense, SurgePool};
use tactics_core::{ActorId, TokenId};

use super::HostError;
use crate::chat::ChatMessage;
use crate::combat::Power;
use crate::effects::EffectData;
use crate::vfx::VfxSequence;

// ============================================================================
// Actors
// ============================================================================

/// Actor data access.
pub trait ActorOracle: Send + Sync {
    fn find_by_name(&self, name: &str) -> Option<ActorId>;

    /// Ability modifier, 0 when the actor or the ability is unknown.
    fn ability_mod(&self, actor: &ActorId, ability: Ability) -> i32;

    /// Defense value, `None` when the actor does not list it.
    fn defense(&self, actor: &ActorId, defense: Defense) -> Option<i32>;

    fn healing_surges(&self, actor: &ActorId) -> Option<SurgePool>;

    fn set_surges(&self, actor: &ActorId, remaining: u32) -> Result<(), HostError>;
}

// ============================================================================
// Health
// ============================================================================

/// Healing applied to one actor.
///
/// The host restores `amount` plus `surge_values_spent` times the actor's own
/// surge value, and deducts `surges_spent` surges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealRequest {
    pub amount: i32,
    pub surges_spent: u32,
    pub surge_values_spent: u32,
}

impl HealRequest {
    /// Flat healing that spends no surge.
    pub const fn flat(amount: i32) -> Self {
        Self {
            amount,
            surges_spent: 0,
            surge_values_spent: 0,
        }
    }

    /// Spend one surge for its value plus a bonus.
    pub const fn surge(bonus: i32) -> Self {
        Self {
            amount: bonus,
            surges_spent: 1,
            surge_values_spent: 1,
        }
    }
}

#[async_trait]
pub trait HealthOracle: Send + Sync {
    async fn heal(&self, actor: &ActorId, request: HealRequest) -> Result<(), HostError>;

    async fn temp_heal(&self, actor: &ActorId, amount: i32) -> Result<(), HostError>;
}

// ============================================================================
// Rolls
// ============================================================================

/// Formula to evaluate, with `@name` variables bound to values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    pub formula: String,
    pub bindings: BTreeMap<String, i32>,
}

impl RollRequest {
    pub fn new(formula: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            bindings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: i32) -> Self {
        self.bindings.insert(name.into(), value);
        self
    }
}

/// One rolled die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    pub faces: u32,
    pub result: u32,
}

/// Total and breakdown of an evaluated roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub formula: String,
    pub total: i32,
    pub dice: Vec<DieResult>,
}

impl RollResult {
    pub fn new(formula: impl Into<String>, total: i32, dice: Vec<DieResult>) -> Self {
        Self {
            formula: formula.into(),
            total,
            dice,
        }
    }

    /// Attack roll: a natural d20 plus a flat bonus.
    pub fn d20(natural: u32, bonus: i32) -> Self {
        Self::new(
            format!("1d20 + {bonus}"),
            natural as i32 + bonus,
            vec![DieResult {
                faces: 20,
                result: natural,
            }],
        )
    }

    /// Result with a known total and no dice breakdown.
    pub fn flat(total: i32) -> Self {
        Self::new(total.to_string(), total, Vec::new())
    }

    /// First die rolled with the given number of faces.
    pub fn natural(&self, faces: u32) -> Option<u32> {
        self.dice.iter().find(|die| die.faces == faces).map(|die| die.result)
    }
}

/// Dice evaluation. `Ok(None)` means the user dismissed the roll.
#[async_trait]
pub trait RollOracle: Send + Sync {
    async fn evaluate(&self, request: &RollRequest) -> Result<Option<RollResult>, HostError>;

    /// Attack roll with every bonus the host knows for `actor` and `power`.
    async fn roll_power_attack(
        &self,
        actor: &ActorId,
        power: &Power,
    ) -> Result<Option<RollResult>, HostError>;

    async fn roll_power_damage(
        &self,
        actor: &ActorId,
        power: &Power,
        critical: bool,
    ) -> Result<Option<RollResult>, HostError>;
}

// ============================================================================
// Effects, combat, user
// ============================================================================

#[async_trait]
pub trait EffectOracle: Send + Sync {
    async fn apply(&self, token: &TokenId, effect: &EffectData) -> Result<(), HostError>;

    /// Removes every effect with the given name. Returns true if one was found.
    async fn remove_by_name(&self, token: &TokenId, name: &str) -> Result<bool, HostError>;

    /// Effects currently on `token`, in application order.
    async fn on_token(&self, token: &TokenId) -> Result<Vec<EffectData>, HostError>;
}

/// Encounter tracker.
pub trait CombatOracle: Send + Sync {
    /// Current round, `None` when no combat is running.
    fn round(&self) -> Option<u32>;

    fn initiative(&self, actor: &ActorId) -> Option<i32>;
}

/// The acting user's target marks.
pub trait UserOracle: Send + Sync {
    fn set_targets(&self, tokens: &[TokenId]);

    fn targets(&self) -> Vec<TokenId>;
}

// ============================================================================
// Presentation
// ============================================================================

#[async_trait]
pub trait VfxOracle: Send + Sync {
    async fn play(&self, sequence: &VfxSequence) -> Result<(), HostError>;
}

/// Fire-and-forget chat output.
pub trait ChatSink: Send + Sync {
    fn post(&self, message: ChatMessage);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_reads_the_d20() {
        let roll = RollResult::d20(17, 8);
        assert_eq!(roll.total, 25);
        assert_eq!(roll.natural(20), Some(17));
        assert_eq!(RollResult::flat(9).natural(20), None);
    }

    #[test]
    fn roll_request_binds_variables() {
        let request = RollRequest::new("2d4 + @cha").bind("cha", 5);
        assert_eq!(request.bindings.get("cha"), Some(&5));
    }
}
