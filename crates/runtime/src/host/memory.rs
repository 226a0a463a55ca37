//! In-process host backed by plain data and scripted dice.
//!
//! Used by the integration tests and the CLI. Every collaborator trait is
//! implemented on one struct with interior mutability, and every write is
//! recorded so callers can assert on it afterwards.
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tactics_content::{Ability, ActorSheet, Defense, SurgePool};
use tactics_core::{ActorId, GridMetric, Scene, TokenId};

use super::{
    ActorOracle, ChatSink, Collaborator, CombatOracle, EffectOracle, HealRequest, HealthOracle,
    Host, HostError, RollOracle, RollRequest, RollResult, UserOracle, VfxOracle,
};
use crate::api::{Notice, Notifier};
use crate::chat::ChatMessage;
use crate::combat::Power;
use crate::effects::EffectData;
use crate::utils::lock;
use crate::vfx::{VfxSequence, VfxStep};

/// A roll the script hands out, or `None` for a dismissed dialog.
type ScriptedRoll = Option<RollResult>;

#[derive(Debug)]
pub struct InMemoryHost {
    metric: GridMetric,
    scene: Mutex<Scene>,
    sheets: Mutex<BTreeMap<ActorId, ActorSheet>>,
    rolls: Mutex<VecDeque<ScriptedRoll>>,
    roll_log: Mutex<Vec<String>>,
    round: Mutex<Option<u32>>,
    initiative: Mutex<HashMap<ActorId, i32>>,
    effects: Mutex<HashMap<TokenId, Vec<EffectData>>>,
    targets: Mutex<Vec<TokenId>>,
    vfx: Mutex<Vec<VfxSequence>>,
    chat: Mutex<Vec<ChatMessage>>,
    notices: Mutex<Vec<Notice>>,
}

impl InMemoryHost {
    pub fn new(scene: Scene, sheets: impl IntoIterator<Item = ActorSheet>, metric: GridMetric) -> Self {
        Self {
            metric,
            scene: Mutex::new(scene),
            sheets: Mutex::new(
                sheets
                    .into_iter()
                    .map(|sheet| (sheet.actor.clone(), sheet))
                    .collect(),
            ),
            rolls: Mutex::new(VecDeque::new()),
            roll_log: Mutex::new(Vec::new()),
            round: Mutex::new(None),
            initiative: Mutex::new(HashMap::new()),
            effects: Mutex::new(HashMap::new()),
            targets: Mutex::new(Vec::new()),
            vfx: Mutex::new(Vec::new()),
            chat: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    /// Starts a combat at `round`.
    #[must_use]
    pub fn in_combat(self, round: u32) -> Self {
        self.set_round(Some(round));
        self
    }

    pub fn set_round(&self, round: Option<u32>) {
        *lock(&self.round) = round;
    }

    pub fn set_initiative(&self, actor: ActorId, initiative: i32) {
        lock(&self.initiative).insert(actor, initiative);
    }

    /// Queues the next roll any dice request will receive.
    pub fn push_roll(&self, roll: ScriptedRoll) {
        lock(&self.rolls).push_back(roll);
    }

    pub fn push_rolls(&self, rolls: impl IntoIterator<Item = RollResult>) {
        lock(&self.rolls).extend(rolls.into_iter().map(Some));
    }

    pub fn metric(&self) -> &GridMetric {
        &self.metric
    }

    /// Snapshot of the scene as it stands now.
    pub fn scene(&self) -> Scene {
        lock(&self.scene).clone()
    }

    pub fn sheet(&self, actor: &ActorId) -> Option<ActorSheet> {
        lock(&self.sheets).get(actor).cloned()
    }

    pub fn effects_on(&self, token: &TokenId) -> Vec<EffectData> {
        lock(&self.effects).get(token).cloned().unwrap_or_default()
    }

    /// Formulas of every roll requested so far.
    pub fn roll_log(&self) -> Vec<String> {
        lock(&self.roll_log).clone()
    }

    pub fn chat_log(&self) -> Vec<ChatMessage> {
        lock(&self.chat).clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn vfx_log(&self) -> Vec<VfxSequence> {
        lock(&self.vfx).clone()
    }

    /// Borrows every collaborator slot from this host.
    pub fn host(&self) -> Host<'_> {
        Host::empty()
            .with_actors(self)
            .with_health(self)
            .with_rolls(self)
            .with_effects(self)
            .with_combat(self)
            .with_user(self)
            .with_vfx(self)
            .with_chat(self)
            .with_notices(self)
    }

    fn next_roll(&self, formula: String) -> Result<ScriptedRoll, HostError> {
        lock(&self.roll_log).push(formula);
        lock(&self.rolls)
            .pop_front()
            .ok_or_else(|| HostError::rejected(Collaborator::Rolls, "no scripted roll left"))
    }

    fn with_sheet<T>(
        &self,
        actor: &ActorId,
        f: impl FnOnce(&mut ActorSheet) -> Result<T, HostError>,
    ) -> Result<T, HostError> {
        let mut sheets = lock(&self.sheets);
        let sheet = sheets
            .get_mut(actor)
            .ok_or_else(|| HostError::ActorNotFound(actor.clone()))?;
        f(sheet)
    }
}

impl ActorOracle for InMemoryHost {
    fn find_by_name(&self, name: &str) -> Option<ActorId> {
        lock(&self.sheets)
            .values()
            .find(|sheet| sheet.name == name)
            .map(|sheet| sheet.actor.clone())
    }

    fn ability_mod(&self, actor: &ActorId, ability: Ability) -> i32 {
        lock(&self.sheets)
            .get(actor)
            .map_or(0, |sheet| sheet.ability_mod(ability))
    }

    fn defense(&self, actor: &ActorId, defense: Defense) -> Option<i32> {
        lock(&self.sheets).get(actor)?.defense(defense)
    }

    fn healing_surges(&self, actor: &ActorId) -> Option<SurgePool> {
        lock(&self.sheets).get(actor).map(|sheet| sheet.surges)
    }

    fn set_surges(&self, actor: &ActorId, remaining: u32) -> Result<(), HostError> {
        self.with_sheet(actor, |sheet| {
            sheet.surges.remaining = remaining;
            Ok(())
        })
    }
}

#[async_trait]
impl HealthOracle for InMemoryHost {
    async fn heal(&self, actor: &ActorId, request: HealRequest) -> Result<(), HostError> {
        self.with_sheet(actor, |sheet| {
            if request.surges_spent > sheet.surges.remaining {
                return Err(HostError::rejected(
                    Collaborator::Health,
                    format!("{} has no healing surge left", sheet.name),
                ));
            }
            let surge_value = sheet.surges.value * request.surge_values_spent as i32;
            sheet.hit_points.heal(surge_value + request.amount);
            sheet.surges.remaining -= request.surges_spent;
            Ok(())
        })
    }

    async fn temp_heal(&self, actor: &ActorId, amount: i32) -> Result<(), HostError> {
        self.with_sheet(actor, |sheet| {
            sheet.hit_points.grant_temp(amount);
            Ok(())
        })
    }
}

#[async_trait]
impl RollOracle for InMemoryHost {
    async fn evaluate(&self, request: &RollRequest) -> Result<Option<RollResult>, HostError> {
        self.next_roll(request.formula.clone())
    }

    async fn roll_power_attack(
        &self,
        _actor: &ActorId,
        power: &Power,
    ) -> Result<Option<RollResult>, HostError> {
        self.next_roll(format!("{} attack", power.name))
    }

    async fn roll_power_damage(
        &self,
        _actor: &ActorId,
        power: &Power,
        critical: bool,
    ) -> Result<Option<RollResult>, HostError> {
        let kind = if critical { "critical damage" } else { "damage" };
        self.next_roll(format!("{} {kind}", power.name))
    }
}

#[async_trait]
impl EffectOracle for InMemoryHost {
    async fn apply(&self, token: &TokenId, effect: &EffectData) -> Result<(), HostError> {
        lock(&self.effects)
            .entry(token.clone())
            .or_default()
            .push(effect.clone());
        Ok(())
    }

    async fn remove_by_name(&self, token: &TokenId, name: &str) -> Result<bool, HostError> {
        let mut effects = lock(&self.effects);
        let Some(list) = effects.get_mut(token) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|effect| effect.name() != name);
        Ok(list.len() != before)
    }

    async fn on_token(&self, token: &TokenId) -> Result<Vec<EffectData>, HostError> {
        Ok(self.effects_on(token))
    }
}

impl CombatOracle for InMemoryHost {
    fn round(&self) -> Option<u32> {
        *lock(&self.round)
    }

    fn initiative(&self, actor: &ActorId) -> Option<i32> {
        lock(&self.initiative).get(actor).copied()
    }
}

impl UserOracle for InMemoryHost {
    fn set_targets(&self, tokens: &[TokenId]) {
        *lock(&self.targets) = tokens.to_vec();
    }

    fn targets(&self) -> Vec<TokenId> {
        lock(&self.targets).clone()
    }
}

#[async_trait]
impl VfxOracle for InMemoryHost {
    async fn play(&self, sequence: &VfxSequence) -> Result<(), HostError> {
        for step in &sequence.steps {
            if let VfxStep::Teleport { token, destination } = step {
                let mut scene = lock(&self.scene);
                let placed = scene
                    .tokens
                    .iter_mut()
                    .find(|placed| &placed.id == token)
                    .ok_or_else(|| HostError::TokenNotFound(token.clone()))?;
                placed.position = self.metric.snap_to_grid(*destination);
            }
        }
        lock(&self.vfx).push(sequence.clone());
        Ok(())
    }
}

impl ChatSink for InMemoryHost {
    fn post(&self, message: ChatMessage) {
        lock(&self.chat).push(message);
    }
}

impl Notifier for InMemoryHost {
    fn notify(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }
}

#[cfg(test)]
mod tests {
    use tactics_content::HitPoints;
    use tactics_core::{Coordinate, Disposition, PlacedEntity};

    use super::*;

    fn fixture() -> InMemoryHost {
        let scene = Scene::new(
            "test",
            vec![PlacedEntity::new(
                TokenId::new("tok-grund"),
                ActorId::new("grund"),
                "Grund",
                Coordinate::new(100.0, 100.0),
                Disposition::FRIENDLY,
            )],
        );
        let sheet = ActorSheet::new(ActorId::new("grund"), "Grund")
            .with_surges(1, 10)
            .with_hit_points(HitPoints {
                value: 5,
                max: 40,
                temp: 0,
            });
        InMemoryHost::new(scene, [sheet], GridMetric::default())
    }

    #[tokio::test]
    async fn heal_spends_surges_and_adds_their_value() {
        let host = fixture();
        let grund = ActorId::new("grund");

        host.heal(&grund, HealRequest::surge(3)).await.unwrap();
        let sheet = host.sheet(&grund).unwrap();
        assert_eq!(sheet.hit_points.value, 18);
        assert_eq!(sheet.surges.remaining, 0);

        let err = host.heal(&grund, HealRequest::surge(0)).await.unwrap_err();
        assert!(matches!(err, HostError::Rejected { .. }));
    }

    #[tokio::test]
    async fn teleport_snaps_token_to_grid() {
        let host = fixture();
        let sequence = VfxSequence::new().then(VfxStep::Teleport {
            token: TokenId::new("tok-grund"),
            destination: Coordinate::new(333.0, 480.0),
        });

        host.play(&sequence).await.unwrap();
        assert_eq!(host.scene().tokens[0].position, Coordinate::new(300.0, 400.0));
    }

    #[tokio::test]
    async fn empty_roll_script_is_rejected() {
        let host = fixture();
        let err = host.evaluate(&RollRequest::new("1d6")).await.unwrap_err();
        assert_eq!(err.to_string(), "rolls rejected the request: no scripted roll left");
        assert_eq!(host.roll_log(), vec!["1d6".to_string()]);
    }
}
