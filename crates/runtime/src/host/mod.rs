//! Host collaborators that power scripts call into.
//!
//! The host application (a virtual tabletop, the CLI, a test fixture) owns
//! actors, dice, effects, and presentation. The [`Host`] aggregate bundles
//! borrowed trait objects so power scripts can reach everything they need
//! without coupling to a concrete host.
mod error;
mod memory;
mod oracles;

pub use error::{Collaborator, HostError};
pub use memory::InMemoryHost;
pub use oracles::{
    ActorOracle, ChatSink, CombatOracle, DieResult, EffectOracle, HealRequest, HealthOracle,
    RollOracle, RollRequest, RollResult, UserOracle, VfxOracle,
};

use crate::api::{Notice, Notifier};

/// Borrowed collaborator bundle handed to power scripts.
///
/// Every slot is optional; accessors report [`HostError::NotAvailable`] when
/// a script reaches for a collaborator the host did not provide.
#[derive(Clone, Copy, Default)]
pub struct Host<'a> {
    actors: Option<&'a dyn ActorOracle>,
    health: Option<&'a dyn HealthOracle>,
    rolls: Option<&'a dyn RollOracle>,
    effects: Option<&'a dyn EffectOracle>,
    combat: Option<&'a dyn CombatOracle>,
    user: Option<&'a dyn UserOracle>,
    vfx: Option<&'a dyn VfxOracle>,
    chat: Option<&'a dyn ChatSink>,
    notices: Option<&'a dyn Notifier>,
}

impl<'a> Host<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_actors(mut self, actors: &'a dyn ActorOracle) -> Self {
        self.actors = Some(actors);
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: &'a dyn HealthOracle) -> Self {
        self.health = Some(health);
        self
    }

    #[must_use]
    pub fn with_rolls(mut self, rolls: &'a dyn RollOracle) -> Self {
        self.rolls = Some(rolls);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: &'a dyn EffectOracle) -> Self {
        self.effects = Some(effects);
        self
    }

    #[must_use]
    pub fn with_combat(mut self, combat: &'a dyn CombatOracle) -> Self {
        self.combat = Some(combat);
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: &'a dyn UserOracle) -> Self {
        self.user = Some(user);
        self
    }

    #[must_use]
    pub fn with_vfx(mut self, vfx: &'a dyn VfxOracle) -> Self {
        self.vfx = Some(vfx);
        self
    }

    #[must_use]
    pub fn with_chat(mut self, chat: &'a dyn ChatSink) -> Self {
        self.chat = Some(chat);
        self
    }

    #[must_use]
    pub fn with_notices(mut self, notices: &'a dyn Notifier) -> Self {
        self.notices = Some(notices);
        self
    }

    pub fn actors(&self) -> Result<&'a dyn ActorOracle, HostError> {
        self.actors
            .ok_or(HostError::NotAvailable(Collaborator::Actors))
    }

    pub fn health(&self) -> Result<&'a dyn HealthOracle, HostError> {
        self.health
            .ok_or(HostError::NotAvailable(Collaborator::Health))
    }

    pub fn rolls(&self) -> Result<&'a dyn RollOracle, HostError> {
        self.rolls.ok_or(HostError::NotAvailable(Collaborator::Rolls))
    }

    pub fn effects(&self) -> Result<&'a dyn EffectOracle, HostError> {
        self.effects
            .ok_or(HostError::NotAvailable(Collaborator::Effects))
    }

    pub fn combat(&self) -> Result<&'a dyn CombatOracle, HostError> {
        self.combat
            .ok_or(HostError::NotAvailable(Collaborator::Combat))
    }

    pub fn user(&self) -> Result<&'a dyn UserOracle, HostError> {
        self.user.ok_or(HostError::NotAvailable(Collaborator::User))
    }

    pub fn vfx(&self) -> Result<&'a dyn VfxOracle, HostError> {
        self.vfx.ok_or(HostError::NotAvailable(Collaborator::Vfx))
    }

    pub fn chat(&self) -> Result<&'a dyn ChatSink, HostError> {
        self.chat.ok_or(HostError::NotAvailable(Collaborator::Chat))
    }

    pub fn notices(&self) -> Result<&'a dyn Notifier, HostError> {
        self.notices
            .ok_or(HostError::NotAvailable(Collaborator::Notices))
    }

    /// Logs a warning and shows it to the user when a notifier is present.
    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "power warning");
        if let Some(notices) = self.notices {
            notices.notify(Notice::warning(message));
        }
    }

    /// Posts to chat when a chat sink is present.
    pub fn post(&self, message: crate::chat::ChatMessage) {
        match self.chat {
            Some(chat) => chat.post(message),
            None => tracing::debug!(%message, "chat sink missing; message dropped"),
        }
    }
}

impl std::fmt::Debug for Host<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("actors", &self.actors.is_some())
            .field("health", &self.health.is_some())
            .field("rolls", &self.rolls.is_some())
            .field("effects", &self.effects.is_some())
            .field("combat", &self.combat.is_some())
            .field("user", &self.user.is_some())
            .field("vfx", &self.vfx.is_some())
            .field("chat", &self.chat.is_some())
            .field("notices", &self.notices.is_some())
            .finish()
    }
}
