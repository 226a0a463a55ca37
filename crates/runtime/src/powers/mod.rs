//! Power scripts.
//!
//! Each power is a short async call sequence over the targeting core, the
//! picker, and the host collaborators. Cancelling a pick is a normal outcome
//! reported as [`PowerReport::Cancelled`]; only collaborator or wiring
//! failures surface as errors.
mod ardent_strike;
mod feinting_flurry;
mod fey_step;
mod furious_bolts;
mod healing_spirit;
mod lay_on_hands;
mod leading_step;
mod spirit_companion;
mod teleport_assault;
mod thunderclap;
mod winter_arrival;

pub use ardent_strike::ardent_strike;
pub use feinting_flurry::feinting_flurry;
pub use fey_step::fey_step;
pub use furious_bolts::furious_bolts;
pub use healing_spirit::healing_spirit;
pub use lay_on_hands::lay_on_hands;
pub use leading_step::leading_step;
pub use spirit_companion::{protecting_strike, sharing_the_kill};
pub use teleport_assault::teleport_assault;
pub use thunderclap::thunderclap;
pub use winter_arrival::winter_arrival;

use tactics_core::{Character, Coordinate, EntityIndex, GridMetric, Scene, TargetingError, TokenId};

use crate::api::Result;
use crate::host::Host;
use crate::picker::InteractivePicker;

/// Everything a power script runs against.
pub struct PowerContext<'a> {
    pub host: Host<'a>,
    pub picker: InteractivePicker<'a>,
    pub scene: &'a Scene,
    pub metric: GridMetric,
    pub caster: Character,
    /// Cursor icon shown while picking.
    pub icon: Option<String>,
}

impl<'a> PowerContext<'a> {
    pub fn new(
        host: Host<'a>,
        picker: InteractivePicker<'a>,
        scene: &'a Scene,
        metric: GridMetric,
        caster: Character,
    ) -> Self {
        Self {
            host,
            picker,
            scene,
            metric,
            caster,
            icon: None,
        }
    }

    /// Resolves the caster by its token name in `scene`.
    pub fn for_caster(
        host: Host<'a>,
        picker: InteractivePicker<'a>,
        scene: &'a Scene,
        metric: GridMetric,
        caster: &str,
    ) -> Result<Self> {
        let caster = EntityIndex::new(Some(scene), metric)
            .character_named(caster)
            .ok_or_else(|| TargetingError::NameNotFound(caster.to_string()))?;
        Ok(Self::new(host, picker, scene, metric, caster))
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn index(&self) -> EntityIndex<'a> {
        EntityIndex::new(Some(self.scene), self.metric)
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// What a resolved power did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PowerSummary {
    pub power: String,
    pub hits: Vec<Character>,
    pub misses: Vec<Character>,
    /// Hit points restored per character.
    pub healed: Vec<(Character, i32)>,
    pub temp_hp: Vec<(Character, i32)>,
    /// Effect names applied per token.
    pub effects: Vec<(TokenId, String)>,
    pub teleported_to: Option<Coordinate>,
    /// Creatures moved by the power and the square each ended on.
    pub pulled: Vec<(Character, Coordinate)>,
}

impl PowerSummary {
    pub fn new(power: impl Into<String>) -> Self {
        Self {
            power: power.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PowerReport {
    Resolved(PowerSummary),
    /// The user backed out of a pick or a roll.
    Cancelled,
    /// A precondition failed; the user has been warned.
    Aborted { reason: String },
}

impl PowerReport {
    pub fn summary(&self) -> Option<&PowerSummary> {
        match self {
            PowerReport::Resolved(summary) => Some(summary),
            _ => None,
        }
    }
}

fn names(characters: &[Character]) -> Vec<&str> {
    characters.iter().map(|c| c.name.as_str()).collect()
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
