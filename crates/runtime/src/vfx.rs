//! Visual effect sequences themed by power source.
//!
//! A [`VfxSequence`] is a plain description of what to play; the host's
//! [`VfxOracle`](crate::host::VfxOracle) decides how to render it. The one
//! step with a game-state side effect is [`VfxStep::Teleport`], which moves
//! a token.
use serde::{Deserialize, Serialize};
use tactics_core::{Anchor, Character, Coordinate, TokenId};

/// Power source themes. Each theme picks default animation files.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PowerSource {
    Fire,
    #[default]
    Lightning,
    Water,
    Divine,
    Nature,
    Necrotic,
    Radiant,
    Arcane,
}

/// Default animation files for one power source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceTheme {
    pub healing: &'static str,
    pub aura: &'static str,
    pub impact: &'static str,
    pub beam: &'static str,
    pub teleport_beam: &'static str,
    /// Color suffix of the arrival sparks after a teleport.
    pub teleport_color: &'static str,
}

const CURE_WOUNDS: &str = "modules/JB2A_DnD5e/Library/1st_Level/Cure_Wounds/CureWounds_01";
const PARTICLES: &str = "modules/JB2A_DnD5e/Library/Generic/Particles/ParticlesSwirl02_01_Regular";

impl PowerSource {
    pub fn theme(self) -> SourceTheme {
        use PowerSource::*;
        match self {
            Fire => SourceTheme {
                healing: "Red",
                aura: "Orange",
                impact: "jb2a.fireball.beam.orange",
                beam: "jb2a.fire_bolt.orange",
                teleport_beam: "jb2a.chain_lightning.secondary.orange",
                teleport_color: "orange",
            },
            Lightning => SourceTheme {
                healing: "Blue",
                aura: "Blue",
                impact: "jb2a.lightning_strike.blue",
                beam: "jb2a.chain_lightning.secondary.blue",
                teleport_beam: "jb2a.chain_lightning.secondary.blue",
                teleport_color: "blue",
            },
            Water => SourceTheme {
                healing: "BlueGreen",
                aura: "BlueGreen",
                impact: "jb2a.impact.water.01.blue",
                beam: "jb2a.water_jet.blue",
                teleport_beam: "jb2a.static_electricity.01.blue",
                teleport_color: "blue",
            },
            Divine => SourceTheme {
                healing: "Yellow",
                aura: "Yellow",
                impact: "jb2a.divine_smite.caster.yellowwhite",
                beam: "jb2a.energy_strands.range.standard.yellow",
                teleport_beam: "jb2a.energy_strands.range.standard.yellow",
                teleport_color: "yellow",
            },
            Nature => SourceTheme {
                healing: "Green",
                aura: "GreenYellow",
                impact: "jb2a.impact.ground_crack.green",
                beam: "jb2a.chain_lightning.secondary.green",
                teleport_beam: "jb2a.chain_lightning.secondary.green",
                teleport_color: "green",
            },
            Necrotic => SourceTheme {
                healing: "Purple",
                aura: "Purple",
                impact: "jb2a.impact.ground_crack.purple",
                beam: "jb2a.energy_strands.range.standard.purple",
                teleport_beam: "jb2a.energy_strands.range.standard.purple",
                teleport_color: "purple",
            },
            Radiant => SourceTheme {
                healing: "Yellow",
                aura: "Yellow",
                impact: "jb2a.divine_smite.caster.yellowwhite",
                beam: "jb2a.ray_of_frost.yellow",
                teleport_beam: "jb2a.energy_strands.range.standard.yellow",
                teleport_color: "yellow",
            },
            Arcane => SourceTheme {
                healing: "Blue",
                aura: "Blue",
                impact: "jb2a.magic_signs.rune.abjuration.intro.blue",
                beam: "jb2a.eldritch_blast.blue",
                teleport_beam: "jb2a.chain_lightning.secondary.blue",
                teleport_color: "blue",
            },
        }
    }

    pub fn healing_file(self) -> String {
        format!("{CURE_WOUNDS}_{}_400x400.webm", self.theme().healing)
    }

    pub fn aura_file(self) -> String {
        format!("{PARTICLES}_{}_400x400.webm", self.theme().aura)
    }
}

/// Timing of a single animation, in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub fade_in: Option<u32>,
    pub fade_out: Option<u32>,
    pub duration: Option<u32>,
}

impl Timing {
    pub const fn new(fade_in: u32, duration: u32, fade_out: u32) -> Self {
        Self {
            fade_in: Some(fade_in),
            fade_out: Some(fade_out),
            duration: Some(duration),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VfxStep {
    /// Play an animation file on an anchor.
    Effect {
        file: String,
        at: Anchor,
        scale: f64,
        timing: Timing,
        below_tokens: bool,
    },
    /// Stretch an animation between two anchors.
    Beam {
        file: String,
        from: Anchor,
        to: Anchor,
        scale: f64,
    },
    /// Pause between steps.
    Wait { millis: u32 },
    /// Move a token; the host snaps the destination to the grid.
    Teleport {
        token: TokenId,
        destination: Coordinate,
    },
}

/// Ordered list of steps played as one animation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VfxSequence {
    pub steps: Vec<VfxStep>,
}

impl VfxSequence {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn then(mut self, step: VfxStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Overrides the timing of the last animation step.
    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        if let Some(VfxStep::Effect { timing: last, .. }) = self.steps.last_mut() {
            *last = timing;
        }
        self
    }

    #[must_use]
    pub fn wait(self, millis: u32) -> Self {
        self.then(VfxStep::Wait { millis })
    }

    pub fn healing(target: impl Into<Anchor>, source: PowerSource) -> Self {
        Self::new().then(VfxStep::Effect {
            file: source.healing_file(),
            at: target.into(),
            scale: 0.5,
            timing: Timing::default(),
            below_tokens: false,
        })
    }

    pub fn aura(target: impl Into<Anchor>, source: PowerSource) -> Self {
        Self::new().then(VfxStep::Effect {
            file: source.aura_file(),
            at: target.into(),
            scale: 0.5,
            timing: Timing::new(500, 2000, 500),
            below_tokens: true,
        })
    }

    pub fn impact(target: impl Into<Anchor>, source: PowerSource) -> Self {
        Self::new().then(VfxStep::Effect {
            file: source.theme().impact.to_string(),
            at: target.into(),
            scale: 1.0,
            timing: Timing::default(),
            below_tokens: false,
        })
    }

    pub fn beam(from: impl Into<Anchor>, to: impl Into<Anchor>, source: PowerSource) -> Self {
        Self::new().then(VfxStep::Beam {
            file: source.theme().beam.to_string(),
            from: from.into(),
            to: to.into(),
            scale: 1.0,
        })
    }

    /// Arbitrary animation file with the default custom timing.
    pub fn custom(file: impl Into<String>, target: impl Into<Anchor>, scale: f64) -> Self {
        Self::new().then(VfxStep::Effect {
            file: file.into(),
            at: target.into(),
            scale,
            timing: Timing::new(500, 2500, 1000),
            below_tokens: false,
        })
    }

    /// Departure blur, a beam to the destination, the move itself, then
    /// arrival sparks on the destination square.
    pub fn teleport(character: &Character, destination: Coordinate, source: PowerSource) -> Self {
        let theme = source.theme();
        let departure = Anchor::from(character);
        Self::new()
            .then(VfxStep::Effect {
                file: format!("token:{}", character.token.as_str()),
                at: departure.clone(),
                scale: 1.0,
                timing: Timing::new(50, 550, 250),
                below_tokens: false,
            })
            .then(VfxStep::Beam {
                file: theme.teleport_beam.to_string(),
                from: departure,
                to: Anchor::Point(destination),
                scale: 1.0,
            })
            .wait(100)
            .then(VfxStep::Teleport {
                token: character.token.clone(),
                destination,
            })
            .then(VfxStep::Effect {
                file: format!("jb2a.static_electricity.03.{}", theme.teleport_color),
                at: Anchor::Point(destination),
                scale: 1.0,
                timing: Timing::default(),
                below_tokens: false,
            })
    }

    /// Destination of the first teleport step, if any.
    pub fn teleport_destination(&self) -> Option<(&TokenId, Coordinate)> {
        self.steps.iter().find_map(|step| match step {
            VfxStep::Teleport { token, destination } => Some((token, *destination)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;
    use tactics_core::{ActorId, Disposition};

    use super::*;

    #[test]
    fn power_source_parses_case_insensitively() {
        assert_eq!("LIGHTNING".parse::<PowerSource>().unwrap(), PowerSource::Lightning);
        assert_eq!("Divine".parse::<PowerSource>().unwrap(), PowerSource::Divine);
        assert!("thunder".parse::<PowerSource>().is_err());
        assert_eq!(PowerSource::iter().count(), 8);
    }

    #[test]
    fn healing_file_uses_theme_color() {
        assert!(PowerSource::Fire.healing_file().ends_with("CureWounds_01_Red_400x400.webm"));
    }

    #[test]
    fn teleport_moves_the_token_between_effects() {
        let character = Character {
            actor: ActorId::new("talaerin"),
            name: "Talaerin".into(),
            token: TokenId::new("tok-talaerin"),
            position: Coordinate::new(300.0, 400.0),
            disposition: Disposition::FRIENDLY,
        };
        let destination = Coordinate::new(650.0, 420.0);
        let sequence = VfxSequence::teleport(&character, destination, PowerSource::Lightning);

        assert_eq!(sequence.steps.len(), 5);
        assert_eq!(
            sequence.teleport_destination(),
            Some((&TokenId::new("tok-talaerin"), destination))
        );
    }
}
