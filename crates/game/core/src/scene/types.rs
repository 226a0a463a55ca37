use std::fmt;

use crate::grid::Coordinate;

/// Host identifier of one placed token.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TokenId(pub String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token.{}", self.0)
    }
}

/// Host identifier of the logical actor behind one or more tokens.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActorId(pub String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actor.{}", self.0)
    }
}

/// Signed allegiance tag of a token.
///
/// The well-known values mirror the host's hostile/neutral/friendly scale,
/// but any integer is a valid partition: ally/enemy filters only compare tags
/// for equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Disposition(pub i8);

impl Disposition {
    pub const SECRET: Self = Self(-2);
    pub const HOSTILE: Self = Self(-1);
    pub const NEUTRAL: Self = Self(0);
    pub const FRIENDLY: Self = Self(1);

    /// Mirrored allegiance: hostile ↔ friendly, neutral stays neutral.
    /// Saturates at the edge of the tag range.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SECRET => f.write_str("secret"),
            Self::HOSTILE => f.write_str("hostile"),
            Self::NEUTRAL => f.write_str("neutral"),
            Self::FRIENDLY => f.write_str("friendly"),
            Self(other) => write!(f, "faction {}", other),
        }
    }
}

/// A token placed on the battle grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedEntity {
    pub id: TokenId,
    /// Backing logical actor. Several tokens may share one actor.
    pub actor: ActorId,
    pub name: String,
    pub position: Coordinate,
    pub disposition: Disposition,
}

impl PlacedEntity {
    pub fn new(
        id: TokenId,
        actor: ActorId,
        name: impl Into<String>,
        position: Coordinate,
        disposition: Disposition,
    ) -> Self {
        Self {
            id,
            actor,
            name: name.into(),
            position,
            disposition,
        }
    }
}

/// Snapshot of the active scene at call time.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub name: String,
    pub tokens: Vec<PlacedEntity>,
}

impl Scene {
    pub fn new(name: impl Into<String>, tokens: Vec<PlacedEntity>) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }

    pub fn with_token(mut self, token: PlacedEntity) -> Self {
        self.tokens.push(token);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_mirrors_friendly_and_hostile() {
        assert_eq!(Disposition::FRIENDLY.opposite(), Disposition::HOSTILE);
        assert_eq!(Disposition::HOSTILE.opposite(), Disposition::FRIENDLY);
        assert_eq!(Disposition::NEUTRAL.opposite(), Disposition::NEUTRAL);
    }

    #[test]
    fn opposite_saturates_at_the_lowest_tag() {
        assert_eq!(Disposition(i8::MIN).opposite(), Disposition(i8::MAX));
        assert_eq!(Disposition(i8::MAX).opposite(), Disposition(-i8::MAX));
    }

    #[test]
    fn disposition_display_names_known_tags() {
        assert_eq!(Disposition::FRIENDLY.to_string(), "friendly");
        assert_eq!(Disposition(7).to_string(), "faction 7");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn scene_serializes_ids_and_dispositions_flat() {
        let scene = Scene::new("Crypt", vec![]).with_token(PlacedEntity::new(
            TokenId::new("tok1"),
            ActorId::new("act1"),
            "Grund",
            Coordinate::new(200.0, 300.0),
            Disposition::FRIENDLY,
        ));

        let json = serde_json::to_string(&scene).unwrap();
        assert!(json.contains("\"disposition\":1"));
        assert!(json.contains("\"id\":\"tok1\""));
    }
}
