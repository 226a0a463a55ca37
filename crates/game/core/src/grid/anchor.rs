use super::{Coordinate, GridMetric};
use crate::scene::{Character, PlacedEntity, TokenId};

/// Something distances can be measured from: a bare point or a placed token.
///
/// Token-or-coordinate parameters are resolved to an `Anchor` once at the
/// boundary; geometry below this type only ever sees coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    Point(Coordinate),
    Token { id: TokenId, position: Coordinate },
}

impl Anchor {
    pub fn position(&self) -> Coordinate {
        match self {
            Anchor::Point(position) | Anchor::Token { position, .. } => *position,
        }
    }

    pub fn token(&self) -> Option<&TokenId> {
        match self {
            Anchor::Token { id, .. } => Some(id),
            Anchor::Point(_) => None,
        }
    }

    /// Two tokens are the same anchor iff their ids match; whenever a bare
    /// point is involved, identity falls back to grid-equality.
    pub fn is_same_identity(&self, other: &Anchor, metric: &GridMetric) -> bool {
        match (self, other) {
            (Anchor::Token { id: a, .. }, Anchor::Token { id: b, .. }) => a == b,
            _ => metric.is_same_square(self.position(), other.position()),
        }
    }
}

impl From<Coordinate> for Anchor {
    fn from(position: Coordinate) -> Self {
        Anchor::Point(position)
    }
}

impl From<&PlacedEntity> for Anchor {
    fn from(entity: &PlacedEntity) -> Self {
        Anchor::Token {
            id: entity.id.clone(),
            position: entity.position,
        }
    }
}

impl From<&Character> for Anchor {
    fn from(character: &Character) -> Self {
        Anchor::Token {
            id: character.token.clone(),
            position: character.position,
        }
    }
}
