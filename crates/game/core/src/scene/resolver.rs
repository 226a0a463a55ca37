use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use super::{ActorId, Disposition, PlacedEntity, TokenId};
use crate::grid::Coordinate;

/// Logical actor handle: the deduplicated identity behind one or more tokens.
///
/// Token-derived fields (`token`, `position`, `disposition`) describe the
/// first token seen for the actor. Equality and hashing use `actor` only.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub actor: ActorId,
    pub name: String,
    pub token: TokenId,
    pub position: Coordinate,
    pub disposition: Disposition,
}

impl PartialEq for Character {
    fn eq(&self, other: &Self) -> bool {
        self.actor == other.actor
    }
}

impl Eq for Character {}

impl Hash for Character {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.actor.hash(state);
    }
}

/// Collapses placed tokens into logical actors.
pub struct EntityResolver;

impl EntityResolver {
    pub fn resolve_actor(entity: &PlacedEntity) -> Character {
        Character {
            actor: entity.actor.clone(),
            name: entity.name.clone(),
            token: entity.id.clone(),
            position: entity.position,
            disposition: entity.disposition,
        }
    }

    /// Resolves tokens to actors, keeping the first token of each actor and
    /// preserving first-seen order.
    pub fn dedupe<'a>(entities: impl IntoIterator<Item = &'a PlacedEntity>) -> Vec<Character> {
        let mut seen = HashSet::new();
        entities
            .into_iter()
            .filter(|entity| seen.insert(&entity.actor))
            .map(Self::resolve_actor)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: &str, actor: &str, x: f64) -> PlacedEntity {
        PlacedEntity::new(
            TokenId::new(id),
            ActorId::new(actor),
            id.to_uppercase(),
            Coordinate::new(x, 0.0),
            Disposition::FRIENDLY,
        )
    }

    #[test]
    fn dedupe_keeps_first_token_per_actor() {
        let tokens = [
            token("t1", "grund", 0.0),
            token("t2", "spirit", 100.0),
            token("t3", "grund", 200.0),
        ];

        let characters = EntityResolver::dedupe(&tokens);

        assert_eq!(characters.len(), 2);
        assert_eq!(characters[0].actor, ActorId::new("grund"));
        assert_eq!(characters[0].token, TokenId::new("t1"));
        assert_eq!(characters[1].actor, ActorId::new("spirit"));
    }

    #[test]
    fn characters_compare_by_actor_only() {
        let a = EntityResolver::resolve_actor(&token("t1", "grund", 0.0));
        let b = EntityResolver::resolve_actor(&token("t9", "grund", 500.0));
        assert_eq!(a, b);
    }
}
