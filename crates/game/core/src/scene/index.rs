use super::{ActorId, Character, Disposition, EntityResolver, PlacedEntity, Scene};
use crate::grid::{Anchor, Coordinate, GridMetric};

/// Read-only index over the tokens of the active scene.
///
/// Built per call from an injected snapshot. Without an active scene every
/// read degrades to an empty result instead of failing.
#[derive(Clone, Copy, Debug)]
pub struct EntityIndex<'a> {
    scene: Option<&'a Scene>,
    metric: GridMetric,
}

impl<'a> EntityIndex<'a> {
    pub fn new(scene: Option<&'a Scene>, metric: GridMetric) -> Self {
        Self { scene, metric }
    }

    /// Index with no active scene.
    pub fn empty(metric: GridMetric) -> Self {
        Self::new(None, metric)
    }

    pub fn metric(&self) -> &GridMetric {
        &self.metric
    }

    pub fn scene(&self) -> Option<&'a Scene> {
        self.scene
    }

    /// All tokens placed in the active scene, in scene order.
    pub fn all_entities(&self) -> &'a [PlacedEntity] {
        self.scene.map(|scene| scene.tokens.as_slice()).unwrap_or(&[])
    }

    /// First token standing in the same square as `coord`.
    pub fn entity_at(&self, coord: Coordinate) -> Option<&'a PlacedEntity> {
        self.all_entities()
            .iter()
            .find(|entity| self.metric.is_same_square(entity.position, coord))
    }

    /// Every token standing in the same square as `coord`.
    pub fn entities_at(&self, coord: Coordinate) -> impl Iterator<Item = &'a PlacedEntity> + '_ {
        self.all_entities()
            .iter()
            .filter(move |entity| self.metric.is_same_square(entity.position, coord))
    }

    /// Tokens of the given disposition adjacent to `origin`.
    pub fn adjacent_to(&self, origin: &Anchor, disposition: Disposition) -> Vec<&'a PlacedEntity> {
        self.all_entities()
            .iter()
            .filter(|entity| {
                entity.disposition == disposition
                    && self.metric.is_adjacent(origin, &Anchor::from(*entity))
            })
            .collect()
    }

    pub fn tokens_named<'n>(&self, name: &'n str) -> impl Iterator<Item = &'a PlacedEntity> + 'n
    where
        'a: 'n,
    {
        self.all_entities()
            .iter()
            .filter(move |entity| entity.name == name)
    }

    pub fn token_named(&self, name: &str) -> Option<&'a PlacedEntity> {
        self.all_entities().iter().find(|entity| entity.name == name)
    }

    pub fn tokens_of<'b>(&self, actor: &'b ActorId) -> impl Iterator<Item = &'a PlacedEntity> + 'b
    where
        'a: 'b,
    {
        self.all_entities()
            .iter()
            .filter(move |entity| &entity.actor == actor)
    }

    /// Resolves the first token with the given name to its logical actor.
    pub fn character_named(&self, name: &str) -> Option<Character> {
        self.token_named(name).map(EntityResolver::resolve_actor)
    }

    /// Deduplicated logical actors of the whole scene.
    pub fn actors(&self) -> Vec<Character> {
        EntityResolver::dedupe(self.all_entities())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::TokenId;

    fn token(id: &str, actor: &str, col: i32, row: i32, disposition: Disposition) -> PlacedEntity {
        PlacedEntity::new(
            TokenId::new(id),
            ActorId::new(actor),
            actor,
            Coordinate::from((col * 100, row * 100)),
            disposition,
        )
    }

    fn scene() -> Scene {
        Scene::new(
            "Keep",
            vec![
                token("t-spirit", "Spirit", 5, 5, Disposition::FRIENDLY),
                token("t-grund", "Grund", 5, 6, Disposition::FRIENDLY),
                token("t-orc", "Orc", 6, 6, Disposition::HOSTILE),
                token("t-far", "Archer", 9, 9, Disposition::FRIENDLY),
                token("t-grund2", "Grund", 1, 1, Disposition::FRIENDLY),
            ],
        )
    }

    #[test]
    fn no_scene_yields_empty_reads() {
        let index = EntityIndex::empty(GridMetric::default());

        assert!(index.all_entities().is_empty());
        assert!(index.entity_at(Coordinate::ORIGIN).is_none());
        assert!(index.character_named("Grund").is_none());
        assert!(index.actors().is_empty());
        assert!(
            index
                .adjacent_to(&Anchor::Point(Coordinate::ORIGIN), Disposition::FRIENDLY)
                .is_empty()
        );
    }

    #[test]
    fn entity_at_matches_whole_square() {
        let scene = scene();
        let index = EntityIndex::new(Some(&scene), GridMetric::default());

        let found = index.entity_at(Coordinate::new(561.0, 688.0)).unwrap();
        assert_eq!(found.id, TokenId::new("t-grund"));
        assert!(index.entity_at(Coordinate::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn entities_at_returns_every_stacked_token() {
        let scene = scene().with_token(token("t-orc2", "Orc", 6, 6, Disposition::HOSTILE));
        let index = EntityIndex::new(Some(&scene), GridMetric::default());

        let ids: Vec<_> = index
            .entities_at(Coordinate::new(650.0, 620.0))
            .map(|entity| entity.id.as_str())
            .collect();
        assert_eq!(ids, ["t-orc", "t-orc2"]);
        assert_eq!(index.entities_at(Coordinate::ORIGIN).count(), 0);
    }

    #[test]
    fn adjacent_filters_by_disposition_and_excludes_origin() {
        let scene = scene();
        let index = EntityIndex::new(Some(&scene), GridMetric::default());
        let spirit = Anchor::from(&scene.tokens[0]);

        let allies = index.adjacent_to(&spirit, Disposition::FRIENDLY);
        assert_eq!(allies.len(), 1);
        assert_eq!(allies[0].id, TokenId::new("t-grund"));

        let enemies = index.adjacent_to(&spirit, Disposition::FRIENDLY.opposite());
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].id, TokenId::new("t-orc"));
    }

    #[test]
    fn name_lookups_and_actor_dedup() {
        let scene = scene();
        let index = EntityIndex::new(Some(&scene), GridMetric::default());

        assert_eq!(index.tokens_named("Grund").count(), 2);
        assert_eq!(
            index.tokens_of(&ActorId::new("Grund")).count(),
            2,
            "both Grund tokens share one actor"
        );
        assert_eq!(index.actors().len(), 4);
        assert_eq!(
            index.character_named("Grund").unwrap().token,
            TokenId::new("t-grund")
        );
    }
}
