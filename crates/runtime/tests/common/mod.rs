//! Shared scene fixture for the runtime integration tests.
#![allow(dead_code)]

use tactics_content::{ActorSheet, Defense, HitPoints};
use tactics_core::{ActorId, Coordinate, Disposition, GridMetric, PlacedEntity, Scene, TokenId};
use tactics_runtime::InMemoryHost;

/// Top-left corner of a cell, where the host reports token positions.
pub fn square(col: i32, row: i32) -> Coordinate {
    Coordinate::from((col * 100, row * 100))
}

/// A click somewhere inside a cell.
pub fn click(col: i32, row: i32) -> Coordinate {
    Coordinate::new(f64::from(col) * 100.0 + 40.0, f64::from(row) * 100.0 + 60.0)
}

pub fn token(
    id: &str,
    actor: &str,
    name: &str,
    at: (i32, i32),
    disposition: Disposition,
) -> PlacedEntity {
    PlacedEntity::new(
        TokenId::new(id),
        ActorId::new(actor),
        name,
        square(at.0, at.1),
        disposition,
    )
}

/// ```text
///      3  4  5  6  7  8  9  10 11
///  4   T  .  .  .  .  .  .  .  O
///  5   .  .  A  G  .  .  g1 .  .
///  6   .  .  .  .  S  .  .  g2 .
/// ```
/// T Talaerin, A Aldric, G Grund, S spirit (friendly);
/// g1/g2 two tokens of one goblin actor, O ogre (hostile).
pub fn scene() -> Scene {
    Scene::new(
        "Ruined Keep",
        vec![
            token("tok-aldric", "aldric", "Aldric", (5, 5), Disposition::FRIENDLY),
            token("tok-grund", "grund", "Grund", (6, 5), Disposition::FRIENDLY),
            token("tok-spirit", "spirit", "Protecting Spirit", (7, 6), Disposition::FRIENDLY),
            token("tok-talaerin", "talaerin", "Talaerin", (3, 4), Disposition::FRIENDLY),
            token("tok-goblin-1", "goblin", "Goblin", (9, 5), Disposition::HOSTILE),
            token("tok-goblin-2", "goblin", "Goblin", (10, 6), Disposition::HOSTILE),
            token("tok-ogre", "ogre", "Ogre", (11, 4), Disposition::HOSTILE),
        ],
    )
}

pub fn sheets() -> Vec<ActorSheet> {
    use tactics_content::Ability::*;

    vec![
        ActorSheet::new(ActorId::new("aldric"), "Aldric")
            .with_ability(Cha, 5)
            .with_surges(2, 13)
            .with_hit_points(HitPoints { value: 20, max: 50, temp: 0 }),
        ActorSheet::new(ActorId::new("grund"), "Grund")
            .with_ability(Con, 4)
            .with_ability(Wis, 3)
            .with_defense(Defense::Fort, 26)
            .with_surges(3, 10)
            .with_hit_points(HitPoints { value: 10, max: 40, temp: 0 }),
        ActorSheet::new(ActorId::new("spirit"), "Protecting Spirit"),
        ActorSheet::new(ActorId::new("talaerin"), "Talaerin")
            .with_ability(Cha, 4)
            .with_surges(1, 8)
            .with_hit_points(HitPoints::full(30)),
        ActorSheet::new(ActorId::new("goblin"), "Goblin")
            .with_defense(Defense::Ac, 15)
            .with_defense(Defense::Fort, 12)
            .with_defense(Defense::Ref, 13),
        ActorSheet::new(ActorId::new("ogre"), "Ogre")
            .with_defense(Defense::Fort, 20)
            .with_defense(Defense::Ref, 14),
    ]
}

pub fn host() -> InMemoryHost {
    InMemoryHost::new(scene(), sheets(), GridMetric::default())
}

/// The keep with extra tokens appended after the regular cast.
pub fn host_with(extra: impl IntoIterator<Item = PlacedEntity>) -> InMemoryHost {
    let scene = extra
        .into_iter()
        .fold(scene(), |scene, token| scene.with_token(token));
    InMemoryHost::new(scene, sheets(), GridMetric::default())
}
