//! Attack resolution against the in-memory host.
mod common;

use common::host;
use tactics_content::Defense;
use tactics_core::{Character, EntityIndex, GridMetric};
use tactics_runtime::combat::attack_and_damage;
use tactics_runtime::host::RollResult;
use tactics_runtime::{AttackOptions, InMemoryHost, Power};

fn cast(host: &InMemoryHost) -> (Character, Vec<Character>) {
    let scene = host.scene();
    let index = EntityIndex::new(Some(&scene), GridMetric::default());
    let named = |name: &str| index.character_named(name).expect("placed");
    (named("Talaerin"), vec![named("Goblin"), named("Ogre")])
}

fn damaged(damages: &[tactics_runtime::DamageResult]) -> Vec<(&str, i32)> {
    damages
        .iter()
        .map(|d| (d.target.name.as_str(), d.total))
        .collect()
}

#[tokio::test]
async fn damage_follows_hits_by_default() {
    let host = host();
    // 13 meets the goblin's Reflex 13 and falls short of the ogre's 14.
    host.push_rolls([RollResult::d20(10, 3), RollResult::flat(7)]);
    let (talaerin, targets) = cast(&host);
    let power = Power::new("Arc Lash", Defense::Ref);

    let outcome = attack_and_damage(
        &host.host(),
        &talaerin,
        &power,
        &targets,
        AttackOptions::default(),
    )
    .await
    .expect("attack resolves");

    let hits: Vec<&str> = outcome.hits().map(|c| c.name.as_str()).collect();
    let misses: Vec<&str> = outcome.misses().map(|c| c.name.as_str()).collect();
    assert_eq!(hits, ["Goblin"]);
    assert_eq!(misses, ["Ogre"]);
    assert_eq!(damaged(&outcome.damages), [("Goblin", 7)]);
    assert_eq!(host.roll_log(), ["Arc Lash attack", "Arc Lash damage"]);
}

#[tokio::test]
async fn misses_take_damage_when_asked() {
    let host = host();
    host.push_rolls([RollResult::d20(10, 3), RollResult::flat(7)]);
    let (talaerin, targets) = cast(&host);
    let power = Power::new("Arc Lash", Defense::Ref);
    let options = AttackOptions {
        skip_damage_on_miss: false,
        ..AttackOptions::default()
    };

    let outcome = attack_and_damage(&host.host(), &talaerin, &power, &targets, options)
        .await
        .expect("attack resolves");

    assert_eq!(outcome.misses().count(), 1);
    assert_eq!(damaged(&outcome.damages), [("Goblin", 7), ("Ogre", 7)]);
}

#[tokio::test]
async fn all_misses_roll_no_damage() {
    let host = host();
    host.push_rolls([RollResult::d20(1, 3)]);
    let (talaerin, targets) = cast(&host);
    let power = Power::new("Arc Lash", Defense::Ref);

    let outcome = attack_and_damage(
        &host.host(),
        &talaerin,
        &power,
        &targets,
        AttackOptions::default(),
    )
    .await
    .expect("attack resolves");

    assert!(outcome.damages.is_empty());
    assert_eq!(host.roll_log(), ["Arc Lash attack"]);
}
