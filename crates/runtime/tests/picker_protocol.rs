//! Interactive pick protocol driven by scripted picks.
mod common;

use common::{click, host, square};
use tactics_core::{
    Coordinate, EntityIndex, FactionFilter, GameError, GridMetric, PickOutcome, TargetQuery,
    TargetingError,
};
use tactics_runtime::{
    Event, EventBus, InteractivePicker, NoticeLevel, RuntimeError, ScriptedPickSource, Topic,
};

#[tokio::test]
async fn rejected_picks_notify_once_each_then_accept() {
    let host = host();
    let scene = host.scene();
    let index = EntityIndex::new(Some(&scene), GridMetric::default());
    let grund = index.character_named("Grund").expect("grund is placed");

    // ================================================================
    // Two picks out of range, one on an empty square, then the spirit
    // ================================================================
    let source = ScriptedPickSource::new([
        PickOutcome::Picked(click(20, 5)),
        PickOutcome::Picked(click(6, 12)),
        PickOutcome::Picked(click(4, 5)),
        PickOutcome::Picked(click(7, 6)),
    ]);
    let picker = InteractivePicker::new(&source, &host);
    let query = TargetQuery::from_character(&grund, &index).with_range(5);

    let selection = picker
        .select_characters(&query, &index, Some("icons/spirit.webp"))
        .await
        .expect("selection should complete");

    let characters = selection.into_option().expect("expected a selection");
    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].name, "Protecting Spirit");

    // ================================================================
    // Exactly one warning per rejection, in order
    // ================================================================
    let notices = host.notices();
    let messages: Vec<&str> = notices.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "Please target one square within 5 squares.",
            "Please target one square within 5 squares.",
            "Please target one valid token.",
        ]
    );
    assert!(notices.iter().all(|n| n.level == NoticeLevel::Warning));

    // Every attempt is anchored on the same origin.
    let requests = source.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests.iter().all(|r| r.origin == square(6, 5) && r.range == 5));
    assert_eq!(requests[0].icon.as_deref(), Some("icons/spirit.webp"));
    assert_eq!(source.remaining(), 0);
}

#[tokio::test]
async fn cancel_propagates_after_a_rejection() {
    let host = host();
    let scene = host.scene();
    let index = EntityIndex::new(Some(&scene), GridMetric::default());
    let aldric = index.character_named("Aldric").expect("aldric is placed");

    let source = ScriptedPickSource::new([
        PickOutcome::Picked(click(30, 30)),
        PickOutcome::Cancelled,
        PickOutcome::Picked(click(6, 5)),
    ]);
    let picker = InteractivePicker::new(&source, &host);
    let query = TargetQuery::from_character(&aldric, &index)
        .with_range(1)
        .with_filter(FactionFilter::Allies);

    let selection = picker
        .select_characters(&query, &index, None)
        .await
        .expect("cancel is not an error");

    assert!(selection.is_cancelled());
    assert_eq!(host.notices().len(), 1);
    // The pick after the cancel is never consumed.
    assert_eq!(source.remaining(), 1);
}

#[tokio::test]
async fn accepted_point_anchors_the_query() {
    let host = host();
    let metric = GridMetric::default();
    let source = ScriptedPickSource::new([PickOutcome::Picked(click(8, 8))]);
    let picker = InteractivePicker::new(&source, &host);

    let query = TargetQuery::from_point(square(11, 4))
        .with_range(20)
        .with_radius(3);
    let area = picker
        .select_point(&query, &metric, None)
        .await
        .expect("pick within range")
        .into_option()
        .expect("not cancelled");

    assert_eq!(area.single_origin().expect("one origin"), click(8, 8));
    assert_eq!(area.radius(), 3);
    assert_eq!(area.range(), 20);
    assert!(host.notices().is_empty());
}

#[tokio::test]
async fn multiple_origins_fail_before_any_pick() {
    let host = host();
    let source = ScriptedPickSource::new([PickOutcome::Picked(Coordinate::ORIGIN)]);
    let picker = InteractivePicker::new(&source, &host);
    let query = TargetQuery::from_origin([square(0, 0), square(3, 3)]).with_range(5);

    let err = picker
        .select_point(&query, &GridMetric::default(), None)
        .await
        .expect_err("two origins cannot anchor a pick");

    assert!(matches!(
        err,
        RuntimeError::Targeting(TargetingError::InvalidOriginCount { count: 2 })
    ));
    assert_eq!(err.error_code(), "TARGETING_INVALID_ORIGIN_COUNT");
    assert!(source.requests().is_empty());
}

#[tokio::test]
async fn exhausted_source_is_an_error() {
    let host = host();
    let source = ScriptedPickSource::new([PickOutcome::Picked(click(40, 40))]);
    let picker = InteractivePicker::new(&source, &host);
    let query = TargetQuery::from_point(square(0, 0)).with_range(2);

    let err = picker
        .select_point(&query, &GridMetric::default(), None)
        .await
        .expect_err("script ran out");

    assert!(matches!(err, RuntimeError::PickSourceClosed));
    assert_eq!(host.notices().len(), 1);
}

#[tokio::test]
async fn event_bus_carries_rejections_to_subscribers() {
    let bus = EventBus::new();
    let mut notices = bus.subscribe(Topic::Notice);

    let source = ScriptedPickSource::new([
        PickOutcome::Picked(click(9, 0)),
        PickOutcome::Picked(click(1, 0)),
    ]);
    let picker = InteractivePicker::new(&source, &bus);
    let query = TargetQuery::from_point(square(0, 0)).with_range(3);

    picker
        .select_point(&query, &GridMetric::default(), None)
        .await
        .expect("second pick is in range");

    match notices.recv().await.expect("one notice published") {
        Event::Notice(notice) => {
            assert_eq!(notice.message, "Please target one square within 3 squares.")
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(notices.try_recv().is_err());
}
