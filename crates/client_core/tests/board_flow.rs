use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration as StdDuration,
};

use chrono::{DateTime, Duration, TimeZone, Utc};
use client_core::{
    Board, BoardError, BoardSettings, Component, ComponentKey, Container, DisplayMode, DraftEdit,
    EditTarget, FilterStore, FixedClock, InMemoryPointsApi, Observable, PointsApi, PointsStore,
    Screen, Seed, ViewState,
};
use shared::{
    domain::{Destination, Offer, OfferGroup, PointDetails, PointId, PointType, TripPoint},
    protocol::{FilterKind, SortKind, UpdateKind},
};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, day, hour, 0, 0).unwrap()
}

fn trip_point(
    id: i64,
    point_type: PointType,
    destination: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    price: u32,
) -> TripPoint {
    TripPoint::new(
        PointId(id),
        PointDetails {
            point_type,
            destination: destination.into(),
            date_from: from,
            date_to: to,
            base_price: price,
            offers: Vec::new(),
            is_favorite: false,
        },
    )
}

fn seed() -> Seed {
    Seed {
        points: vec![
            trip_point(1, PointType::Taxi, "Kyoto", at(2, 9), at(2, 9) + Duration::minutes(30), 40),
            trip_point(2, PointType::Flight, "Osaka", at(1, 10), at(1, 12), 300),
            trip_point(3, PointType::Train, "Nara", at(3, 8), at(3, 10), 120),
        ],
        destinations: ["Kyoto", "Osaka", "Nara"]
            .into_iter()
            .map(|name| Destination {
                name: name.into(),
                description: String::new(),
            })
            .collect(),
        offers: vec![
            OfferGroup {
                point_type: PointType::Taxi,
                offers: vec![Offer::new("Comfort class", 25)],
            },
            OfferGroup {
                point_type: PointType::Flight,
                offers: vec![Offer::new("Extra luggage", 30)],
            },
        ],
    }
}

struct Harness {
    board: Board<Screen>,
    points: Arc<PointsStore>,
    api: Arc<InMemoryPointsApi>,
}

fn harness_with(api: InMemoryPointsApi, now: DateTime<Utc>) -> Harness {
    let points = Arc::new(PointsStore::new());
    let filter = Arc::new(FilterStore::new());
    let api = Arc::new(api);
    let service: Arc<dyn PointsApi> = api.clone();
    let mut board = Board::new(
        Arc::clone(&points),
        filter,
        service,
        Screen::new(),
        BoardSettings::default(),
    )
    .with_clock(Arc::new(FixedClock(now)));
    board.initialize();
    Harness { board, points, api }
}

async fn loaded() -> Harness {
    let mut harness = harness_with(InMemoryPointsApi::new(seed()), at(1, 0) - Duration::days(30));
    harness.board.load().await.expect("load");
    harness
}

fn add_button_enabled(screen: &Screen) -> bool {
    matches!(
        screen.get(ComponentKey::AddButton),
        Some(Component::AddButton { enabled: true })
    )
}

fn form_state(screen: &Screen, id: i64) -> Option<ViewState> {
    match screen.get(ComponentKey::Point(PointId(id))) {
        Some(Component::PointForm(form)) => Some(form.state),
        _ => None,
    }
}

#[tokio::test(start_paused = true)]
async fn loading_placeholder_gives_way_to_day_ordered_list() {
    let mut harness = harness_with(InMemoryPointsApi::new(seed()), at(1, 0));
    let screen = harness.board.renderer();
    assert!(screen.is_mounted(ComponentKey::Loading));
    assert!(!add_button_enabled(screen));
    assert!(matches!(
        harness.board.begin_create(),
        Err(BoardError::Loading)
    ));

    harness.board.load().await.expect("load");

    let screen = harness.board.renderer();
    assert!(!harness.board.is_loading());
    assert!(!screen.is_mounted(ComponentKey::Loading));
    assert!(screen.is_mounted(ComponentKey::Sort));
    assert!(screen.is_mounted(ComponentKey::TripSummary));
    assert!(add_button_enabled(screen));
    assert_eq!(
        screen.listed_points(),
        vec![PointId(2), PointId(1), PointId(3)]
    );
    assert_eq!(harness.board.view_order(), screen.listed_points().as_slice());
    assert_eq!(harness.board.catalog().destinations.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn failed_initial_load_shows_empty_board() {
    let mut harness = harness_with(
        InMemoryPointsApi::new(seed()).with_failing_fetch(),
        at(1, 0),
    );
    harness.board.load().await.expect("load completes");

    let screen = harness.board.renderer();
    assert!(!harness.board.is_loading());
    assert!(harness.points.is_empty());
    assert_eq!(
        screen.get(ComponentKey::Empty),
        Some(&Component::Empty {
            filter: FilterKind::Everything
        })
    );
    assert!(!screen.is_mounted(ComponentKey::List));
    assert!(!screen.is_mounted(ComponentKey::Sort));
}

#[tokio::test(start_paused = true)]
async fn confirmed_save_updates_store_once() {
    let mut harness = loaded().await;
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    harness.points.add_observer(move |_, _: Option<&TripPoint>| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    harness.board.edit_point(PointId(1)).expect("edit");
    harness
        .board
        .edit_draft(PointId(1), DraftEdit::SetBasePrice(55))
        .expect("price");
    harness.board.save_point(PointId(1)).expect("save");

    assert_eq!(
        form_state(harness.board.renderer(), 1),
        Some(ViewState::Saving)
    );
    assert_eq!(
        harness.points.get(PointId(1)).expect("point").details.base_price,
        40
    );

    harness.board.settle().await.expect("settle");

    assert_eq!(notifications.load(Ordering::SeqCst), 1);
    assert_eq!(
        harness.points.get(PointId(1)).expect("point").details.base_price,
        55
    );
    assert_eq!(
        harness.api.points().await[0].details.base_price,
        55
    );
    let screen = harness.board.renderer();
    assert!(matches!(
        screen.get(ComponentKey::Point(PointId(1))),
        Some(Component::PointCard {
            state: ViewState::Idle,
            ..
        })
    ));
    assert_eq!(harness.board.editing(), None);
}

#[tokio::test(start_paused = true)]
async fn rejected_save_shows_failure_cue_then_restores_form() {
    let mut harness = loaded().await;
    harness.api.fail_next(1);
    let before = harness.points.points();

    harness.board.edit_point(PointId(3)).expect("edit");
    harness
        .board
        .edit_draft(PointId(3), DraftEdit::SetBasePrice(999))
        .expect("price");
    harness.board.save_point(PointId(3)).expect("save");
    assert!(matches!(
        harness.board.save_point(PointId(3)),
        Err(BoardError::PointBusy(PointId(3)))
    ));

    assert!(harness.board.next_event().await.expect("event"));
    assert_eq!(
        form_state(harness.board.renderer(), 3),
        Some(ViewState::Aborting)
    );
    let presenter = harness.board.presenter(PointId(3)).expect("presenter");
    assert_eq!(presenter.draft().base_price, 120);

    harness.board.settle().await.expect("settle");

    let presenter = harness.board.presenter(PointId(3)).expect("presenter");
    assert_eq!(presenter.view_state(), ViewState::Idle);
    assert_eq!(presenter.mode(), DisplayMode::Editing);
    assert_eq!(
        form_state(harness.board.renderer(), 3),
        Some(ViewState::Idle)
    );
    assert_eq!(harness.points.points(), before);
}

#[tokio::test(start_paused = true)]
async fn favorite_toggle_refreshes_in_place() {
    let mut harness = loaded().await;
    harness.board.edit_point(PointId(1)).expect("edit");

    harness.board.toggle_favorite(PointId(2)).expect("favorite");
    harness.board.settle().await.expect("settle");

    assert!(
        harness
            .points
            .get(PointId(2))
            .expect("point")
            .details
            .is_favorite
    );
    let screen = harness.board.renderer();
    assert!(matches!(
        screen.get(ComponentKey::Point(PointId(2))),
        Some(Component::PointCard { point, .. }) if point.details.is_favorite
    ));
    assert_eq!(form_state(screen, 1), Some(ViewState::Idle));
    assert_eq!(harness.board.editing(), Some(EditTarget::Point(PointId(1))));
    assert_eq!(
        screen.listed_points(),
        vec![PointId(2), PointId(1), PointId(3)]
    );
}

#[tokio::test(start_paused = true)]
async fn opening_another_editor_closes_the_first() {
    let mut harness = loaded().await;
    harness.board.edit_point(PointId(1)).expect("edit 1");
    harness.board.edit_point(PointId(3)).expect("edit 3");

    let screen = harness.board.renderer();
    assert_eq!(form_state(screen, 1), None);
    assert_eq!(form_state(screen, 3), Some(ViewState::Idle));
    assert_eq!(harness.board.editing(), Some(EditTarget::Point(PointId(3))));
}

#[tokio::test(start_paused = true)]
async fn deleting_last_point_leaves_empty_state() {
    let seed = Seed {
        points: vec![trip_point(
            7,
            PointType::Ship,
            "Osaka",
            at(4, 9),
            at(4, 18),
            80,
        )],
        ..seed()
    };
    let mut harness = harness_with(InMemoryPointsApi::new(seed), at(1, 0));
    harness.board.load().await.expect("load");

    harness.board.delete_point(PointId(7)).expect("delete");
    assert!(matches!(
        harness.board.renderer().get(ComponentKey::Point(PointId(7))),
        Some(Component::PointCard {
            state: ViewState::Deleting,
            ..
        })
    ));
    harness.board.settle().await.expect("settle");

    let screen = harness.board.renderer();
    assert!(harness.points.is_empty());
    assert!(screen.is_mounted(ComponentKey::Empty));
    assert!(!screen.is_mounted(ComponentKey::Sort));
    assert!(!screen.is_mounted(ComponentKey::List));
    assert!(!screen.is_mounted(ComponentKey::TripSummary));
    assert!(harness.board.view_order().is_empty());
}

#[tokio::test(start_paused = true)]
async fn rejected_delete_keeps_point() {
    let mut harness = loaded().await;
    harness.api.fail_next(1);

    harness.board.delete_point(PointId(2)).expect("delete");
    assert!(harness.board.next_event().await.expect("event"));
    assert_eq!(
        harness
            .board
            .presenter(PointId(2))
            .expect("presenter")
            .view_state(),
        ViewState::Aborting
    );

    harness.board.settle().await.expect("settle");

    assert_eq!(harness.points.len(), 3);
    assert_eq!(
        harness
            .board
            .presenter(PointId(2))
            .expect("presenter")
            .view_state(),
        ViewState::Idle
    );
}

#[tokio::test(start_paused = true)]
async fn creation_form_resets_view_and_blocks_add_trigger() {
    let mut harness = loaded().await;
    harness.board.change_sort(SortKind::Price).expect("sort");
    harness.board.set_filter(FilterKind::Past).expect("filter");
    harness.board.set_filter(FilterKind::Future).expect("filter");
    harness.board.edit_point(PointId(1)).expect("edit");

    harness.board.begin_create().expect("create");

    let screen = harness.board.renderer();
    assert_eq!(harness.board.current_sort(), SortKind::Day);
    assert_eq!(harness.board.editing(), Some(EditTarget::Creation));
    assert_eq!(form_state(screen, 1), None);
    assert!(screen.is_mounted(ComponentKey::CreationForm));
    assert!(!add_button_enabled(screen));
    assert!(matches!(
        screen.components(Container::List).first(),
        Some(Component::CreationForm(_))
    ));

    harness.board.edit_point(PointId(2)).expect("edit 2");
    assert!(harness.board.creation().is_none());
    assert!(add_button_enabled(harness.board.renderer()));
}

#[tokio::test(start_paused = true)]
async fn confirmed_creation_adds_point_and_closes_form() {
    let mut harness = loaded().await;
    harness.board.begin_create().expect("create");
    harness
        .board
        .edit_creation(DraftEdit::SetDestination("Nara".into()))
        .expect("destination");
    harness
        .board
        .edit_creation(DraftEdit::SetBasePrice(210))
        .expect("price");
    harness.board.submit_creation().expect("submit");
    assert!(harness.board.creation().expect("form").is_busy());

    harness.board.settle().await.expect("settle");

    let screen = harness.board.renderer();
    assert_eq!(harness.points.len(), 4);
    let created = harness.points.get(PointId(4)).expect("created point");
    assert_eq!(created.details.destination, "Nara");
    assert_eq!(created.details.base_price, 210);
    assert!(harness.board.creation().is_none());
    assert!(!screen.is_mounted(ComponentKey::CreationForm));
    assert!(add_button_enabled(screen));
    assert!(screen.listed_points().contains(&PointId(4)));
}

#[tokio::test(start_paused = true)]
async fn rejected_creation_keeps_draft_and_form() {
    let mut harness = loaded().await;
    harness.api.fail_next(1);
    harness.board.begin_create().expect("create");
    harness
        .board
        .edit_creation(DraftEdit::SetBasePrice(77))
        .expect("price");
    harness.board.submit_creation().expect("submit");

    assert!(harness.board.next_event().await.expect("event"));
    assert_eq!(
        harness.board.creation().expect("form").view_state(),
        ViewState::Aborting
    );
    harness.board.settle().await.expect("settle");

    let creation = harness.board.creation().expect("form still open");
    assert_eq!(creation.view_state(), ViewState::Idle);
    assert_eq!(creation.draft().base_price, 77);
    assert_eq!(harness.points.len(), 3);
    assert!(!add_button_enabled(harness.board.renderer()));

    harness.board.cancel_creation().expect("cancel");
    assert!(!harness
        .board
        .renderer()
        .is_mounted(ComponentKey::CreationForm));
    assert!(add_button_enabled(harness.board.renderer()));
}

#[tokio::test(start_paused = true)]
async fn filter_without_matches_shows_filter_message() {
    let mut harness = harness_with(InMemoryPointsApi::new(seed()), at(20, 0));
    harness.board.load().await.expect("load");

    harness.board.set_filter(FilterKind::Future).expect("filter");

    let screen = harness.board.renderer();
    assert_eq!(
        screen.get(ComponentKey::Empty),
        Some(&Component::Empty {
            filter: FilterKind::Future
        })
    );
    assert!(!screen.is_mounted(ComponentKey::Sort));
    assert!(screen.listed_points().is_empty());

    harness.board.set_filter(FilterKind::Past).expect("filter");
    assert_eq!(harness.board.renderer().listed_points().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn price_sort_orders_most_expensive_first() {
    let mut harness = loaded().await;
    harness.board.change_sort(SortKind::Price).expect("sort");

    let screen = harness.board.renderer();
    assert_eq!(
        screen.listed_points(),
        vec![PointId(2), PointId(3), PointId(1)]
    );
    assert_eq!(
        screen.get(ComponentKey::Sort),
        Some(&Component::Sort {
            active: SortKind::Price
        })
    );
}

#[tokio::test(start_paused = true)]
async fn hidden_board_ignores_store_until_shown() {
    let mut harness = loaded().await;
    harness.board.change_sort(SortKind::Price).expect("sort");
    harness.board.hide();

    assert!(harness.board.is_hidden());
    assert!(!harness.board.renderer().is_mounted(ComponentKey::List));
    assert!(!add_button_enabled(harness.board.renderer()));
    assert!(matches!(
        harness.board.edit_point(PointId(1)),
        Err(BoardError::Hidden)
    ));

    let extra = trip_point(9, PointType::Bus, "Kyoto", at(5, 7), at(5, 9), 15);
    harness
        .points
        .add_point(UpdateKind::Major, extra)
        .expect("add");
    harness.board.pump().expect("pump");
    assert!(harness.board.renderer().listed_points().is_empty());

    harness.board.show();

    let screen = harness.board.renderer();
    assert_eq!(harness.board.current_sort(), SortKind::Day);
    assert_eq!(screen.listed_points().len(), 4);
    assert!(add_button_enabled(screen));

    harness
        .points
        .delete_point(UpdateKind::Minor, &harness.points.get(PointId(9)).expect("point"))
        .expect("delete");
    harness.board.pump().expect("pump");
    assert_eq!(harness.board.renderer().listed_points().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn pending_delete_stays_busy_across_a_resort() {
    let mut harness = harness_with(
        InMemoryPointsApi::new(seed()).with_latency(StdDuration::from_millis(500)),
        at(1, 0) - Duration::days(30),
    );
    harness.board.load().await.expect("load");

    harness.board.delete_point(PointId(1)).expect("delete");
    harness.board.change_sort(SortKind::Price).expect("sort");

    assert_eq!(
        harness
            .board
            .presenter(PointId(1))
            .expect("presenter")
            .view_state(),
        ViewState::Deleting
    );
    assert!(matches!(
        harness.board.renderer().get(ComponentKey::Point(PointId(1))),
        Some(Component::PointCard {
            state: ViewState::Deleting,
            ..
        })
    ));
    assert!(matches!(
        harness.board.delete_point(PointId(1)),
        Err(BoardError::PointBusy(PointId(1)))
    ));

    harness.board.settle().await.expect("settle");

    assert_eq!(harness.points.len(), 2);
    assert!(harness.board.presenter(PointId(1)).is_none());
}

#[tokio::test(start_paused = true)]
async fn pending_saves_survive_a_filter_reset() {
    let mut harness = harness_with(
        InMemoryPointsApi::new(seed()).with_latency(StdDuration::from_millis(500)),
        at(1, 0) - Duration::days(30),
    );
    harness.board.load().await.expect("load");

    harness.board.toggle_favorite(PointId(2)).expect("favorite");
    tokio::time::sleep(StdDuration::from_millis(200)).await;
    harness.board.edit_point(PointId(3)).expect("edit");
    harness
        .board
        .edit_draft(PointId(3), DraftEdit::SetBasePrice(150))
        .expect("price");
    harness.board.save_point(PointId(3)).expect("save");
    harness.board.set_filter(FilterKind::Everything).expect("filter");

    assert_eq!(
        form_state(harness.board.renderer(), 3),
        Some(ViewState::Saving)
    );
    assert_eq!(
        harness
            .board
            .presenter(PointId(3))
            .expect("presenter")
            .draft()
            .base_price,
        150
    );

    harness.board.settle().await.expect("settle");

    assert_eq!(
        harness.points.get(PointId(3)).expect("point").details.base_price,
        150
    );
    assert_eq!(
        harness
            .board
            .presenter(PointId(3))
            .expect("presenter")
            .view_state(),
        ViewState::Idle
    );
}

#[tokio::test(start_paused = true)]
async fn submitting_creation_form_cannot_be_closed_by_another_editor() {
    let mut harness = loaded().await;
    harness.board.begin_create().expect("create");
    harness
        .board
        .edit_creation(DraftEdit::SetBasePrice(777))
        .expect("price");
    harness.api.fail_next(1);
    harness.board.submit_creation().expect("submit");

    assert!(matches!(
        harness.board.edit_point(PointId(2)),
        Err(BoardError::CreationBusy)
    ));
    harness.board.set_filter(FilterKind::Past).expect("filter");
    assert!(harness
        .board
        .renderer()
        .is_mounted(ComponentKey::CreationForm));

    harness.board.settle().await.expect("settle");

    let creation = harness.board.creation().expect("form still open");
    assert_eq!(creation.view_state(), ViewState::Idle);
    assert_eq!(creation.draft().base_price, 777);
    assert_eq!(harness.board.editing(), Some(EditTarget::Creation));
    assert_eq!(harness.points.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn revert_timer_of_a_replaced_presenter_is_ignored() {
    let mut harness = loaded().await;
    harness.api.fail_next(2);

    harness.board.edit_point(PointId(3)).expect("edit");
    harness.board.save_point(PointId(3)).expect("save");
    assert!(harness.board.next_event().await.expect("rejection"));

    tokio::time::sleep(StdDuration::from_millis(300)).await;
    harness.board.change_sort(SortKind::Price).expect("sort");
    harness.board.edit_point(PointId(3)).expect("edit again");
    harness.board.save_point(PointId(3)).expect("save again");
    assert!(harness.board.next_event().await.expect("second rejection"));

    assert!(harness.board.next_event().await.expect("first timer"));
    assert_eq!(
        harness
            .board
            .presenter(PointId(3))
            .expect("presenter")
            .view_state(),
        ViewState::Aborting
    );

    assert!(harness.board.next_event().await.expect("second timer"));
    assert_eq!(
        harness
            .board
            .presenter(PointId(3))
            .expect("presenter")
            .view_state(),
        ViewState::Idle
    );
}
