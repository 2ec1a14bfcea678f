//! End-to-end joins of the messages and favorites legs.

use std::time::{Duration, Instant};

use json_join::board::{MessageBoard, Sources};
use json_join::domain::{FavoriteSet, Message, Snapshot};
use json_join::join::JoinState;
use json_join::render;

mod common;
use common::{MockBackend, Reply};

fn board(messages: &MockBackend, favorites: &MockBackend, timeout: Duration) -> MessageBoard {
    MessageBoard::new(
        common::test_fetcher(timeout),
        Sources::new(
            messages.url("/user-messages.json"),
            favorites.url("/user-favorites.json"),
        ),
    )
}

#[tokio::test]
async fn test_joined_snapshot_marks_favorite() {
    let messages = common::start_mock_backend(r#"[{"id":1,"from":"Eric","message":"hi"}]"#).await;
    let favorites = common::start_mock_backend("[1]").await;
    let board = board(&messages, &favorites, Duration::from_secs(2));

    let snapshot = board.load().await.unwrap();

    let expected = Snapshot::new(
        vec![Message { id: 1, from: "Eric".into(), message: "hi".into() }],
        [1].into_iter().collect(),
    );
    assert_eq!(snapshot, expected);
    assert!(snapshot.is_favorite(&snapshot.messages[0]));
    assert_eq!(render::render(&snapshot), "Messages\n♥ Eric: hi\n");
    assert_eq!(board.state(), JoinState::Delivered);
}

#[tokio::test]
async fn test_favorites_timing_out_twice_degrades_to_empty_set() {
    let messages = common::start_mock_backend(r#"[{"id":1,"from":"Eric","message":"hi"}]"#).await;
    let favorites = common::start_programmable_backend(|_| async { Reply::Stall }).await;
    let board = board(&messages, &favorites, Duration::from_millis(200));

    let snapshot = board.load().await.unwrap();

    assert_eq!(snapshot.messages.len(), 1);
    assert_eq!(snapshot.messages[0].from, "Eric");
    assert_eq!(snapshot.favorites, FavoriteSet::new());
    assert_eq!(favorites.hits(), 2);
    assert_eq!(messages.hits(), 1);
}

#[tokio::test]
async fn test_delivery_waits_for_delayed_leg() {
    let messages = common::start_mock_backend("[]").await;
    let favorites = common::start_mock_backend("[7]").await;
    let board = board(&messages, &favorites, Duration::from_secs(2)).with_leg_delay((1500, 1500));

    let start = Instant::now();
    let join = board.refresh();
    let status = join.status();

    let partial = JoinState::PartiallySettled { settled: 1, total: 2 };
    let reached = common::wait_for_state(&status, partial, Duration::from_millis(1200)).await;
    assert!(reached, "messages leg should settle while favorites is delayed, got {:?}", status.state());

    let (msgs, favs) = join.wait().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(1500));
    assert!(msgs.is_empty());
    assert!(favs.contains(7));
}

#[tokio::test]
async fn test_new_refresh_cancels_stale_one() {
    let messages = common::start_mock_backend("[]").await;
    let favorites = common::start_mock_backend("[1]").await;
    let board = board(&messages, &favorites, Duration::from_secs(2)).with_leg_delay((300, 300));

    let stale = board.refresh();
    let fresh = board.refresh();

    assert_eq!(stale.state(), JoinState::Cancelled);
    assert_eq!(stale.wait().await, None);

    let (_, favs) = fresh.wait().await.unwrap();
    assert!(favs.contains(1));
}

#[tokio::test]
async fn test_cancel_yields_no_delivery() {
    let messages = common::start_mock_backend("[]").await;
    let favorites = common::start_programmable_backend(|_| async { Reply::Stall }).await;
    let board = board(&messages, &favorites, Duration::from_secs(5));

    let join = board.refresh();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(board.cancel());
    assert_eq!(join.wait().await, None);
    assert_eq!(board.state(), JoinState::Cancelled);
}

#[tokio::test]
async fn test_dropping_board_cancels_outstanding_refresh() {
    let messages = common::start_mock_backend("[]").await;
    let favorites = common::start_programmable_backend(|_| async { Reply::Stall }).await;
    let board = board(&messages, &favorites, Duration::from_secs(5));

    let join = board.refresh();
    let status = join.status();
    drop(board);

    assert_eq!(status.state(), JoinState::Cancelled);
    assert_eq!(join.wait().await, None);
}
