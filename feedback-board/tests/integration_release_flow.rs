//! Integration tests for the release-tagging workflow

use chrono::Utc;
use feedback_board::test_support::{BackendCall, RecordingBackend};
use feedback_board::{
    BoardCoordinator, BoardError, FeedbackItem, FeedbackKind, Status, Version,
};
use std::sync::Arc;

async fn setup() -> (BoardCoordinator, Arc<RecordingBackend>) {
    let backend = Arc::new(RecordingBackend::new());
    let mut board = BoardCoordinator::new(backend.clone());
    board.set_latest_version(Version::new(0, 3, 0));
    board
        .replace_items(vec![
            FeedbackItem::new("Crash on save")
                .with_status(Status::Completed)
                .with_kind(FeedbackKind::Bug),
            FeedbackItem::new("Dark mode")
                .with_status(Status::Completed)
                .with_kind(FeedbackKind::Feature),
            FeedbackItem::new("Snappier startup")
                .with_status(Status::Completed)
                .with_kind(FeedbackKind::Improvement),
            FeedbackItem::new("Still cooking").with_status(Status::InProgress),
        ])
        .await;
    (board, backend)
}

#[tokio::test]
async fn test_release_batch_tags_and_archives() {
    let (mut board, backend) = setup().await;

    let release = board.prepare_release("0.4.0", Utc::now()).await.unwrap();
    assert_eq!(release.version, Version::new(0, 4, 0));
    assert_eq!(release.summary.total, 3);
    assert_eq!(release.summary.fixed, 1);
    assert_eq!(release.summary.added, 1);
    assert_eq!(release.summary.improved, 1);

    assert_eq!(
        backend.calls(),
        vec![BackendCall::Release(Version::new(0, 4, 0))]
    );

    // Every completed item is tagged and archived; the in-progress one is
    // untouched
    let items = board.items().await;
    for item in &items {
        if item.title == "Still cooking" {
            assert_eq!(item.status, Status::InProgress);
            assert_eq!(item.fixed_in_version, None);
        } else {
            assert_eq!(item.status, Status::Archived);
            assert_eq!(item.fixed_in_version, Some(Version::new(0, 4, 0)));
        }
    }

    // Tagged items land in the resolved archive, not the deferred bucket
    let archive = board.archive().await;
    assert_eq!(archive.resolved.len(), 3);
    assert!(archive.deferred.is_empty());

    // The working board only shows the remaining item
    let columns = board.columns().await;
    let total: usize = columns.iter().map(|c| c.items.len()).sum();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_release_versions_must_strictly_increase() {
    let (mut board, backend) = setup().await;

    for candidate in ["0.2.0", "0.3.0", "0.2"] {
        let err = board
            .prepare_release(candidate, Utc::now())
            .await
            .unwrap_err();
        assert!(err.is_validation(), "{candidate} should fail validation");
    }
    assert!(backend.calls().is_empty());

    // A valid bump goes through, and raises the floor for the next one
    board.prepare_release("0.3.1", Utc::now()).await.unwrap();
    let err = board.prepare_release("0.3.1", Utc::now()).await.unwrap_err();
    assert!(matches!(err, BoardError::VersionNotIncreasing { .. }));
}

#[tokio::test]
async fn test_second_release_skips_already_tagged_items() {
    let (mut board, backend) = setup().await;

    board.prepare_release("0.4.0", Utc::now()).await.unwrap();

    // One more item completes afterwards
    let mut items = board.items().await;
    let late = FeedbackItem::new("Late fix")
        .with_status(Status::Completed)
        .with_kind(FeedbackKind::Bug);
    let late_id = late.id.clone();
    items.push(late);
    board.replace_items(items).await;

    let release = board.prepare_release("0.5.0", Utc::now()).await.unwrap();
    assert_eq!(release.summary.total, 1);

    let late = board.item(&late_id).await.unwrap();
    assert_eq!(late.fixed_in_version, Some(Version::new(0, 5, 0)));

    // Items from the first batch keep their original tag
    let items = board.items().await;
    let first_batch = items
        .iter()
        .find(|item| item.title == "Crash on save")
        .unwrap();
    assert_eq!(first_batch.fixed_in_version, Some(Version::new(0, 4, 0)));

    assert_eq!(backend.calls().len(), 2);
    assert_eq!(board.releases().len(), 2);
}

#[tokio::test]
async fn test_backend_rejection_leaves_items_untagged() {
    let (mut board, backend) = setup().await;
    backend.set_failing(true);

    let err = board.prepare_release("0.4.0", Utc::now()).await.unwrap_err();
    assert!(matches!(err, BoardError::Backend { .. }));

    // The batch was not applied locally
    let items = board.items().await;
    assert!(items.iter().all(|item| item.fixed_in_version.is_none()));
    assert!(board.releases().is_empty());
    assert_eq!(board.latest_version(), Some(&Version::new(0, 3, 0)));
}
