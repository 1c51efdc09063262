//! Feedback-item status lifecycle and board drag-and-drop coordination
//!
//! This crate implements the engine behind a feedback board: the finite set
//! of lifecycle states, the spatial drop-zone registry, the drag session
//! state machine for pointer and touch gestures, and the coordinator that
//! derives column views, applies optimistic status moves, and issues
//! asynchronous persistence commits. Rendering, persistence storage, and
//! auth all live in the surrounding application; the engine consumes a
//! host-supplied item collection and a [`PersistenceBackend`] and exposes
//! view models plus side-[`Effect`]s for the host to act on.
//!
//! ## Basic usage
//!
//! ```rust,no_run
//! use feedback_board::{
//!     BoardCoordinator, DropZone, FeedbackItem, PersistenceBackend, Point, Rect, Status,
//! };
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! # async fn example(backend: Arc<dyn PersistenceBackend>) -> feedback_board::Result<()> {
//! let mut board = BoardCoordinator::new(backend);
//! board
//!     .replace_items(vec![FeedbackItem::new("Crash when saving")])
//!     .await;
//! board.rebuild_zones(vec![
//!     DropZone::status(Status::New, Rect::new(0.0, 0.0, 100.0, 400.0)),
//!     DropZone::status(Status::InProgress, Rect::new(100.0, 0.0, 100.0, 400.0)),
//! ]);
//!
//! // Forward raw input events; perform the effects that come back
//! let item = board.columns().await[0].items[0].item.id.clone();
//! let effects = board.touch_start(&item, Point::new(50.0, 50.0), Instant::now()).await?;
//! for effect in effects {
//!     // schedule timers, spawn the ghost, re-render highlights...
//!     let _ = effect;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Gesture model
//!
//! Touch input enters a `picking` phase and is promoted to `dragging` by a
//! 150 ms long-press or by dominant horizontal movement; dominant vertical
//! movement reads as list scrolling and cancels the pick. Native pointer
//! drags skip `picking` entirely. At most one drag session is live at a
//! time, enforced by the owning [`DragSessionStore`].

pub mod backend;
pub mod board;
pub mod defer;
mod error;
pub mod geometry;
pub mod release;
pub mod session;
pub mod types;
pub mod zones;

pub use backend::PersistenceBackend;
pub use board::{ArchiveView, BoardCoordinator, ColumnView, DropOutcome, ItemView, SyncState};
pub use defer::DeferPrompt;
pub use error::{BoardError, Result};
pub use geometry::{Point, Rect};
pub use release::ReleasePlan;
pub use session::{
    DragConfig, DragPhase, DragSession, DragSessionStore, DropRequest, Effect, InputSource,
};
pub use zones::{DropZone, ZoneKind, ZoneRegistry};

// Re-export commonly used types
pub use types::{
    ChangelogBucket, FeedbackItem, FeedbackKind, ItemId, Priority, ReleaseSummary, ReleaseVersion,
    Status, Version,
};

/// Test helpers, available to downstream crates via the `test-support`
/// feature
#[cfg(any(test, feature = "test-support"))]
pub use backend::test_support;
