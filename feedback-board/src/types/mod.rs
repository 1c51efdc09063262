//! Core types for the board engine

mod ids;
mod item;
mod release;
mod status;
mod version;

// Re-export all types
pub use ids::ItemId;
pub use item::{FeedbackItem, FeedbackKind, Priority};
pub use release::{ChangelogBucket, ReleaseSummary, ReleaseVersion};
pub use status::Status;
pub use version::Version;
