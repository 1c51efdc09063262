//! Feedback item: the unit being tracked on the board

use super::ids::ItemId;
use super::status::Status;
use super::version::Version;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classification by urgency. Orthogonal to status; used only for
/// grouping and summary, never for transition logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Classification by kind of feedback. Orthogonal to status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackKind {
    Bug,
    Feature,
    Improvement,
    #[default]
    Other,
}

/// A feedback item tracked through the status lifecycle.
///
/// `deferred_until` and `fixed_in_version` are metadata on the `archived`
/// state, not separate states: a deferred item is `archived` with a
/// reactivation date; a released item is `archived` with a version tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub id: ItemId,
    pub title: String,
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub kind: FeedbackKind,

    /// Future reactivation date; set only when archived via the defer path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deferred_until: Option<NaiveDate>,

    /// Release tag; set only when archived via the release-tagging workflow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_in_version: Option<Version>,

    /// Soft-delete flag; deleted items are excluded from every view
    #[serde(default)]
    pub is_deleted: bool,
}

impl FeedbackItem {
    /// Create a new item in the `new` state
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            title: title.into(),
            status: Status::New,
            priority: Priority::default(),
            kind: FeedbackKind::default(),
            deferred_until: None,
            fixed_in_version: None,
            is_deleted: false,
        }
    }

    /// Set the status
    pub fn with_status(mut self, status: Status) -> Self {
        self.set_status(status);
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the feedback kind
    pub fn with_kind(mut self, kind: FeedbackKind) -> Self {
        self.kind = kind;
        self
    }

    /// Assign the status, maintaining the `deferred_until ⇒ archived`
    /// invariant: leaving `archived` drops any pending deferral date.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        if status != Status::Archived {
            self.deferred_until = None;
        }
    }

    /// Archive with a reactivation date (the defer path)
    pub fn defer(&mut self, until: NaiveDate) {
        self.status = Status::Archived;
        self.deferred_until = Some(until);
    }

    /// Tag with a release version and archive (the release-tagging path)
    pub fn tag_release(&mut self, version: Version) {
        self.fixed_in_version = Some(version);
        self.status = Status::Archived;
        self.deferred_until = None;
    }

    /// Whether this item sits in the deferred-archive bucket
    pub fn is_deferred(&self) -> bool {
        self.status == Status::Archived && self.deferred_until.is_some()
    }

    /// Whether this item is eligible for release tagging:
    /// completed, not yet tagged, not soft-deleted
    pub fn is_releasable(&self) -> bool {
        !self.is_deleted && self.status == Status::Completed && self.fixed_in_version.is_none()
    }
}
