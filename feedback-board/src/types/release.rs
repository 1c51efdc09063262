//! Release records: an immutable batch tag over completed items

use super::item::FeedbackKind;
use super::version::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Changelog bucket a tagged item's kind categorizes into.
///
/// The changelog *text* is generated elsewhere; the engine only records the
/// categorization counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangelogBucket {
    Fixed,
    Added,
    Improved,
}

impl ChangelogBucket {
    /// Total mapping from feedback kind to changelog bucket
    pub fn for_kind(kind: FeedbackKind) -> Self {
        match kind {
            FeedbackKind::Bug => Self::Fixed,
            FeedbackKind::Feature => Self::Added,
            FeedbackKind::Improvement | FeedbackKind::Other => Self::Improved,
        }
    }
}

/// Counts of tagged items per changelog bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSummary {
    pub total: usize,
    pub fixed: usize,
    pub added: usize,
    pub improved: usize,
}

impl ReleaseSummary {
    /// Tally the kinds of all tagged items
    pub fn from_kinds<I: IntoIterator<Item = FeedbackKind>>(kinds: I) -> Self {
        let mut summary = Self::default();
        for kind in kinds {
            summary.total += 1;
            match ChangelogBucket::for_kind(kind) {
                ChangelogBucket::Fixed => summary.fixed += 1,
                ChangelogBucket::Added => summary.added += 1,
                ChangelogBucket::Improved => summary.improved += 1,
            }
        }
        summary
    }
}

/// A released batch of completed items. Created once per "prepare release"
/// action; immutable thereafter. Items reference it via `fixed_in_version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseVersion {
    pub version: Version,
    pub released_at: DateTime<Utc>,
    pub summary: ReleaseSummary,
}

impl ReleaseVersion {
    /// Create a release record
    pub fn new(version: Version, released_at: DateTime<Utc>, summary: ReleaseSummary) -> Self {
        Self {
            version,
            released_at,
            summary,
        }
    }
}
