//! Feedback-item lifecycle states and the legal-transition policy
//!
//! Legacy stored statuses (`acknowledged`, `planned`) are normalized into
//! canonical states by a single total mapping at the deserialization
//! boundary, so the rest of the engine only ever sees canonical states.
//! `wont-fix` is a real stored state; it only *groups* differently
//! depending on the view (completed column on the working board, archived
//! bucket when browsing the archive).

use crate::error::{BoardError, Result};
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a feedback item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    New,
    InProgress,
    InReview,
    Completed,
    Archived,
    WontFix,
}

impl Status {
    /// All canonical states, in workflow order
    pub const ALL: [Status; 6] = [
        Status::New,
        Status::InProgress,
        Status::InReview,
        Status::Completed,
        Status::Archived,
        Status::WontFix,
    ];

    /// The stable wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::InProgress => "in-progress",
            Status::InReview => "in-review",
            Status::Completed => "completed",
            Status::Archived => "archived",
            Status::WontFix => "wont-fix",
        }
    }

    /// Total mapping from raw stored strings to canonical states.
    ///
    /// Accepts every canonical name plus the legacy aliases `acknowledged`
    /// and `planned` (both normalize to `New`). Anything else is an error.
    pub fn parse(raw: &str) -> Result<Status> {
        match raw {
            "new" => Ok(Status::New),
            "in-progress" => Ok(Status::InProgress),
            "in-review" => Ok(Status::InReview),
            "completed" => Ok(Status::Completed),
            "archived" => Ok(Status::Archived),
            "wont-fix" => Ok(Status::WontFix),
            // Legacy aliases from pre-lifecycle data
            "acknowledged" | "planned" => Ok(Status::New),
            other => Err(BoardError::unknown_status(other)),
        }
    }

    /// The next state along the normal-flow affordance chain
    /// (`new → in-progress → in-review → completed → archived`).
    ///
    /// This is an affordance, not an enforced transition graph: a drop may
    /// move an item between any two states.
    pub fn suggested_next(self) -> Option<Status> {
        match self {
            Status::New => Some(Status::InProgress),
            Status::InProgress => Some(Status::InReview),
            Status::InReview => Some(Status::Completed),
            Status::Completed => Some(Status::Archived),
            Status::Archived | Status::WontFix => None,
        }
    }

    /// Column this state groups into on the working board.
    ///
    /// `None` means the item is not shown there (archived items live in the
    /// archive views). `wont-fix` groups with `completed`.
    pub fn working_column(self) -> Option<Status> {
        match self {
            Status::New => Some(Status::New),
            Status::InProgress => Some(Status::InProgress),
            Status::InReview => Some(Status::InReview),
            Status::Completed | Status::WontFix => Some(Status::Completed),
            Status::Archived => None,
        }
    }

    /// Whether this state appears when browsing the archive
    pub fn shows_in_archive(self) -> bool {
        matches!(self, Status::Archived | Status::WontFix)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        Status::parse(s)
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Status::parse(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_parse_legacy_aliases() {
        assert_eq!(Status::parse("acknowledged").unwrap(), Status::New);
        assert_eq!(Status::parse("planned").unwrap(), Status::New);
    }

    #[test]
    fn test_parse_unknown() {
        let err = Status::parse("done").unwrap_err();
        assert!(matches!(err, BoardError::UnknownStatus { .. }));
    }

    #[test]
    fn test_suggested_next_chain() {
        assert_eq!(Status::New.suggested_next(), Some(Status::InProgress));
        assert_eq!(Status::InProgress.suggested_next(), Some(Status::InReview));
        assert_eq!(Status::InReview.suggested_next(), Some(Status::Completed));
        assert_eq!(Status::Completed.suggested_next(), Some(Status::Archived));
        assert_eq!(Status::Archived.suggested_next(), None);
        assert_eq!(Status::WontFix.suggested_next(), None);
    }

    #[test]
    fn test_working_column_grouping() {
        assert_eq!(Status::New.working_column(), Some(Status::New));
        assert_eq!(Status::WontFix.working_column(), Some(Status::Completed));
        assert_eq!(Status::Archived.working_column(), None);
    }

    #[test]
    fn test_archive_grouping() {
        assert!(Status::Archived.shows_in_archive());
        assert!(Status::WontFix.shows_in_archive());
        assert!(!Status::Completed.shows_in_archive());
    }

    #[test]
    fn test_serialization_is_canonical() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        // Legacy alias normalizes at the deserialization boundary
        let parsed: Status = serde_json::from_str("\"planned\"").unwrap();
        assert_eq!(parsed, Status::New);

        assert!(serde_json::from_str::<Status>("\"bogus\"").is_err());
    }
}
