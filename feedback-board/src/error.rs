//! Error types for the board engine

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Feedback item not found in the current collection
    #[error("item not found: {id}")]
    ItemNotFound { id: String },

    /// A stored status string that maps to no canonical state
    #[error("unknown status: {raw}")]
    UnknownStatus { raw: String },

    /// Release version string is not strict major.minor.patch
    #[error("invalid version: {raw}")]
    InvalidVersion { raw: String },

    /// Release version does not increase over the latest known release
    #[error("version {candidate} does not increase over latest release {latest}")]
    VersionNotIncreasing { candidate: String, latest: String },

    /// Defer confirmation without a reactivation date
    #[error("defer requires a reactivation date")]
    DeferDateRequired,

    /// Defer reactivation date lies in the past
    #[error("defer date {date} is in the past")]
    DeferDateInPast { date: NaiveDate },

    /// Persistence backend rejected a commit
    #[error("backend error: {message}")]
    Backend { message: String },
}

impl BoardError {
    /// Create an item-not-found error
    pub fn item_not_found(id: impl Into<String>) -> Self {
        Self::ItemNotFound { id: id.into() }
    }

    /// Create an unknown-status error
    pub fn unknown_status(raw: impl Into<String>) -> Self {
        Self::UnknownStatus { raw: raw.into() }
    }

    /// Create an invalid-version error
    pub fn invalid_version(raw: impl Into<String>) -> Self {
        Self::InvalidVersion { raw: raw.into() }
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Check if this is a pre-commit validation error (fully recoverable,
    /// no state was changed)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidVersion { .. }
                | Self::VersionNotIncreasing { .. }
                | Self::DeferDateRequired
                | Self::DeferDateInPast { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::item_not_found("abc123");
        assert_eq!(err.to_string(), "item not found: abc123");
    }

    #[test]
    fn test_version_error_display() {
        let err = BoardError::VersionNotIncreasing {
            candidate: "0.2.0".into(),
            latest: "0.3.0".into(),
        };
        assert!(err.to_string().contains("0.2.0"));
        assert!(err.to_string().contains("0.3.0"));
    }

    #[test]
    fn test_is_validation() {
        assert!(BoardError::DeferDateRequired.is_validation());
        assert!(BoardError::invalid_version("0.2").is_validation());
        assert!(!BoardError::backend("rejected").is_validation());
        assert!(!BoardError::item_not_found("x").is_validation());
    }
}
