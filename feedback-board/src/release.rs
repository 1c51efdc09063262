//! Release-tagging workflow: batch-assign a version to completed items
//!
//! A release is prepared in two steps. Validation runs first and is fully
//! recoverable: the candidate string must be strict semver and must
//! strictly increase over the latest known release. Only then are the
//! eligible items staged and the batch committed.

use crate::error::{BoardError, Result};
use crate::types::{FeedbackItem, ItemId, ReleaseSummary, Version};
use serde::Serialize;

/// A validated, staged release batch awaiting confirmation
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePlan {
    pub version: Version,
    pub staged: Vec<ItemId>,
    pub summary: ReleaseSummary,
}

impl ReleasePlan {
    /// Validate a candidate version string against the latest known release.
    ///
    /// Errors: [`BoardError::InvalidVersion`] for anything that is not a
    /// strict `major.minor.patch` triple, [`BoardError::VersionNotIncreasing`]
    /// when the candidate does not strictly exceed `latest`.
    pub fn validate_version(candidate: &str, latest: Option<&Version>) -> Result<Version> {
        let version = Version::parse(candidate)?;
        if let Some(latest) = latest {
            if version <= *latest {
                return Err(BoardError::VersionNotIncreasing {
                    candidate: version.to_string(),
                    latest: latest.to_string(),
                });
            }
        }
        Ok(version)
    }

    /// Build a plan: validate the version, then stage every item with
    /// `status = completed` and no `fixed_in_version` (soft-deleted items
    /// excluded). Staging an empty batch is allowed; a release can ship
    /// with no feedback items in it.
    pub fn new(candidate: &str, latest: Option<&Version>, items: &[FeedbackItem]) -> Result<Self> {
        let version = Self::validate_version(candidate, latest)?;

        let eligible: Vec<&FeedbackItem> =
            items.iter().filter(|item| item.is_releasable()).collect();
        let staged = eligible.iter().map(|item| item.id.clone()).collect();
        let summary = ReleaseSummary::from_kinds(eligible.iter().map(|item| item.kind));

        Ok(Self {
            version,
            staged,
            summary,
        })
    }

    /// Number of staged items
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeedbackKind, Status};

    #[test]
    fn test_version_must_increase() {
        let latest = Version::new(0, 3, 0);
        let err = ReleasePlan::validate_version("0.2.0", Some(&latest)).unwrap_err();
        assert!(matches!(err, BoardError::VersionNotIncreasing { .. }));

        let err = ReleasePlan::validate_version("0.3.0", Some(&latest)).unwrap_err();
        assert!(matches!(err, BoardError::VersionNotIncreasing { .. }));

        let earlier = Version::new(0, 1, 5);
        assert_eq!(
            ReleasePlan::validate_version("0.2.0", Some(&earlier)).unwrap(),
            Version::new(0, 2, 0)
        );
    }

    #[test]
    fn test_missing_patch_always_rejected() {
        assert!(matches!(
            ReleasePlan::validate_version("0.2", None).unwrap_err(),
            BoardError::InvalidVersion { .. }
        ));
        assert!(matches!(
            ReleasePlan::validate_version("0.2", Some(&Version::new(0, 1, 0))).unwrap_err(),
            BoardError::InvalidVersion { .. }
        ));
    }

    #[test]
    fn test_no_latest_accepts_any_valid_version() {
        assert_eq!(
            ReleasePlan::validate_version("0.0.1", None).unwrap(),
            Version::new(0, 0, 1)
        );
    }

    #[test]
    fn test_staging_selects_completed_untagged() {
        let completed_bug = FeedbackItem::new("Crash on save")
            .with_status(Status::Completed)
            .with_kind(FeedbackKind::Bug);
        let completed_feature = FeedbackItem::new("Dark mode")
            .with_status(Status::Completed)
            .with_kind(FeedbackKind::Feature);
        let in_progress = FeedbackItem::new("Slow startup").with_status(Status::InProgress);
        let mut tagged = FeedbackItem::new("Old fix").with_status(Status::Completed);
        tagged.tag_release(Version::new(0, 3, 0));
        let mut deleted = FeedbackItem::new("Spam").with_status(Status::Completed);
        deleted.is_deleted = true;

        let items = vec![
            completed_bug.clone(),
            completed_feature.clone(),
            in_progress,
            tagged,
            deleted,
        ];

        let plan = ReleasePlan::new("0.4.0", Some(&Version::new(0, 3, 0)), &items).unwrap();
        assert_eq!(plan.version, Version::new(0, 4, 0));
        assert_eq!(plan.staged, vec![completed_bug.id, completed_feature.id]);
        assert_eq!(plan.summary.total, 2);
        assert_eq!(plan.summary.fixed, 1);
        assert_eq!(plan.summary.added, 1);
    }

    #[test]
    fn test_empty_batch_is_allowed() {
        let items = vec![FeedbackItem::new("Fresh")];
        let plan = ReleasePlan::new("0.1.0", None, &items).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.summary, ReleaseSummary::default());
    }
}
