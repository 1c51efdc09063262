//! Persistence backend trait
//!
//! The surrounding application owns persistence; the engine only issues
//! commits through this trait and never fetches data itself. Commits may
//! reject; how the engine reacts is the coordinator's concern.

use crate::error::Result;
use crate::types::{ItemId, Status, Version};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Asynchronous commit operations supplied by the host application
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    /// Persist a plain status change for one item
    async fn commit_status_change(&self, item: &ItemId, status: Status) -> Result<()>;

    /// Persist a deferral: archive the item with a reactivation date and
    /// optional notes, atomically from the caller's perspective
    async fn commit_defer(&self, item: &ItemId, date: NaiveDate, notes: Option<&str>) -> Result<()>;

    /// Persist a release batch: every completed, untagged item gets the
    /// version. Validation happens client-side before this is invoked.
    async fn prepare_release(&self, version: &Version) -> Result<()>;
}

/// Test helpers shared between this crate's tests and downstream crates
/// that enable the `test-support` feature.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::*;
    use crate::error::BoardError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// One recorded backend invocation
    #[derive(Debug, Clone, PartialEq)]
    pub enum BackendCall {
        StatusChange(ItemId, Status),
        Defer(ItemId, NaiveDate, Option<String>),
        Release(Version),
    }

    /// A backend that records every call and can be told to reject commits
    #[derive(Debug, Default)]
    pub struct RecordingBackend {
        calls: Mutex<Vec<BackendCall>>,
        fail: AtomicBool,
    }

    impl RecordingBackend {
        /// A backend that accepts every commit
        pub fn new() -> Self {
            Self::default()
        }

        /// A backend that rejects every commit
        pub fn failing() -> Self {
            let backend = Self::default();
            backend.fail.store(true, Ordering::SeqCst);
            backend
        }

        /// Toggle rejection for subsequent commits
        pub fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        /// Snapshot of every recorded call, in order
        pub fn calls(&self) -> Vec<BackendCall> {
            self.calls.lock().unwrap().clone()
        }

        /// Number of recorded calls
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn record(&self, call: BackendCall) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            if self.fail.load(Ordering::SeqCst) {
                return Err(BoardError::backend("rejected by test backend"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PersistenceBackend for RecordingBackend {
        async fn commit_status_change(&self, item: &ItemId, status: Status) -> Result<()> {
            self.record(BackendCall::StatusChange(item.clone(), status))
        }

        async fn commit_defer(
            &self,
            item: &ItemId,
            date: NaiveDate,
            notes: Option<&str>,
        ) -> Result<()> {
            self.record(BackendCall::Defer(
                item.clone(),
                date,
                notes.map(str::to_string),
            ))
        }

        async fn prepare_release(&self, version: &Version) -> Result<()> {
            self.record(BackendCall::Release(*version))
        }
    }
}
