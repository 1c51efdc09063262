//! Board coordinator
//!
//! Owns the single drag session, the drop-zone registry, and the handle to
//! the shared item collection, and mediates drops. Column groupings are
//! never stored: they are recomputed from the item collection on every
//! read, so the per-item `status` field is the only state that has to stay
//! consistent.
//!
//! Drops on a plain status column mutate local state optimistically and
//! commit asynchronously. When the commit is rejected the optimistic
//! mutation is reverted — guarded so that a later drop on the same item
//! wins — and the rejection is logged; the per-item [`SyncState`] lets the
//! host surface a pending/failed indicator.

use crate::backend::PersistenceBackend;
use crate::defer::DeferPrompt;
use crate::error::{BoardError, Result};
use crate::geometry::Point;
use crate::release::ReleasePlan;
use crate::session::{DragConfig, DragSession, DragSessionStore, DropRequest, Effect};
use crate::types::{FeedbackItem, ItemId, ReleaseVersion, Status, Version};
use crate::zones::{DropZone, ZoneKind, ZoneRegistry};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Persistence status of one item's most recent commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncState {
    #[default]
    Synced,
    Pending,
    Failed,
}

/// One item as exposed to the host for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: FeedbackItem,
    pub sync: SyncState,
}

/// One column of the working board
#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub status: Status,
    pub items: Vec<ItemView>,
}

/// The archive, split into deferred items (archived with a reactivation
/// date) and resolved items (everything else that shows in the archive)
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveView {
    pub deferred: Vec<ItemView>,
    pub resolved: Vec<ItemView>,
}

/// What a mediated drop did
#[derive(Debug)]
pub enum DropOutcome {
    /// Same-column drop, or the item vanished mid-drag: nothing happened,
    /// no commit was issued
    NoOp,
    /// Optimistic local move applied; the commit is in flight
    Moved { item: ItemId, status: Status },
    /// Drop on the defer zone: a prompt was opened, nothing mutated yet
    DeferRequested(DeferPrompt),
}

/// Per-item commit bookkeeping. The generation counts optimistic
/// mutations; a commit captures the generation it was spawned under and
/// its outcome is applied only while that generation is still current, so
/// a stale result can never clobber a later write.
#[derive(Debug, Clone, Copy, Default)]
struct SyncTracker {
    state: SyncState,
    generation: u64,
}

type SharedItems = Arc<RwLock<Vec<FeedbackItem>>>;
type SharedSync = Arc<RwLock<HashMap<ItemId, SyncTracker>>>;

/// The board drag-and-drop coordination engine
pub struct BoardCoordinator {
    items: SharedItems,
    sync: SharedSync,
    backend: Arc<dyn PersistenceBackend>,
    session: DragSessionStore,
    zones: ZoneRegistry,
    releases: Vec<ReleaseVersion>,
    latest_version: Option<Version>,
    commits: Vec<JoinHandle<()>>,
}

impl BoardCoordinator {
    /// Columns of the working board, in display order
    pub const WORKING_COLUMNS: [Status; 4] = [
        Status::New,
        Status::InProgress,
        Status::InReview,
        Status::Completed,
    ];

    /// Create a coordinator with default gesture thresholds
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        Self::with_config(backend, DragConfig::default())
    }

    /// Create a coordinator with custom gesture thresholds
    pub fn with_config(backend: Arc<dyn PersistenceBackend>, config: DragConfig) -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            sync: Arc::new(RwLock::new(HashMap::new())),
            backend,
            session: DragSessionStore::new(config),
            zones: ZoneRegistry::new(),
            releases: Vec::new(),
            latest_version: None,
            commits: Vec::new(),
        }
    }

    // =========================================================================
    // Read side: the host supplies the collection, the engine derives views
    // =========================================================================

    /// Replace the item collection with a fresh host-supplied snapshot.
    /// Sync markers for items no longer present are dropped.
    pub async fn replace_items(&self, items: Vec<FeedbackItem>) {
        // Lock order is always items before sync
        let mut current = self.items.write().await;
        let mut sync = self.sync.write().await;
        sync.retain(|id, _| items.iter().any(|item| &item.id == id));
        *current = items;
    }

    /// Snapshot of the current collection
    pub async fn items(&self) -> Vec<FeedbackItem> {
        self.items.read().await.clone()
    }

    /// Look up one item
    pub async fn item(&self, id: &ItemId) -> Result<FeedbackItem> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| &item.id == id)
            .cloned()
            .ok_or_else(|| BoardError::item_not_found(id.as_str()))
    }

    /// Persistence status of one item's most recent commit
    pub async fn sync_state(&self, id: &ItemId) -> SyncState {
        self.sync
            .read()
            .await
            .get(id)
            .map(|tracker| tracker.state)
            .unwrap_or_default()
    }

    /// The working board: one column per workflow state, derived from the
    /// collection on every call. Soft-deleted and archived items are
    /// excluded; `wont-fix` groups with `completed`. Host order is kept.
    pub async fn columns(&self) -> Vec<ColumnView> {
        let items = self.items.read().await;
        let sync = self.sync.read().await;
        Self::WORKING_COLUMNS
            .iter()
            .map(|&status| ColumnView {
                status,
                items: items
                    .iter()
                    .filter(|item| {
                        !item.is_deleted && item.status.working_column() == Some(status)
                    })
                    .map(|item| ItemView {
                        item: item.clone(),
                        sync: sync.get(&item.id).map(|t| t.state).unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// The archive browsing view, split into deferred and resolved buckets
    pub async fn archive(&self) -> ArchiveView {
        let items = self.items.read().await;
        let sync = self.sync.read().await;
        let mut view = ArchiveView {
            deferred: Vec::new(),
            resolved: Vec::new(),
        };
        for item in items
            .iter()
            .filter(|item| !item.is_deleted && item.status.shows_in_archive())
        {
            let entry = ItemView {
                item: item.clone(),
                sync: sync.get(&item.id).map(|t| t.state).unwrap_or_default(),
            };
            if item.is_deferred() {
                view.deferred.push(entry);
            } else {
                view.resolved.push(entry);
            }
        }
        view
    }

    // =========================================================================
    // Zones and gesture plumbing
    // =========================================================================

    /// Re-register the drop zones after a layout change
    pub fn rebuild_zones(&mut self, zones: impl IntoIterator<Item = DropZone>) {
        self.zones.rebuild(zones);
    }

    /// The current zone registry
    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    /// Snapshot of the live drag session, for rendering
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.session.session()
    }

    /// `touchstart` on a card. Fails if the item is unknown or deleted;
    /// ignored (empty effects) while another session is live.
    pub async fn touch_start(
        &mut self,
        id: &ItemId,
        point: Point,
        now: Instant,
    ) -> Result<Vec<Effect>> {
        let origin = self.live_status(id).await?;
        Ok(self.session.touch_start(id.clone(), origin, point, now))
    }

    /// `touchmove` passthrough
    pub fn touch_move(&mut self, point: Point, now: Instant) -> Vec<Effect> {
        self.session.touch_move(point, now, &self.zones)
    }

    /// Long-press timer callback passthrough
    pub fn long_press_elapsed(&mut self) -> Vec<Effect> {
        self.session.long_press_elapsed()
    }

    /// `touchend`: finish the gesture and mediate the drop, if any
    pub async fn touch_end(&mut self) -> (Vec<Effect>, Option<DropOutcome>) {
        let (effects, request) = self.session.touch_end();
        let outcome = self.mediate(request).await;
        (effects, outcome)
    }

    /// `touchcancel` passthrough
    pub fn touch_cancel(&mut self) -> Vec<Effect> {
        self.session.touch_cancel()
    }

    /// Native `dragstart` on a card
    pub async fn drag_start(&mut self, id: &ItemId, point: Point) -> Result<Vec<Effect>> {
        let origin = self.live_status(id).await?;
        Ok(self.session.drag_start(id.clone(), origin, point))
    }

    /// Native `dragover` passthrough
    pub fn drag_over(&mut self, point: Point) -> Vec<Effect> {
        self.session.drag_over(point, &self.zones)
    }

    /// Native `drop`: finish the gesture and mediate the drop, if any
    pub async fn pointer_drop(&mut self) -> (Vec<Effect>, Option<DropOutcome>) {
        let (effects, request) = self.session.pointer_drop();
        let outcome = self.mediate(request).await;
        (effects, outcome)
    }

    async fn live_status(&self, id: &ItemId) -> Result<Status> {
        let item = self.item(id).await?;
        if item.is_deleted {
            return Err(BoardError::item_not_found(id.as_str()));
        }
        Ok(item.status)
    }

    async fn mediate(&mut self, request: Option<DropRequest>) -> Option<DropOutcome> {
        match request {
            Some(request) => Some(self.handle_drop(request).await),
            None => None,
        }
    }

    // =========================================================================
    // Drop mediation
    // =========================================================================

    /// Drop the given item on a zone. This is the same path gesture-driven
    /// drops take; hosts may also call it directly (keyboard moves, tests).
    pub async fn drop_on(&mut self, id: &ItemId, zone: ZoneKind) -> Result<DropOutcome> {
        let origin = self.live_status(id).await?;
        Ok(self
            .handle_drop(DropRequest {
                item: id.clone(),
                origin,
                zone,
            })
            .await)
    }

    async fn handle_drop(&mut self, request: DropRequest) -> DropOutcome {
        // Defer is not a direct transition target: open a prompt instead
        let Some(target) = request.zone.drop_status() else {
            debug!(item = %request.item, "drop on defer zone, opening prompt");
            return DropOutcome::DeferRequested(DeferPrompt::new(request.item, request.origin));
        };

        let origin = {
            let mut items = self.items.write().await;
            let Some(item) = items.iter_mut().find(|item| item.id == request.item) else {
                warn!(item = %request.item, "dropped item vanished from the collection");
                return DropOutcome::NoOp;
            };
            // A host refresh may soft-delete the item mid-drag
            if item.is_deleted {
                warn!(item = %item.id, "dropped item was deleted mid-drag");
                return DropOutcome::NoOp;
            }
            // Dropping onto the column the item already occupies is a no-op,
            // detected before persistence is invoked
            if item.status == target {
                debug!(item = %item.id, status = %target, "same-column drop ignored");
                return DropOutcome::NoOp;
            }
            let origin = item.status;
            item.set_status(target);
            origin
        };
        let generation = {
            let mut sync = self.sync.write().await;
            let tracker = sync.entry(request.item.clone()).or_default();
            tracker.generation += 1;
            tracker.state = SyncState::Pending;
            tracker.generation
        };
        debug!(item = %request.item, from = %origin, to = %target, "optimistic status move");

        self.commits.push(Self::spawn_commit(
            Arc::clone(&self.backend),
            Arc::clone(&self.items),
            Arc::clone(&self.sync),
            request.item.clone(),
            origin,
            target,
            generation,
        ));

        DropOutcome::Moved {
            item: request.item,
            status: target,
        }
    }

    /// Commit asynchronously; the optimistic local state does not wait for
    /// it. The outcome is applied only while the captured generation is
    /// still current: a stale result, success or failure, belongs to a
    /// superseded mutation and is dropped (last write wins). On a current
    /// rejection the move is reverted, unless the item's status no longer
    /// carries the optimistic value (a host refresh landed in between).
    fn spawn_commit(
        backend: Arc<dyn PersistenceBackend>,
        items: SharedItems,
        sync: SharedSync,
        id: ItemId,
        origin: Status,
        target: Status,
        generation: u64,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            match backend.commit_status_change(&id, target).await {
                Ok(()) => {
                    let mut sync = sync.write().await;
                    if let Some(tracker) = sync.get_mut(&id) {
                        if tracker.generation == generation {
                            tracker.state = SyncState::Synced;
                        }
                    }
                }
                Err(error) => {
                    // Lock order is always items before sync
                    let mut items = items.write().await;
                    let mut sync = sync.write().await;
                    let current = sync.get(&id).map(|tracker| tracker.generation);
                    if current != Some(generation) {
                        debug!(
                            item = %id, status = %target, %error,
                            "stale commit rejection ignored, a later write owns the item"
                        );
                        return;
                    }
                    warn!(item = %id, status = %target, %error, "status commit rejected, reverting");
                    if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                        if item.status == target {
                            item.set_status(origin);
                        }
                    }
                    if let Some(tracker) = sync.get_mut(&id) {
                        tracker.state = SyncState::Failed;
                    }
                }
            }
        })
    }

    /// Wait for every in-flight status commit to settle. Hosts call this on
    /// teardown; tests use it for determinism.
    pub async fn flush_commits(&mut self) {
        for handle in self.commits.drain(..) {
            let _ = handle.await;
        }
    }

    // =========================================================================
    // Defer and release workflows
    // =========================================================================

    /// Confirm an open defer prompt: validate the date, commit once, then
    /// archive the item locally with its reactivation date. On any error
    /// nothing changes and the prompt stays open.
    pub async fn confirm_defer(&self, prompt: &DeferPrompt, today: NaiveDate) -> Result<()> {
        let date = prompt.validated_date(today)?;
        self.backend
            .commit_defer(&prompt.item, date, prompt.notes())
            .await?;

        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == prompt.item)
            .ok_or_else(|| BoardError::item_not_found(prompt.item.as_str()))?;
        item.defer(date);
        drop(items);

        let mut sync = self.sync.write().await;
        let tracker = sync.entry(prompt.item.clone()).or_default();
        tracker.generation += 1;
        tracker.state = SyncState::Synced;
        drop(sync);
        debug!(item = %prompt.item, until = %date, "item deferred");
        Ok(())
    }

    /// Prepare a release: validate the candidate version, stage every
    /// completed untagged item, commit the batch, then tag and archive the
    /// staged items locally. Validation failures change nothing.
    pub async fn prepare_release(
        &mut self,
        candidate: &str,
        released_at: DateTime<Utc>,
    ) -> Result<ReleaseVersion> {
        let snapshot = self.items.read().await.clone();
        let plan = ReleasePlan::new(candidate, self.latest_version.as_ref(), &snapshot)?;

        self.backend.prepare_release(&plan.version).await?;

        let mut items = self.items.write().await;
        for item in items.iter_mut() {
            if plan.staged.contains(&item.id) {
                item.tag_release(plan.version);
            }
        }
        drop(items);

        let mut sync = self.sync.write().await;
        for id in &plan.staged {
            let tracker = sync.entry(id.clone()).or_default();
            tracker.generation += 1;
            tracker.state = SyncState::Synced;
        }
        drop(sync);

        let release = ReleaseVersion::new(plan.version, released_at, plan.summary);
        debug!(version = %release.version, tagged = plan.staged.len(), "release prepared");
        self.latest_version = Some(release.version);
        self.releases.push(release.clone());
        Ok(release)
    }

    /// The latest known release version
    pub fn latest_version(&self) -> Option<&Version> {
        self.latest_version.as_ref()
    }

    /// Seed the latest release version from host-side history
    pub fn set_latest_version(&mut self, version: Version) {
        self.latest_version = Some(version);
    }

    /// Releases prepared through this coordinator, oldest first
    pub fn releases(&self) -> &[ReleaseVersion] {
        &self.releases
    }
}
