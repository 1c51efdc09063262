//! Drop-zone registry: spatial lookup from a screen coordinate to the
//! logical column or action zone under it
//!
//! Zones are wholesale re-registered whenever the host's column layout
//! changes (e.g. a responsive breakpoint switch); stale zones are discarded
//! on every rebuild, so there is no persistent zone identity across layout
//! changes. Hit-testing is plain point-in-rect containment over the
//! registered list, which keeps it unit-testable without a live display.

use crate::geometry::{Point, Rect};
use crate::types::Status;
use serde::{Deserialize, Serialize};

/// What a drop zone maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneKind {
    /// A plain status column
    Status(Status),
    /// The defer target: archive with a reactivation date
    Defer,
    /// The archive-browse affordance: navigation on click, a direct
    /// `archived` target during an active drag
    ArchiveBrowse,
}

impl ZoneKind {
    /// The status a drop on this zone transitions to, if it is a direct
    /// transition target. `Defer` is not: it opens a prompt instead.
    pub fn drop_status(self) -> Option<Status> {
        match self {
            ZoneKind::Status(status) => Some(status),
            ZoneKind::ArchiveBrowse => Some(Status::Archived),
            ZoneKind::Defer => None,
        }
    }
}

/// A registered drop target region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropZone {
    pub kind: ZoneKind,
    pub rect: Rect,
}

impl DropZone {
    /// Create a zone
    pub fn new(kind: ZoneKind, rect: Rect) -> Self {
        Self { kind, rect }
    }

    /// Convenience constructor for a status-column zone
    pub fn status(status: Status, rect: Rect) -> Self {
        Self::new(ZoneKind::Status(status), rect)
    }
}

/// The spatial index of currently registered drop zones
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    zones: Vec<DropZone>,
}

impl ZoneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every registered zone. Called whenever the board layout
    /// changes; previously registered zones are discarded.
    pub fn rebuild(&mut self, zones: impl IntoIterator<Item = DropZone>) {
        self.zones.clear();
        self.zones.extend(zones);
    }

    /// The zone under the given point, if any. Registration order is paint
    /// order: the first containing zone wins.
    pub fn zone_at(&self, point: Point) -> Option<&DropZone> {
        self.zones.iter().find(|zone| zone.rect.contains(point))
    }

    /// The kind of zone under the given point, if any
    pub fn kind_at(&self, point: Point) -> Option<ZoneKind> {
        self.zone_at(point).map(|zone| zone.kind)
    }

    /// Currently registered zones
    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    /// Number of registered zones
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zones are registered
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
