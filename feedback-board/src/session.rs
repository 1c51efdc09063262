//! Drag session state machine
//!
//! Tracks one active gesture (touch or native pointer drag) from pick-up to
//! drop. The machine is driven synchronously by input events the host
//! forwards; everything it wants the outside world to do (spawn or move the
//! ghost element, schedule or cancel the long-press timer, pulse haptics,
//! re-render a zone highlight) comes back as [`Effect`] values, so the
//! machine itself never touches a display.
//!
//! Phases: `idle → picking → dragging → dropping → idle`, with cancel exits
//! from `picking` and `dragging` back to `idle`. Touch input enters
//! `picking` and is promoted to `dragging` by the long-press timer or by
//! clear horizontal movement; native pointer drags skip `picking` entirely.
//! `dropping` is transitional: it exists only for the duration of the
//! release event that produces a [`DropRequest`].
//!
//! At most one session is live at a time. The store enforces this: a second
//! `touch_start`/`drag_start` while a session is active is ignored.

use crate::geometry::Point;
use crate::types::{ItemId, Status};
use crate::zones::{ZoneKind, ZoneRegistry};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Gesture recognition thresholds
#[derive(Debug, Clone)]
pub struct DragConfig {
    /// Minimum hold before a touch is promoted to a drag
    pub long_press: Duration,
    /// Horizontal movement that promotes a touch to a drag before the
    /// timer fires, provided horizontal displacement dominates
    pub horizontal_intent: f64,
    /// Vertical movement that cancels a pending touch drag
    pub vertical_scroll: f64,
    /// Vertical displacement must also exceed this multiple of the
    /// horizontal displacement to count as scroll intent
    pub scroll_ratio: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(150),
            horizontal_intent: 20.0,
            vertical_scroll: 15.0,
            scroll_ratio: 1.5,
        }
    }
}

/// Phase of the active drag session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragPhase {
    #[default]
    Idle,
    Picking,
    Dragging,
    Dropping,
}

impl DragPhase {
    /// Stable string representation
    pub fn as_str(self) -> &'static str {
        match self {
            DragPhase::Idle => "idle",
            DragPhase::Picking => "picking",
            DragPhase::Dragging => "dragging",
            DragPhase::Dropping => "dropping",
        }
    }
}

/// Which input device drives the session. Touch needs a ghost element and
/// long-press disambiguation; pointer drags use the native drag image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputSource {
    Touch,
    Pointer,
}

/// Side effects the host must perform in response to a gesture event, in
/// order. The engine never renders or schedules anything itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Arm the long-press timer; fire `long_press_elapsed` when it elapses
    ScheduleLongPress(Duration),
    /// Disarm a previously scheduled long-press timer
    CancelLongPress,
    /// Create the ghost element for the dragged card at the given point
    SpawnGhost { item: ItemId, at: Point },
    /// Reposition the ghost element (touch) or drag image (pointer)
    MoveGhost(Point),
    /// Remove the ghost element
    RemoveGhost,
    /// Trigger haptic feedback if the device supports it
    HapticPulse,
    /// Re-render the candidate-zone highlight; `None` clears it.
    /// Emitted only when the candidate actually changes.
    HighlightZone(Option<ZoneKind>),
}

/// The transient state of one active gesture
#[derive(Debug, Clone, Serialize)]
pub struct DragSession {
    pub item: ItemId,
    pub origin: Status,
    pub input: InputSource,
    pub phase: DragPhase,
    pub pointer: Point,
    pub candidate: Option<ZoneKind>,
    #[serde(skip)]
    start: Point,
    #[serde(skip)]
    long_press_deadline: Option<Instant>,
}

/// A completed drop, handed to the board coordinator
#[derive(Debug, Clone, PartialEq)]
pub struct DropRequest {
    pub item: ItemId,
    pub origin: Status,
    pub zone: ZoneKind,
}

/// Owner of the single live [`DragSession`].
///
/// The store is plain owned state, injected into whatever drives the board;
/// "only one session at a time" is enforced here rather than by convention.
#[derive(Debug, Default)]
pub struct DragSessionStore {
    config: DragConfig,
    session: Option<DragSession>,
}

impl DragSessionStore {
    /// Create a store with the given thresholds
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Create a store with default thresholds
    pub fn with_defaults() -> Self {
        Self::new(DragConfig::default())
    }

    /// Snapshot of the live session, for rendering ghost/highlight state
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Current phase (`Idle` when no session is live)
    pub fn phase(&self) -> DragPhase {
        self.session.as_ref().map(|s| s.phase).unwrap_or_default()
    }

    /// Whether a session is live
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// `touchstart`: begin a picking session and arm the long-press timer.
    /// Ignored if a session is already live.
    pub fn touch_start(
        &mut self,
        item: ItemId,
        origin: Status,
        point: Point,
        now: Instant,
    ) -> Vec<Effect> {
        if self.session.is_some() {
            debug!(item = %item, "ignoring touch_start while a session is active");
            return Vec::new();
        }

        self.session = Some(DragSession {
            item,
            origin,
            input: InputSource::Touch,
            phase: DragPhase::Picking,
            pointer: point,
            candidate: None,
            start: point,
            long_press_deadline: Some(now + self.config.long_press),
        });
        vec![Effect::ScheduleLongPress(self.config.long_press)]
    }

    /// Host timer callback: the long-press threshold elapsed. Promotes a
    /// picking touch session to dragging. A stale callback after the
    /// session left `picking` (cancelled, promoted, or ended) is a no-op.
    pub fn long_press_elapsed(&mut self) -> Vec<Effect> {
        match self.session.as_mut() {
            Some(session) if session.phase == DragPhase::Picking => {
                session.long_press_deadline = None;
                Self::promote(session)
            }
            _ => Vec::new(),
        }
    }

    /// `touchmove`: disambiguate scroll vs drag while picking, or track the
    /// ghost and candidate zone while dragging.
    pub fn touch_move(&mut self, point: Point, now: Instant, zones: &ZoneRegistry) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.pointer = point;

        match session.phase {
            DragPhase::Picking => {
                let dx = point.dx(session.start);
                let dy = point.dy(session.start);

                // Vertical movement dominating reads as list-scroll intent
                if dy > self.config.vertical_scroll && dy > self.config.scroll_ratio * dx {
                    debug!(item = %session.item, dx, dy, "touch read as scroll, cancelling pick");
                    self.session = None;
                    return vec![Effect::CancelLongPress];
                }

                // Dominant horizontal movement signals drag intent before
                // the timer fires
                if dx > self.config.horizontal_intent && dx > dy {
                    session.long_press_deadline = None;
                    let mut effects = vec![Effect::CancelLongPress];
                    effects.extend(Self::promote(session));
                    effects.extend(Self::update_candidate(session, zones));
                    return effects;
                }

                // Hosts that poll instead of scheduling a timer still get
                // the promotion once the deadline has passed
                if session.long_press_deadline.is_some_and(|deadline| now >= deadline) {
                    session.long_press_deadline = None;
                    let mut effects = vec![Effect::CancelLongPress];
                    effects.extend(Self::promote(session));
                    effects.extend(Self::update_candidate(session, zones));
                    return effects;
                }

                Vec::new()
            }
            DragPhase::Dragging => {
                let mut effects = vec![Effect::MoveGhost(point)];
                effects.extend(Self::update_candidate(session, zones));
                effects
            }
            DragPhase::Idle | DragPhase::Dropping => Vec::new(),
        }
    }

    /// `touchend`: drop if dragging over a usable zone, otherwise cancel.
    /// Feedback is reset regardless of outcome.
    pub fn touch_end(&mut self) -> (Vec<Effect>, Option<DropRequest>) {
        let Some(mut session) = self.session.take() else {
            return (Vec::new(), None);
        };

        match session.phase {
            DragPhase::Picking => {
                session.long_press_deadline = None;
                (vec![Effect::CancelLongPress], None)
            }
            DragPhase::Dragging => {
                session.phase = DragPhase::Dropping;
                let effects = vec![Effect::RemoveGhost, Effect::HighlightZone(None)];
                (effects, Self::take_drop(session))
            }
            DragPhase::Idle | DragPhase::Dropping => (Vec::new(), None),
        }
    }

    /// `touchcancel` (OS-level interruption): abort from `picking` or
    /// `dragging`, clearing the timer and any ghost.
    pub fn touch_cancel(&mut self) -> Vec<Effect> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        match session.phase {
            DragPhase::Picking => vec![Effect::CancelLongPress],
            DragPhase::Dragging => vec![Effect::RemoveGhost, Effect::HighlightZone(None)],
            DragPhase::Idle | DragPhase::Dropping => Vec::new(),
        }
    }

    /// Native `dragstart` on pointer devices: no picking phase, no ghost
    /// (the platform supplies a drag image). Ignored if a session is live.
    pub fn drag_start(&mut self, item: ItemId, origin: Status, point: Point) -> Vec<Effect> {
        if self.session.is_some() {
            debug!(item = %item, "ignoring drag_start while a session is active");
            return Vec::new();
        }

        self.session = Some(DragSession {
            item,
            origin,
            input: InputSource::Pointer,
            phase: DragPhase::Dragging,
            pointer: point,
            candidate: None,
            start: point,
            long_press_deadline: None,
        });
        Vec::new()
    }

    /// Native `dragover`: track pointer and candidate zone
    pub fn drag_over(&mut self, point: Point, zones: &ZoneRegistry) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.phase != DragPhase::Dragging {
            return Vec::new();
        }
        session.pointer = point;
        Self::update_candidate(session, zones)
    }

    /// Native `drop`: complete the pointer-driven session
    pub fn pointer_drop(&mut self) -> (Vec<Effect>, Option<DropRequest>) {
        let Some(mut session) = self.session.take() else {
            return (Vec::new(), None);
        };
        if session.phase != DragPhase::Dragging {
            return (Vec::new(), None);
        }
        session.phase = DragPhase::Dropping;
        (vec![Effect::HighlightZone(None)], Self::take_drop(session))
    }

    /// Abort whatever is live (host teardown)
    pub fn cancel(&mut self) -> Vec<Effect> {
        self.touch_cancel()
    }

    /// Enter `dragging`: spawn the ghost for touch input and pulse haptics
    fn promote(session: &mut DragSession) -> Vec<Effect> {
        session.phase = DragPhase::Dragging;
        match session.input {
            InputSource::Touch => vec![
                Effect::SpawnGhost {
                    item: session.item.clone(),
                    at: session.pointer,
                },
                Effect::HapticPulse,
            ],
            InputSource::Pointer => Vec::new(),
        }
    }

    /// Query the registry at the current pointer and emit a highlight
    /// effect only when the candidate changed
    fn update_candidate(session: &mut DragSession, zones: &ZoneRegistry) -> Vec<Effect> {
        let candidate = zones.kind_at(session.pointer);
        if candidate == session.candidate {
            return Vec::new();
        }
        session.candidate = candidate;
        vec![Effect::HighlightZone(candidate)]
    }

    /// Turn a finished session into a drop request, if it released over a
    /// zone other than its own column
    fn take_drop(session: DragSession) -> Option<DropRequest> {
        let zone = session.candidate?;
        if zone == ZoneKind::Status(session.origin) {
            return None;
        }
        Some(DropRequest {
            item: session.item,
            origin: session.origin,
            zone,
        })
    }
}
