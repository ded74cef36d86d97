//! Swipe-to-dismiss gesture resolution.
//!
//! [`SwipeTracker`] consumes the raw touch stream for one list row at a time
//! and decides, at gesture end, between **Dismiss** (the row flies off and the
//! host removes the conversations) and **Snap-back** (the row returns to
//! rest). The host feeds it [`TouchSample`]s and applies the translations and
//! [`AnimationSpec`]s it gets back; the tracker owns no views and runs no
//! frames.
//!
//! The decision combines travelled distance and release velocity: a swipe
//! dismisses if it went far enough, or if it was flung fast enough along the
//! primary axis in the direction it travelled. Rows that cannot be dismissed
//! can still be dragged a short, resistance-shaped distance for affordance,
//! and always snap back.
//!
//! Out-of-order events from the host's input pipeline are absorbed rather
//! than rejected: a move with no active gesture anchors a fresh one, an
//! interrupted gesture resolves exactly like a snap-back, and an unmatched
//! release is ignored.

use std::time::Duration;

use maildeck_core::logging::targets;
use maildeck_core::Signal;

use crate::error::{Error, Result};
use crate::gesture::animation::{ease, AnimationSpec, Easing};
use crate::gesture::velocity::{clamp_velocity, VelocityTracker, DEFAULT_VELOCITY_WINDOW};
use crate::model::{ConversationId, Row};

/// Default minimum release speed for a fling dismissal, in px/sec.
pub const DEFAULT_ESCAPE_VELOCITY: f32 = 100.0;

/// Default cap applied to measured velocity, in px/sec.
pub const DEFAULT_MAX_DISMISS_VELOCITY: f32 = 2000.0;

/// Default primary-axis travel before a touch becomes a drag, in px.
pub const DEFAULT_PAGING_SLOP: f32 = 16.0;

/// Default perpendicular travel that hands the gesture back to scrolling,
/// in px.
pub const DEFAULT_SCROLL_SLOP: f32 = 24.0;

/// Default primary-axis travel that locks the gesture against yielding to a
/// scroll, in px.
pub const DEFAULT_LOCK_DISTANCE: f32 = 64.0;

/// Fraction of the row extent a drag must cover to dismiss on distance alone.
pub const DISMISS_DISTANCE_FRACTION: f32 = 0.4;

/// Fraction of the row extent a fling must have covered for velocity to count.
pub const FAST_SWIPE_MIN_TRAVEL_FRACTION: f32 = 0.05;

/// Fraction of the row extent a non-dismissible row may be dragged.
pub const LOCKED_DRAG_FRACTION: f32 = 0.15;

/// Default fly-off duration when the row was released without velocity.
pub const DEFAULT_ESCAPE_DURATION: Duration = Duration::from_millis(200);

/// Longest permitted fly-off duration.
pub const DEFAULT_MAX_ESCAPE_DURATION: Duration = Duration::from_millis(400);

/// Duration of the snap-back animation.
pub const DEFAULT_SNAP_DURATION: Duration = Duration::from_millis(150);

/// The axis rows travel along when swiped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Rows swipe left/right (the usual list orientation).
    #[default]
    Horizontal,
    /// Rows swipe up/down.
    Vertical,
}

/// Tunables for swipe recognition and resolution.
///
/// The defaults correspond to a medium-density display; hosts should scale
/// the pixel thresholds by their density factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Primary axis of travel.
    pub axis: Axis,
    /// Minimum release speed for a fling dismissal, px/sec.
    pub escape_velocity: f32,
    /// Cap applied to measured velocity before use, px/sec.
    pub max_dismiss_velocity: f32,
    /// Primary-axis travel before the touch becomes a drag, px.
    pub paging_slop: f32,
    /// Perpendicular travel that yields the gesture to scrolling, px.
    pub scroll_slop: f32,
    /// Primary-axis travel that locks the gesture against yielding, px.
    pub lock_distance: f32,
    /// Fraction of the extent that dismisses on distance alone.
    pub dismiss_fraction: f32,
    /// Minimum travelled fraction of the extent for a fling to count.
    pub fast_min_fraction: f32,
    /// Drag range of a non-dismissible row, as a fraction of its extent.
    pub locked_drag_fraction: f32,
    /// Fly-off duration used when released without velocity.
    pub escape_duration: Duration,
    /// Upper bound on the fly-off duration.
    pub max_escape_duration: Duration,
    /// Snap-back duration.
    pub snap_duration: Duration,
    /// Trailing window over which release velocity is measured.
    pub velocity_window: Duration,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            escape_velocity: DEFAULT_ESCAPE_VELOCITY,
            max_dismiss_velocity: DEFAULT_MAX_DISMISS_VELOCITY,
            paging_slop: DEFAULT_PAGING_SLOP,
            scroll_slop: DEFAULT_SCROLL_SLOP,
            lock_distance: DEFAULT_LOCK_DISTANCE,
            dismiss_fraction: DISMISS_DISTANCE_FRACTION,
            fast_min_fraction: FAST_SWIPE_MIN_TRAVEL_FRACTION,
            locked_drag_fraction: LOCKED_DRAG_FRACTION,
            escape_duration: DEFAULT_ESCAPE_DURATION,
            max_escape_duration: DEFAULT_MAX_ESCAPE_DURATION,
            snap_duration: DEFAULT_SNAP_DURATION,
            velocity_window: DEFAULT_VELOCITY_WINDOW,
        }
    }
}

impl SwipeConfig {
    /// Checks the configuration for values no host can mean.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("escape_velocity", self.escape_velocity),
            ("max_dismiss_velocity", self.max_dismiss_velocity),
            ("paging_slop", self.paging_slop),
            ("scroll_slop", self.scroll_slop),
            ("lock_distance", self.lock_distance),
        ] {
            if !(value > 0.0) {
                return Err(Error::NonPositiveThreshold { name, value });
            }
        }
        for (name, value) in [
            ("dismiss_fraction", self.dismiss_fraction),
            ("fast_min_fraction", self.fast_min_fraction),
            ("locked_drag_fraction", self.locked_drag_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::FractionOutOfRange { name, value });
            }
        }
        for (name, value) in [
            ("escape_duration", self.escape_duration),
            ("max_escape_duration", self.max_escape_duration),
            ("snap_duration", self.snap_duration),
            ("velocity_window", self.velocity_window),
        ] {
            if value.is_zero() {
                return Err(Error::ZeroDuration { name });
            }
        }
        Ok(())
    }
}

/// One timestamped touch position from the host's input pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub x: f32,
    pub y: f32,
    /// Event time from the platform; any monotonic clock works, it only has
    /// to be consistent within a gesture.
    pub timestamp: Duration,
}

impl TouchSample {
    pub fn new(x: f32, y: f32, timestamp: Duration) -> Self {
        Self { x, y, timestamp }
    }
}

/// The row under the initial touch, as resolved by the host's hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTarget {
    /// The row's conversation.
    pub id: ConversationId,
    /// The row's length along the swipe axis, px.
    pub extent: f32,
    /// Whether the host's data layer allows removing this row.
    pub dismissible: bool,
}

impl SwipeTarget {
    pub fn new(id: ConversationId, extent: f32, dismissible: bool) -> Self {
        Self {
            id,
            extent,
            dismissible,
        }
    }

    /// Builds a target from a snapshot row and its on-screen extent.
    pub fn from_row(row: Row, extent: f32) -> Self {
        Self::new(row.id, extent, row.flags.dismissible)
    }
}

/// Payload of the `dismissed` signal: the host removes these conversations
/// and runs the fly-off animation. Persistence is the host's job.
#[derive(Debug, Clone, PartialEq)]
pub struct DismissEvent {
    /// Every conversation sharing the gesture (the swiped row, or the whole
    /// associated selection when several rows move together).
    pub ids: Vec<ConversationId>,
    /// Fly-off animation for the affected rows.
    pub animation: AnimationSpec,
}

/// How a finished gesture resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Remove the rows; also delivered through the `dismissed` signal.
    Dismissed(DismissEvent),
    /// Animate back to rest; `cancelled` fired for the dragged row.
    SnappedBack(AnimationSpec),
}

/// Per-move feedback for the host's render loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragFeedback {
    /// Below the drag threshold; render nothing special.
    Pending,
    /// Apply this primary-axis translation to the dragged row(s).
    Dragging { translation: f32 },
    /// The gesture went vertical and was handed back to the scroller.
    YieldedToScroll,
}

/// Per-touch-sequence state. Exists from touch-down to resolution.
#[derive(Debug)]
struct ActiveGesture {
    /// `None` when the gesture was conjured from an out-of-order move and no
    /// row is attached: it can anchor but never drag or dismiss.
    target: Option<SwipeTarget>,
    origin: (f32, f32),
    dragging: bool,
    translation: f32,
    velocity: VelocityTracker,
}

/// Resolves swipe gestures over list rows into dismissals and snap-backs.
///
/// # Signals
///
/// - `dismissed`: one batched event per dismissing gesture
/// - `cancelled`: the dragged row snapped back (or the drag was interrupted)
pub struct SwipeTracker {
    config: SwipeConfig,
    /// Rows that move with the gesture when the swiped row is part of a
    /// multi-selection.
    associated: Vec<ConversationId>,
    gesture: Option<ActiveGesture>,

    /// Emitted when a gesture resolves to a dismissal.
    pub dismissed: Signal<DismissEvent>,

    /// Emitted with the dragged row's id when a drag resolves to a snap-back
    /// or is interrupted.
    pub cancelled: Signal<ConversationId>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeTracker {
    /// Creates a tracker with the default configuration.
    pub fn new() -> Self {
        Self {
            config: SwipeConfig::default(),
            associated: Vec::new(),
            gesture: None,
            dismissed: Signal::new(),
            cancelled: Signal::new(),
        }
    }

    /// Creates a tracker with a custom, validated configuration.
    pub fn with_config(config: SwipeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Declares the rows that share the next gesture (typically the current
    /// selection, when the pressed row is part of it). With fewer than two
    /// associated rows a dismissal carries just the swiped row.
    pub fn set_associated(&mut self, ids: Vec<ConversationId>) {
        self.associated = ids;
    }

    /// Clears the associated rows.
    pub fn clear_associated(&mut self) {
        self.associated.clear();
    }

    /// `true` while a row is actively being dragged.
    pub fn is_dragging(&self) -> bool {
        self.gesture.as_ref().is_some_and(|g| g.dragging)
    }

    /// The current primary-axis translation of the dragged row.
    pub fn translation(&self) -> f32 {
        self.gesture.as_ref().map_or(0.0, |g| g.translation)
    }

    /// Begins a gesture on `target`. An earlier gesture still mid-drag is
    /// resolved as cancelled first.
    pub fn touch_down(&mut self, target: SwipeTarget, sample: TouchSample) {
        if let Some(prev) = self.gesture.take()
            && prev.dragging
            && let Some(prev_target) = prev.target
        {
            tracing::debug!(
                target: targets::GESTURE,
                id = %prev_target.id,
                "new touch interrupted active drag"
            );
            self.cancelled.emit(prev_target.id);
        }
        self.gesture = Some(self.fresh_gesture(Some(target), sample));
    }

    /// Feeds a movement sample, returning what the host should render.
    ///
    /// A move with no active gesture is treated as a fresh touch-down at that
    /// point (with no row attached), tolerating event-delivery quirks.
    pub fn touch_move(&mut self, sample: TouchSample) -> DragFeedback {
        let Some(gesture) = self.gesture.as_mut() else {
            tracing::debug!(target: targets::GESTURE, "move without down, anchoring fresh gesture");
            self.gesture = Some(self.fresh_gesture(None, sample));
            return DragFeedback::Pending;
        };

        gesture.velocity.add(sample.x, sample.y, sample.timestamp);
        let (primary, perpendicular) = split_axes(
            self.config.axis,
            sample.x - gesture.origin.0,
            sample.y - gesture.origin.1,
        );

        // Gone perpendicular without committing to the swipe: the scroller
        // owns this gesture now.
        if perpendicular.abs() > self.config.scroll_slop
            && primary.abs() < self.config.lock_distance
        {
            let was_dragging = gesture.dragging;
            let id = gesture.target.map(|t| t.id);
            self.gesture = None;
            if was_dragging && let Some(id) = id {
                tracing::debug!(target: targets::GESTURE, %id, "drag yielded to scroll");
                self.cancelled.emit(id);
            }
            return DragFeedback::YieldedToScroll;
        }

        let Some(target) = gesture.target else {
            return DragFeedback::Pending;
        };

        if !gesture.dragging {
            if primary.abs() <= self.config.paging_slop {
                return DragFeedback::Pending;
            }
            gesture.dragging = true;
            // Re-anchor so the row starts moving from rest instead of
            // jumping by the slop distance.
            match self.config.axis {
                Axis::Horizontal => gesture.origin.0 = sample.x,
                Axis::Vertical => gesture.origin.1 = sample.y,
            }
            gesture.translation = 0.0;
            tracing::trace!(target: targets::GESTURE, id = %target.id, "drag started");
            return DragFeedback::Dragging { translation: 0.0 };
        }

        gesture.translation = constrain_drag(primary, &target, &self.config);
        DragFeedback::Dragging {
            translation: gesture.translation,
        }
    }

    /// Ends the gesture at `sample` and resolves it.
    ///
    /// Returns `None` for gestures that never became drags (taps, or
    /// releases with nothing tracked); otherwise the resolution, which is
    /// also delivered through the `dismissed`/`cancelled` signals.
    pub fn touch_up(&mut self, sample: TouchSample) -> Option<Resolution> {
        let mut gesture = self.gesture.take()?;
        let target = gesture.target?;
        if !gesture.dragging {
            return None;
        }

        gesture.velocity.add(sample.x, sample.y, sample.timestamp);
        let (vx, vy) = clamp_velocity(
            gesture.velocity.velocity(),
            self.config.max_dismiss_velocity,
        );
        let (velocity, perpendicular_velocity) = split_axes(self.config.axis, vx, vy);
        let translation = gesture.translation;
        let extent = target.extent;

        let far_enough = translation.abs() > self.config.dismiss_fraction * extent;
        let fast_enough = velocity.abs() > self.config.escape_velocity
            && velocity.abs() > perpendicular_velocity.abs()
            && (velocity > 0.0) == (translation > 0.0)
            && translation.abs() > self.config.fast_min_fraction * extent;

        if target.dismissible && (far_enough || fast_enough) {
            // A distance-only dismissal flies off at the default pace rather
            // than inheriting residual finger speed.
            let fling = if fast_enough { velocity } else { 0.0 };
            let animation = self.dismiss_animation(translation, extent, fling);
            let ids = if self.associated.len() > 1 {
                self.associated.clone()
            } else {
                vec![target.id]
            };
            tracing::debug!(
                target: targets::GESTURE,
                id = %target.id,
                rows = ids.len(),
                translation,
                velocity,
                "dismiss"
            );
            let event = DismissEvent { ids, animation };
            self.dismissed.emit(event.clone());
            Some(Resolution::Dismissed(event))
        } else {
            tracing::debug!(
                target: targets::GESTURE,
                id = %target.id,
                translation,
                velocity,
                "snap back"
            );
            self.cancelled.emit(target.id);
            Some(Resolution::SnappedBack(self.snap_animation()))
        }
    }

    /// Aborts the gesture (host-framework cancel). An active drag resolves
    /// exactly like a release that snaps back; anything less is dropped
    /// silently.
    pub fn cancel(&mut self) -> Option<Resolution> {
        let gesture = self.gesture.take()?;
        let target = gesture.target?;
        if !gesture.dragging {
            return None;
        }
        tracing::debug!(target: targets::GESTURE, id = %target.id, "gesture cancelled");
        self.cancelled.emit(target.id);
        Some(Resolution::SnappedBack(self.snap_animation()))
    }

    fn fresh_gesture(&self, target: Option<SwipeTarget>, sample: TouchSample) -> ActiveGesture {
        let mut velocity = VelocityTracker::with_window(self.config.velocity_window);
        velocity.add(sample.x, sample.y, sample.timestamp);
        ActiveGesture {
            target,
            origin: (sample.x, sample.y),
            dragging: false,
            translation: 0.0,
            velocity,
        }
    }

    fn dismiss_animation(&self, translation: f32, extent: f32, velocity: f32) -> AnimationSpec {
        let target = if velocity < 0.0 || (velocity == 0.0 && translation < 0.0) {
            -extent
        } else {
            extent
        };
        let duration = if velocity != 0.0 {
            let remaining = (target - translation).abs();
            Duration::from_secs_f32(remaining / velocity.abs()).min(self.config.max_escape_duration)
        } else {
            self.config.escape_duration
        };
        AnimationSpec {
            target,
            duration,
            easing: Easing::Linear,
        }
    }

    fn snap_animation(&self) -> AnimationSpec {
        AnimationSpec {
            target: 0.0,
            duration: self.config.snap_duration,
            easing: Easing::EaseInOutSine,
        }
    }
}

/// Splits a displacement into (primary, perpendicular) components.
fn split_axes(axis: Axis, dx: f32, dy: f32) -> (f32, f32) {
    match axis {
        Axis::Horizontal => (dx, dy),
        Axis::Vertical => (dy, dx),
    }
}

/// Maps raw primary-axis displacement to the translation actually applied.
///
/// Dismissible rows follow the finger. Non-dismissible rows are squeezed into
/// `locked_drag_fraction` of their extent through a sine curve, so the user
/// feels resistance rather than a hard stop.
fn constrain_drag(delta: f32, target: &SwipeTarget, config: &SwipeConfig) -> f32 {
    if target.dismissible {
        return delta;
    }
    if target.extent <= 0.0 {
        return 0.0;
    }
    let max_drag = config.locked_drag_fraction * target.extent;
    if delta.abs() >= target.extent {
        max_drag * delta.signum()
    } else {
        max_drag * ease(Easing::EaseOutSine, delta.abs() / target.extent) * delta.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    const EXTENT: f32 = 400.0;

    fn id(raw: u64) -> ConversationId {
        ConversationId::new(raw)
    }

    fn target(dismissible: bool) -> SwipeTarget {
        SwipeTarget::new(id(7), EXTENT, dismissible)
    }

    fn at(x: f32, t_ms: u64) -> TouchSample {
        TouchSample::new(x, 100.0, Duration::from_millis(t_ms))
    }

    fn observe(
        tracker: &SwipeTracker,
    ) -> (Arc<Mutex<Vec<DismissEvent>>>, Arc<Mutex<Vec<ConversationId>>>) {
        let dismissals = Arc::new(Mutex::new(Vec::new()));
        let cancels = Arc::new(Mutex::new(Vec::new()));
        let d = dismissals.clone();
        tracker.dismissed.connect(move |event| {
            d.lock().push(event.clone());
        });
        let c = cancels.clone();
        tracker.cancelled.connect(move |id| {
            c.lock().push(*id);
        });
        (dismissals, cancels)
    }

    /// Drags slowly (no residual velocity in the trailing window) to `x`.
    fn slow_drag_to(tracker: &mut SwipeTracker, dismissible: bool, x: f32) {
        tracker.touch_down(target(dismissible), at(0.0, 0));
        // Crossing the paging slop re-anchors at x=20.
        assert_eq!(
            tracker.touch_move(at(20.0, 500)),
            DragFeedback::Dragging { translation: 0.0 }
        );
        tracker.touch_move(at(20.0 + x, 1000));
    }

    #[test]
    fn test_long_slow_swipe_dismisses() {
        // Half the extent with zero velocity is past the 0.4 threshold.
        let mut tracker = SwipeTracker::new();
        let (dismissals, cancels) = observe(&tracker);

        slow_drag_to(&mut tracker, true, EXTENT * 0.5);
        let resolution = tracker.touch_up(at(20.0 + EXTENT * 0.5, 1500)).unwrap();

        let Resolution::Dismissed(event) = resolution else {
            panic!("expected dismissal, got {resolution:?}");
        };
        assert_eq!(event.ids, vec![id(7)]);
        assert_eq!(event.animation.target, EXTENT);
        // No velocity: default escape pace.
        assert_eq!(event.animation.duration, DEFAULT_ESCAPE_DURATION);
        assert_eq!(event.animation.easing, Easing::Linear);

        assert_eq!(dismissals.lock().len(), 1);
        assert!(cancels.lock().is_empty());
    }

    #[test]
    fn test_short_slow_swipe_snaps_back() {
        let mut tracker = SwipeTracker::new();
        let (dismissals, cancels) = observe(&tracker);

        slow_drag_to(&mut tracker, true, EXTENT * 0.3);
        let resolution = tracker.touch_up(at(20.0 + EXTENT * 0.3, 1500)).unwrap();

        let Resolution::SnappedBack(spec) = resolution else {
            panic!("expected snap-back, got {resolution:?}");
        };
        assert_eq!(spec.target, 0.0);
        assert_eq!(spec.duration, DEFAULT_SNAP_DURATION);
        assert!(dismissals.lock().is_empty());
        assert_eq!(*cancels.lock(), vec![id(7)]);
    }

    #[test]
    fn test_fast_short_fling_dismisses_with_capped_duration() {
        let mut tracker = SwipeTracker::new();

        tracker.touch_down(target(true), at(0.0, 0));
        tracker.touch_move(at(20.0, 10)); // drag starts, re-anchored at 20
        tracker.touch_move(at(60.0, 90)); // translation 40 = 0.1 × extent
        let resolution = tracker.touch_up(at(60.0, 100)).unwrap();

        // ~600 px/sec over the window: beyond escape velocity, aligned with
        // the travel direction, and past the 5% minimum travel.
        let Resolution::Dismissed(event) = resolution else {
            panic!("expected dismissal, got {resolution:?}");
        };
        assert_eq!(event.animation.target, EXTENT);
        // Remaining 360 px at 600 px/sec would be 600 ms; capped at 400.
        assert_eq!(event.animation.duration, DEFAULT_MAX_ESCAPE_DURATION);
    }

    #[test]
    fn test_fling_against_travel_direction_snaps_back() {
        let mut tracker = SwipeTracker::new();

        tracker.touch_down(target(true), at(0.0, 0));
        tracker.touch_move(at(20.0, 10));
        tracker.touch_move(at(120.0, 300)); // dragged right 100 px (< 0.4 × extent)
        tracker.touch_move(at(80.0, 350)); // finger reversing, still right of anchor
        let resolution = tracker.touch_up(at(40.0, 400)).unwrap();

        // Velocity is leftward while translation is rightward: no dismissal.
        assert!(matches!(resolution, Resolution::SnappedBack(_)));
    }

    #[test]
    fn test_locked_row_clamps_and_never_dismisses() {
        let mut tracker = SwipeTracker::new();
        let (dismissals, cancels) = observe(&tracker);

        tracker.touch_down(target(false), at(0.0, 0));
        tracker.touch_move(at(20.0, 10));
        // Attempt double the extent, fast.
        let feedback = tracker.touch_move(at(20.0 + EXTENT * 2.0, 60));
        let DragFeedback::Dragging { translation } = feedback else {
            panic!("expected drag, got {feedback:?}");
        };
        assert!(translation <= LOCKED_DRAG_FRACTION * EXTENT);
        assert_eq!(translation, LOCKED_DRAG_FRACTION * EXTENT);

        let resolution = tracker.touch_up(at(20.0 + EXTENT * 2.0, 70)).unwrap();
        assert!(matches!(resolution, Resolution::SnappedBack(_)));
        assert!(dismissals.lock().is_empty());
        assert_eq!(*cancels.lock(), vec![id(7)]);
    }

    #[test]
    fn test_locked_row_resistance_is_sine_shaped() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_down(target(false), at(0.0, 0));
        tracker.touch_move(at(20.0, 10));

        // Halfway across the extent the sine curve gives sin(π/4) ≈ 0.707 of
        // the clamp range, not half of it.
        let feedback = tracker.touch_move(at(20.0 + EXTENT * 0.5, 500));
        let DragFeedback::Dragging { translation } = feedback else {
            panic!("expected drag, got {feedback:?}");
        };
        let expected = LOCKED_DRAG_FRACTION * EXTENT * (std::f32::consts::PI / 4.0).sin();
        assert!((translation - expected).abs() < 1e-3, "got {translation}");
    }

    #[test]
    fn test_leftward_swipe_flies_off_left() {
        let mut tracker = SwipeTracker::new();
        slow_drag_to(&mut tracker, true, -EXTENT * 0.5);
        let resolution = tracker.touch_up(at(20.0 - EXTENT * 0.5, 1500)).unwrap();
        let Resolution::Dismissed(event) = resolution else {
            panic!("expected dismissal, got {resolution:?}");
        };
        assert_eq!(event.animation.target, -EXTENT);
    }

    #[test]
    fn test_vertical_movement_yields_to_scroll() {
        let mut tracker = SwipeTracker::new();
        let (_, cancels) = observe(&tracker);

        tracker.touch_down(target(true), at(0.0, 0));
        // Mostly vertical, primary travel below the lock distance.
        let feedback = tracker.touch_move(TouchSample::new(10.0, 160.0, Duration::from_millis(30)));
        assert_eq!(feedback, DragFeedback::YieldedToScroll);
        // Never became a drag, so no cancellation event.
        assert!(cancels.lock().is_empty());
        assert!(!tracker.is_dragging());

        // A later release is absorbed.
        assert_eq!(tracker.touch_up(at(10.0, 60)), None);
    }

    #[test]
    fn test_mid_drag_vertical_yield_cancels() {
        let mut tracker = SwipeTracker::new();
        let (_, cancels) = observe(&tracker);

        tracker.touch_down(target(true), at(0.0, 0));
        tracker.touch_move(at(30.0, 10)); // dragging, re-anchored at 30
        let feedback = tracker.touch_move(TouchSample::new(30.0, 160.0, Duration::from_millis(40)));
        assert_eq!(feedback, DragFeedback::YieldedToScroll);
        assert_eq!(*cancels.lock(), vec![id(7)]);
    }

    #[test]
    fn test_committed_drag_does_not_yield() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_down(target(true), at(0.0, 0));
        tracker.touch_move(at(20.0, 10));
        tracker.touch_move(at(120.0, 50)); // primary travel past the lock distance
        // Finger wanders vertically; gesture stays committed to the swipe.
        let feedback =
            tracker.touch_move(TouchSample::new(120.0, 200.0, Duration::from_millis(80)));
        assert!(matches!(feedback, DragFeedback::Dragging { .. }));
    }

    #[test]
    fn test_tap_resolves_to_nothing() {
        let mut tracker = SwipeTracker::new();
        let (dismissals, cancels) = observe(&tracker);

        tracker.touch_down(target(true), at(0.0, 0));
        tracker.touch_move(at(4.0, 20)); // within slop
        assert_eq!(tracker.touch_up(at(4.0, 40)), None);
        assert!(dismissals.lock().is_empty());
        assert!(cancels.lock().is_empty());
    }

    #[test]
    fn test_move_without_down_is_adopted_as_fresh_anchor() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.touch_move(at(50.0, 0)), DragFeedback::Pending);
        // No row attached: travel never turns into a drag.
        assert_eq!(tracker.touch_move(at(300.0, 40)), DragFeedback::Pending);
        assert_eq!(tracker.touch_up(at(300.0, 60)), None);
    }

    #[test]
    fn test_up_without_gesture_is_noop() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.touch_up(at(10.0, 0)), None);
        assert_eq!(tracker.cancel(), None);
    }

    #[test]
    fn test_cancel_mid_drag_snaps_back() {
        let mut tracker = SwipeTracker::new();
        let (_, cancels) = observe(&tracker);

        slow_drag_to(&mut tracker, true, EXTENT * 0.3);
        let resolution = tracker.cancel().unwrap();
        assert!(matches!(resolution, Resolution::SnappedBack(_)));
        assert_eq!(*cancels.lock(), vec![id(7)]);
        assert_eq!(tracker.translation(), 0.0);
    }

    #[test]
    fn test_new_touch_interrupting_drag_cancels_it() {
        let mut tracker = SwipeTracker::new();
        let (_, cancels) = observe(&tracker);

        slow_drag_to(&mut tracker, true, EXTENT * 0.3);
        tracker.touch_down(SwipeTarget::new(id(9), EXTENT, true), at(0.0, 2000));
        assert_eq!(*cancels.lock(), vec![id(7)]);
    }

    #[test]
    fn test_multi_row_dismissal_carries_associated_ids() {
        let mut tracker = SwipeTracker::new();
        let (dismissals, _) = observe(&tracker);

        tracker.set_associated(vec![id(7), id(8), id(9)]);
        slow_drag_to(&mut tracker, true, EXTENT * 0.5);
        let resolution = tracker.touch_up(at(20.0 + EXTENT * 0.5, 1500)).unwrap();

        let Resolution::Dismissed(event) = resolution else {
            panic!("expected dismissal, got {resolution:?}");
        };
        assert_eq!(event.ids, vec![id(7), id(8), id(9)]);
        assert_eq!(dismissals.lock()[0].ids.len(), 3);
    }

    #[test]
    fn test_vertical_axis() {
        let config = SwipeConfig {
            axis: Axis::Vertical,
            ..SwipeConfig::default()
        };
        let mut tracker = SwipeTracker::with_config(config).unwrap();

        let sample = |y: f32, t: u64| TouchSample::new(100.0, y, Duration::from_millis(t));
        tracker.touch_down(target(true), sample(0.0, 0));
        tracker.touch_move(sample(20.0, 500));
        tracker.touch_move(sample(20.0 + EXTENT * 0.5, 1000));
        let resolution = tracker.touch_up(sample(20.0 + EXTENT * 0.5, 1500)).unwrap();
        assert!(matches!(resolution, Resolution::Dismissed(_)));
    }

    #[test]
    fn test_config_validation() {
        assert!(SwipeConfig::default().validate().is_ok());

        let bad = SwipeConfig {
            escape_velocity: 0.0,
            ..SwipeConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(Error::NonPositiveThreshold { name: "escape_velocity", .. })
        ));

        let bad = SwipeConfig {
            dismiss_fraction: 1.5,
            ..SwipeConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(Error::FractionOutOfRange { name: "dismiss_fraction", .. })
        ));

        let bad = SwipeConfig {
            snap_duration: Duration::ZERO,
            ..SwipeConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(Error::ZeroDuration { name: "snap_duration" })
        ));

        assert!(SwipeTracker::with_config(bad).is_err());
    }
}
