//! Swipe-to-dismiss gesture recognition and resolution.
//!
//! The host feeds raw, timestamped touch samples for the row under the
//! finger; this module decides what they mean:
//!
//! - [`VelocityTracker`]: release-speed estimation over a trailing window
//! - [`SwipeTracker`]: drag bookkeeping and the Dismiss/Snap-back decision
//! - [`AnimationSpec`] and the easing functions: the parameters the host's
//!   animation system runs with
//!
//! No views, no frames, no clocks: timestamps come in with the samples and
//! animations are described, not driven.

mod animation;
mod swipe;
mod velocity;

pub use animation::{ease, lerp_eased, swipe_fade_alpha, AnimationSpec, Easing};
pub use swipe::{
    Axis, DismissEvent, DragFeedback, Resolution, SwipeConfig, SwipeTarget, SwipeTracker,
    TouchSample, DEFAULT_ESCAPE_DURATION, DEFAULT_ESCAPE_VELOCITY, DEFAULT_LOCK_DISTANCE,
    DEFAULT_MAX_DISMISS_VELOCITY, DEFAULT_MAX_ESCAPE_DURATION, DEFAULT_PAGING_SLOP,
    DEFAULT_SCROLL_SLOP, DEFAULT_SNAP_DURATION, DISMISS_DISTANCE_FRACTION,
    FAST_SWIPE_MIN_TRAVEL_FRACTION, LOCKED_DRAG_FRACTION,
};
pub use velocity::{VelocityTracker, DEFAULT_VELOCITY_WINDOW};
