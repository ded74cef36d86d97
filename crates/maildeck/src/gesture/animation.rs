//! Animation parameters for dismiss and snap-back.
//!
//! The core never drives frames; it hands the host an [`AnimationSpec`]
//! (where to go, how long to take, which curve) and the host's animation
//! system does the rest. The easing functions here are also what the swipe
//! tracker uses to shape drag resistance on rows that cannot be dismissed.

use std::f32::consts::PI;
use std::time::Duration;

/// Easing curves used by the gesture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant rate; used for dismiss fly-off so velocity is preserved.
    #[default]
    Linear,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Sinusoidal ease-out; also the resistance curve for locked rows.
    EaseOutSine,
    /// Sinusoidal ease-in-out; used for snap-back.
    EaseInOutSine,
}

/// Applies an easing curve to a progress value in `[0, 1]`.
///
/// Input outside the range is clamped.
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseOutSine => ((t * PI) / 2.0).sin(),
        Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
    }
}

/// Interpolates between `start` and `end` with an easing curve.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}

/// Everything the host needs to run one translation animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Final primary-axis translation (`0.0` for snap-back, `±extent` for a
    /// dismiss fly-off).
    pub target: f32,
    /// How long the animation should run.
    pub duration: Duration,
    /// Which curve to run it on.
    pub easing: Easing,
}

impl AnimationSpec {
    /// The translation at progress `t ∈ [0, 1]`, starting from `from`.
    pub fn sample(&self, from: f32, t: f32) -> f32 {
        lerp_eased(self.easing, from, self.target, t)
    }
}

/// Fraction of the extent over which a swiped row fades to transparent.
const FADE_END_FRACTION: f32 = 0.5;

/// The opacity a dismissible row should render at while translated.
///
/// Fades linearly from fully opaque at rest to `min_alpha` at half the
/// extent, matching the fly-off visual: by the time a row has travelled far
/// enough to dismiss, it is nearly gone.
pub fn swipe_fade_alpha(translation: f32, extent: f32, min_alpha: f32) -> f32 {
    if extent <= 0.0 {
        return 1.0;
    }
    let progress = translation.abs() / (extent * FADE_END_FRACTION);
    (1.0 - progress).clamp(min_alpha, 1.0)
}
