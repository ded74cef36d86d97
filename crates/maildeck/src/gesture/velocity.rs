//! Touch velocity estimation over a bounded trailing window.
//!
//! The dismiss decision needs the finger's speed at release, not its average
//! speed over the whole drag: a slow deliberate drag that ends with a flick
//! should still dismiss. [`VelocityTracker`] therefore keeps only the samples
//! inside a short trailing time window and differentiates across it.

use std::collections::VecDeque;
use std::time::Duration;

/// Default trailing window over which velocity is measured.
pub const DEFAULT_VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Hard cap on retained samples, independent of the time window.
const MAX_SAMPLES: usize = 20;

#[derive(Debug, Clone, Copy)]
struct Sample {
    x: f32,
    y: f32,
    timestamp: Duration,
}

/// Estimates instantaneous velocity from a stream of timestamped positions.
///
/// Timestamps are supplied by the host (they come with the platform's touch
/// events) and are expected to be monotonic within one gesture; a sample that
/// jumps backward in time resets the tracker.
#[derive(Debug)]
pub struct VelocityTracker {
    window: Duration,
    samples: VecDeque<Sample>,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    /// Creates a tracker with the default trailing window.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_VELOCITY_WINDOW)
    }

    /// Creates a tracker with a custom trailing window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            samples: VecDeque::with_capacity(MAX_SAMPLES),
        }
    }

    /// Records a touch sample.
    pub fn add(&mut self, x: f32, y: f32, timestamp: Duration) {
        if let Some(last) = self.samples.back()
            && timestamp < last.timestamp
        {
            self.samples.clear();
        }
        self.samples.push_back(Sample { x, y, timestamp });
        self.prune(timestamp);
    }

    /// Forgets all samples (gesture ended).
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// The current velocity estimate in units per second, as `(vx, vy)`.
    ///
    /// Returns zero until at least two samples span a non-zero interval.
    pub fn velocity(&self) -> (f32, f32) {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return (0.0, 0.0);
        };
        let dt = last.timestamp.saturating_sub(first.timestamp).as_secs_f32();
        if dt <= 0.0 {
            return (0.0, 0.0);
        }
        ((last.x - first.x) / dt, (last.y - first.y) / dt)
    }

    fn prune(&mut self, now: Duration) {
        let horizon = now.saturating_sub(self.window);
        while let Some(front) = self.samples.front() {
            if front.timestamp >= horizon && self.samples.len() <= MAX_SAMPLES {
                break;
            }
            self.samples.pop_front();
        }
    }
}

/// Clamps each component of a velocity to `max` magnitude.
pub(crate) fn clamp_velocity((vx, vy): (f32, f32), max: f32) -> (f32, f32) {
    (vx.clamp(-max, max), vy.clamp(-max, max))
}
