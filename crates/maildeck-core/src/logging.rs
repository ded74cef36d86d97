//! Logging for Maildeck.
//!
//! Instrumentation goes through the `tracing` crate; nothing is printed
//! unless the host installs a subscriber (`tracing_subscriber::fmt::init()`
//! or equivalent). Every event carries an explicit target from [`targets`],
//! so a host debugging one subsystem can filter to it, e.g.
//! `RUST_LOG=maildeck::position=trace`.

/// Per-subsystem target names, for `tracing` filter directives.
pub mod targets {
    /// Signal/slot dispatch target.
    pub const SIGNAL: &str = "maildeck::signal";
    /// Selection set target.
    pub const SELECTION: &str = "maildeck::selection";
    /// Position tracker target.
    pub const POSITION: &str = "maildeck::position";
    /// Swipe/dismiss gesture target.
    pub const GESTURE: &str = "maildeck::gesture";
    /// Snapshot loader target.
    pub const LOADER: &str = "maildeck::loader";
    /// View mode target.
    pub const MODE: &str = "maildeck::mode";
    /// Per-window list-state scope target.
    pub const STATE: &str = "maildeck::state";
}

/// A guard that records the duration of an operation as a tracing span.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span, active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "maildeck::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
