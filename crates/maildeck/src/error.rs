//! Error types for Maildeck.
//!
//! The runtime surface of this crate deliberately does not error: stale ids
//! degrade to `None` or no-ops and out-of-order touch events are absorbed, so
//! the host UI is never interrupted by transient data inconsistency. The only
//! fallible operations are configuration constructors, which reject values a
//! host could only pass by mistake.

/// The error type for Maildeck operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A gesture threshold that must be strictly positive was not.
    #[error("swipe config: `{name}` must be positive, got {value}")]
    NonPositiveThreshold { name: &'static str, value: f32 },

    /// A gesture fraction outside the meaningful `(0, 1]` range.
    #[error("swipe config: `{name}` must be in (0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f32 },

    /// A duration that must be non-zero was zero.
    #[error("swipe config: `{name}` must be a non-zero duration")]
    ZeroDuration { name: &'static str },
}

/// A specialized Result type for Maildeck operations.
pub type Result<T> = std::result::Result<T, Error>;
