//! Shared plumbing for the Maildeck conversation-list core.
//!
//! The domain crate's components (selection set, position tracker, swipe
//! tracker) all report state changes the same way; this crate holds that
//! common machinery so they don't each grow their own observer list:
//!
//! - [`Signal`]: multicast change notification with snapshot-at-dispatch
//!   semantics, so observers can unregister from inside their own callbacks
//! - [`logging`]: `tracing` targets for per-subsystem filtering, plus the
//!   [`PerfSpan`] duration guard
//!
//! ```
//! use maildeck_core::Signal;
//!
//! // A selection reporting that it emptied.
//! let became_empty = Signal::<()>::new();
//!
//! let conn = became_empty.connect(|_| {
//!     println!("leaving batch mode");
//! });
//!
//! became_empty.emit(());
//! became_empty.disconnect(conn);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
