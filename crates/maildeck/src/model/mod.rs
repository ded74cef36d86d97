//! List-state bookkeeping for the conversation list.
//!
//! The host owns the authoritative conversation list; this module owns only
//! bookkeeping *about* it, keyed by conversation id:
//!
//! - [`SelectionSet`]: which rows are selected, with transition notifications
//! - [`PositionTracker`]: where the current conversation sits, re-derived on
//!   every reload
//! - [`SnapshotLoader`]: the latest-result slot reloads flow through
//! - [`ViewMode`]: which top-level view the window is showing
//! - [`ConversationListState`]: one scope bundling the above per window
//!
//! # Data Flow
//!
//! ```text
//! ┌────────────┐ ListSnapshot ┌────────────────┐   signals   ┌──────────┐
//! │ host data  │─────────────>│ SnapshotLoader │────────────>│ host UI  │
//! │   layer    │              │ SelectionSet   │             │ (render, │
//! └────────────┘              │ PositionTracker│             │  chrome) │
//!                             └────────────────┘             └──────────┘
//! ```
//!
//! Everything references rows by [`ConversationId`] only. No component holds
//! a pointer into another, so each can be torn down independently.

mod conversation;
mod loader;
mod position;
mod selection;
mod snapshot;
mod state;
mod view_mode;

pub use conversation::{ConversationId, RowFlags};
pub use loader::{LoadTicket, SnapshotLoader};
pub use position::{AutoAdvance, Direction, PositionEvent, PositionTracker, TrackerState};
pub use selection::{SavedSelection, SelectionSet};
pub use snapshot::{ListSnapshot, Row};
pub use state::ConversationListState;
pub use view_mode::{Mode, ViewMode};
