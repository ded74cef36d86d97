//! Convenience re-exports for host applications.
//!
//! ```
//! use maildeck::prelude::*;
//!
//! let selection: SelectionSet<u64> = SelectionSet::new();
//! selection.insert(ConversationId::new(1), 42);
//! ```

pub use crate::error::{Error, Result};
pub use crate::gesture::{
    AnimationSpec, Axis, DismissEvent, DragFeedback, Easing, Resolution, SwipeConfig, SwipeTarget,
    SwipeTracker, TouchSample, VelocityTracker,
};
pub use crate::model::{
    AutoAdvance, ConversationId, ConversationListState, Direction, ListSnapshot, LoadTicket, Mode,
    PositionEvent, PositionTracker, Row, RowFlags, SavedSelection, SelectionSet, SnapshotLoader,
    TrackerState, ViewMode,
};
pub use maildeck_core::{ConnectionGuard, ConnectionId, Signal};
