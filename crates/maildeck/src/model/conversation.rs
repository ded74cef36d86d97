//! Conversation identity and row capabilities.
//!
//! The backing list is owned by the host; this crate only ever refers to its
//! rows by id. [`ConversationId`] is deliberately opaque (it carries no
//! ordering or meaning beyond identity), and [`RowFlags`] is the small
//! capability set a row advertises to the interaction core.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a conversation row.
///
/// Ids are assigned by the host's data layer and treated as opaque here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ConversationId(pub u64);

impl ConversationId {
    /// Creates an id from its raw value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ConversationId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Capabilities a row advertises to the interaction core.
///
/// A row that is not `dismissible` can still be dragged for visual affordance,
/// but never resolves to a dismissal. A row that is not `selectable` is
/// skipped by selection-driven bulk operations on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowFlags {
    /// Row can participate in the selection set.
    pub selectable: bool,
    /// Row can be removed by a swipe gesture.
    pub dismissible: bool,
}

impl RowFlags {
    /// Creates flags for an ordinary conversation row (selectable and
    /// dismissible).
    pub fn new() -> Self {
        Self {
            selectable: true,
            dismissible: true,
        }
    }

    /// Creates flags for a row that can be selected but never swiped away
    /// (e.g. a row whose folder forbids archiving).
    pub fn undismissible() -> Self {
        Self {
            selectable: true,
            dismissible: false,
        }
    }

    /// Sets the selectable flag.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets the dismissible flag.
    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }
}
