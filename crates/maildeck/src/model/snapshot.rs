//! Immutable snapshots of the host-owned backing list.
//!
//! A [`ListSnapshot`] is the value the host hands across the boundary on every
//! reload: the ordered sequence of row ids and their capabilities at one
//! instant. The snapshot owns no conversation data; ids are resolved back
//! against the host's data layer when needed.
//!
//! Lookup by id is a linear scan. The backing list is externally mutated
//! (sync, delete, filter) with no diff information, so identity search is the
//! only correctness-preserving approach; scans happen only on explicit reload
//! events, never per frame.

use std::sync::Arc;

use crate::model::conversation::{ConversationId, RowFlags};

/// One row of a snapshot: an id plus its capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    /// The row's identity in the host's data layer.
    pub id: ConversationId,
    /// What the interaction core may do with this row.
    pub flags: RowFlags,
}

impl Row {
    /// Creates a row with the given id and default conversation capabilities.
    pub fn new(id: impl Into<ConversationId>) -> Self {
        Self {
            id: id.into(),
            flags: RowFlags::new(),
        }
    }

    /// Creates a row with explicit capabilities.
    pub fn with_flags(id: impl Into<ConversationId>, flags: RowFlags) -> Self {
        Self {
            id: id.into(),
            flags,
        }
    }
}

/// An immutable, cheaply clonable view of the backing list at one instant.
///
/// Ordinal position is implicit in row order: row `k` is at position `k`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSnapshot {
    rows: Arc<[Row]>,
}

impl ListSnapshot {
    /// Creates an empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a snapshot from rows in display order.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Creates a snapshot of ordinary conversation rows from bare ids.
    pub fn from_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self::from_rows(ids.into_iter().map(Row::new))
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the snapshot has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `position`, or `None` if out of bounds.
    pub fn get(&self, position: usize) -> Option<Row> {
        self.rows.get(position).copied()
    }

    /// Returns the position of `id`, scanning from the top of the list.
    pub fn position_of(&self, id: ConversationId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Returns `true` if `id` is present in the snapshot.
    pub fn contains(&self, id: ConversationId) -> bool {
        self.position_of(id).is_some()
    }

    /// Returns the capabilities recorded for `id`, if present.
    pub fn flags_of(&self, id: ConversationId) -> Option<RowFlags> {
        self.position_of(id).map(|pos| self.rows[pos].flags)
    }

    /// Iterates over row ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = ConversationId> + '_ {
        self.rows.iter().map(|row| row.id)
    }

    /// The rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl FromIterator<Row> for ListSnapshot {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::from_rows(iter)
    }
}
