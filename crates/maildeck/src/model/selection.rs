//! Selection set for the conversation list.
//!
//! [`SelectionSet`] is a thread-safe map from conversation id to the host's
//! item snapshot, representing the rows currently selected (e.g. for a batch
//! archive). It dispatches a generic `changed` signal on every membership
//! mutation, and additionally `became_populated` on the 0→N transition and
//! `became_empty` on the N→0 transition. Those two transitions are exactly
//! the events the host's action-bar chrome keys off.
//!
//! # Example
//!
//! ```
//! use maildeck::model::{ConversationId, SelectionSet};
//!
//! let selection: SelectionSet<String> = SelectionSet::new();
//!
//! selection.became_populated.connect(|ids| {
//!     println!("entering batch mode with {} rows", ids.len());
//! });
//! selection.became_empty.connect(|_| {
//!     println!("leaving batch mode");
//! });
//!
//! selection.toggle(ConversationId::new(7), "subject".to_string());
//! assert_eq!(selection.len(), 1);
//! ```
//!
//! # Threading
//!
//! This is the one component of the core that may be touched from outside the
//! UI event stream (a background load callback validating the selection), so
//! the map is guarded by a mutex. The lock is never held across signal
//! dispatch: observers may re-enter the set, and may connect or disconnect
//! observers, from inside their callbacks.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use maildeck_core::logging::targets;
use maildeck_core::Signal;

use crate::model::conversation::ConversationId;
use crate::model::snapshot::ListSnapshot;

/// Which extra transition a mutation produced, decided under the lock and
/// dispatched after it is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    None,
    BecamePopulated,
    BecameEmpty,
}

/// The serializable form of a selection: its id list.
///
/// Item snapshots are owned by the backing list and are not persisted;
/// [`SelectionSet::restore`] re-resolves each id against the host's data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedSelection {
    /// The selected ids, in unspecified order.
    pub ids: Vec<ConversationId>,
}

/// A thread-safe set of selected conversations with transition notifications.
///
/// `T` is the host's per-item snapshot type (whatever it wants back when a
/// batch action fires). The set holds ids and snapshots only, never a
/// reference into the backing list, so it can outlive any particular load.
///
/// # Signals
///
/// - `changed`: any membership mutation; payload is the id list after it
/// - `became_populated`: the mutation took the set from empty to non-empty
/// - `became_empty`: the mutation took the set from non-empty to empty
pub struct SelectionSet<T> {
    inner: Mutex<HashMap<ConversationId, T>>,

    /// Emitted on every membership change. Payload: ids after the mutation.
    pub changed: Signal<Vec<ConversationId>>,

    /// Emitted when the set transitions from empty to non-empty.
    pub became_populated: Signal<Vec<ConversationId>>,

    /// Emitted when the set transitions from non-empty to empty.
    pub became_empty: Signal<()>,
}

impl<T> Default for SelectionSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SelectionSet<T> {
    /// Creates an empty selection set.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            changed: Signal::new(),
            became_populated: Signal::new(),
            became_empty: Signal::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns `true` if `id` is selected.
    pub fn contains(&self, id: ConversationId) -> bool {
        self.inner.lock().contains_key(&id)
    }

    /// Returns the number of selected conversations.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the selected ids, in unspecified order.
    pub fn ids(&self) -> Vec<ConversationId> {
        self.inner.lock().keys().copied().collect()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `id` to the selection. Returns `true` if the id was newly
    /// selected; re-inserting an already-selected id replaces its snapshot.
    pub fn insert(&self, id: ConversationId, item: T) -> bool {
        let (newly_selected, transition, ids) = {
            let mut map = self.inner.lock();
            let was_empty = map.is_empty();
            let newly_selected = map.insert(id, item).is_none();
            let transition = if was_empty {
                Transition::BecamePopulated
            } else {
                Transition::None
            };
            (newly_selected, transition, keys_of(&map))
        };
        tracing::trace!(target: targets::SELECTION, %id, count = ids.len(), "insert");
        self.dispatch(ids, transition);
        newly_selected
    }

    /// Removes `id` from the selection, returning its snapshot. Removing an
    /// id that is not selected is a no-op and dispatches nothing.
    pub fn remove(&self, id: ConversationId) -> Option<T> {
        let (removed, transition, ids) = {
            let mut map = self.inner.lock();
            let removed = map.remove(&id);
            if removed.is_none() {
                return None;
            }
            let transition = if map.is_empty() {
                Transition::BecameEmpty
            } else {
                Transition::None
            };
            (removed, transition, keys_of(&map))
        };
        tracing::trace!(target: targets::SELECTION, %id, count = ids.len(), "remove");
        self.dispatch(ids, transition);
        removed
    }

    /// Toggles membership of `id`: removes it if selected, selects it with
    /// `item` otherwise.
    pub fn toggle(&self, id: ConversationId, item: T) {
        // Decide and mutate under one lock acquisition so concurrent toggles
        // of the same id cannot interleave between the check and the write.
        let (transition, ids) = {
            let mut map = self.inner.lock();
            let was_empty = map.is_empty();
            if map.remove(&id).is_none() {
                map.insert(id, item);
            }
            let transition = if was_empty && !map.is_empty() {
                Transition::BecamePopulated
            } else if !was_empty && map.is_empty() {
                Transition::BecameEmpty
            } else {
                Transition::None
            };
            (transition, keys_of(&map))
        };
        tracing::trace!(target: targets::SELECTION, %id, count = ids.len(), "toggle");
        self.dispatch(ids, transition);
    }

    /// Removes every entry. A non-empty set dispatches exactly one `changed`
    /// and one `became_empty`; clearing an empty set dispatches nothing.
    pub fn clear(&self) {
        {
            let mut map = self.inner.lock();
            if map.is_empty() {
                return;
            }
            map.clear();
        }
        tracing::debug!(target: targets::SELECTION, "cleared");
        self.dispatch(Vec::new(), Transition::BecameEmpty);
    }

    /// Inserts all `pairs`, dispatching `changed` once (and
    /// `became_populated` at most once) for the whole batch.
    pub fn insert_all(&self, pairs: impl IntoIterator<Item = (ConversationId, T)>) {
        let (inserted, transition, ids) = {
            let mut map = self.inner.lock();
            let was_empty = map.is_empty();
            let mut inserted = 0usize;
            for (id, item) in pairs {
                map.insert(id, item);
                inserted += 1;
            }
            if inserted == 0 {
                return;
            }
            let transition = if was_empty {
                Transition::BecamePopulated
            } else {
                Transition::None
            };
            (inserted, transition, keys_of(&map))
        };
        tracing::debug!(target: targets::SELECTION, inserted, count = ids.len(), "insert_all");
        self.dispatch(ids, transition);
    }

    /// Removes all `ids`, dispatching `changed` once (and `became_empty` at
    /// most once) for the whole batch. Ids that are not selected are skipped.
    pub fn remove_all(&self, ids: impl IntoIterator<Item = ConversationId>) {
        let (removed, transition, ids_after) = {
            let mut map = self.inner.lock();
            let was_empty = map.is_empty();
            let mut removed = 0usize;
            for id in ids {
                if map.remove(&id).is_some() {
                    removed += 1;
                }
            }
            if removed == 0 {
                return;
            }
            let transition = if !was_empty && map.is_empty() {
                Transition::BecameEmpty
            } else {
                Transition::None
            };
            (removed, transition, keys_of(&map))
        };
        tracing::debug!(target: targets::SELECTION, removed, count = ids_after.len(), "remove_all");
        self.dispatch(ids_after, transition);
    }

    /// Drops every selected id that is no longer present in `snapshot`.
    ///
    /// Called after each reload so the selection never refers to rows the
    /// backing list has lost (sync, delete, filter). Survivors keep their
    /// snapshots; the removals dispatch as one batch.
    pub fn validate_against(&self, snapshot: &ListSnapshot) {
        if self.is_empty() {
            return;
        }
        let stale: Vec<ConversationId> = self
            .ids()
            .into_iter()
            .filter(|&id| !snapshot.contains(id))
            .collect();
        if stale.is_empty() {
            return;
        }
        tracing::debug!(
            target: targets::SELECTION,
            stale = stale.len(),
            "dropping selected ids missing from snapshot"
        );
        self.remove_all(stale);
    }

    // =========================================================================
    // Save / restore
    // =========================================================================

    /// Captures the selection as a serializable id list.
    pub fn saved_state(&self) -> SavedSelection {
        SavedSelection { ids: self.ids() }
    }

    /// Rebuilds the selection from a saved id list, re-resolving each id
    /// against the host's data. Ids that no longer resolve are dropped
    /// silently. Dispatches as a single batch insert.
    pub fn restore(&self, saved: &SavedSelection, resolve: impl Fn(ConversationId) -> Option<T>) {
        self.insert_all(
            saved
                .ids
                .iter()
                .filter_map(|&id| resolve(id).map(|item| (id, item))),
        );
    }

    fn dispatch(&self, ids: Vec<ConversationId>, transition: Transition) {
        // The map lock is released by now; observers may query or mutate the
        // set, and may unregister themselves, from inside these callbacks.
        match transition {
            Transition::None => self.changed.emit(ids),
            Transition::BecamePopulated => {
                self.changed.emit(ids.clone());
                self.became_populated.emit(ids);
            }
            Transition::BecameEmpty => {
                self.changed.emit(ids);
                self.became_empty.emit(());
            }
        }
    }
}

impl<T: Clone> SelectionSet<T> {
    /// Returns the selected item snapshots, in unspecified order.
    pub fn items(&self) -> Vec<T> {
        self.inner.lock().values().cloned().collect()
    }

    /// Returns the snapshot stored for `id`, if selected.
    pub fn get(&self, id: ConversationId) -> Option<T> {
        self.inner.lock().get(&id).cloned()
    }
}

fn keys_of<T>(map: &HashMap<ConversationId, T>) -> Vec<ConversationId> {
    map.keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn id(raw: u64) -> ConversationId {
        ConversationId::new(raw)
    }

    /// Counts each event kind over an observed set's lifetime.
    struct EventCounts {
        changed: Arc<AtomicUsize>,
        populated: Arc<AtomicUsize>,
        emptied: Arc<AtomicUsize>,
    }

    fn observe(set: &SelectionSet<&'static str>) -> EventCounts {
        let counts = EventCounts {
            changed: Arc::new(AtomicUsize::new(0)),
            populated: Arc::new(AtomicUsize::new(0)),
            emptied: Arc::new(AtomicUsize::new(0)),
        };
        let c = counts.changed.clone();
        set.changed.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = counts.populated.clone();
        set.became_populated.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = counts.emptied.clone();
        set.became_empty.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        counts
    }

    #[test]
    fn test_insert_remove_queries() {
        let set: SelectionSet<&str> = SelectionSet::new();
        assert!(set.is_empty());

        assert!(set.insert(id(1), "one"));
        assert!(!set.insert(id(1), "one again"));
        set.insert(id(2), "two");

        assert_eq!(set.len(), 2);
        assert!(set.contains(id(1)));
        assert_eq!(set.get(id(1)), Some("one again"));

        assert_eq!(set.remove(id(1)), Some("one again"));
        assert_eq!(set.remove(id(1)), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_transition_event_counts_match_transitions() {
        // Property: populated events == 0→1 transitions, emptied events ==
        // 1→0 transitions, never more, never fewer.
        let set: SelectionSet<&str> = SelectionSet::new();
        let counts = observe(&set);

        set.insert(id(1), "a"); // 0 -> 1
        set.insert(id(2), "b");
        set.remove(id(1));
        set.remove(id(2)); // 1 -> 0
        set.toggle(id(3), "c"); // 0 -> 1
        set.toggle(id(3), "c"); // 1 -> 0
        set.remove(id(99)); // no-op, no events

        assert_eq!(counts.populated.load(Ordering::SeqCst), 2);
        assert_eq!(counts.emptied.load(Ordering::SeqCst), 2);
        assert_eq!(counts.changed.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_clear_dispatches_once() {
        let set: SelectionSet<&str> = SelectionSet::new();
        for i in 0..5 {
            set.insert(id(i), "item");
        }

        let counts = observe(&set);
        set.clear();

        assert_eq!(counts.changed.load(Ordering::SeqCst), 1);
        assert_eq!(counts.emptied.load(Ordering::SeqCst), 1);
        assert!(set.is_empty());

        // Clearing again is silent.
        set.clear();
        assert_eq!(counts.changed.load(Ordering::SeqCst), 1);
        assert_eq!(counts.emptied.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_bulk_ops_dispatch_once() {
        let set: SelectionSet<&str> = SelectionSet::new();
        let counts = observe(&set);

        set.insert_all((0..4).map(|i| (id(i), "item")));
        assert_eq!(set.len(), 4);
        assert_eq!(counts.changed.load(Ordering::SeqCst), 1);
        assert_eq!(counts.populated.load(Ordering::SeqCst), 1);

        set.remove_all((0..4).map(id));
        assert!(set.is_empty());
        assert_eq!(counts.changed.load(Ordering::SeqCst), 2);
        assert_eq!(counts.emptied.load(Ordering::SeqCst), 1);

        // Empty batches are silent.
        set.insert_all(std::iter::empty());
        set.remove_all(std::iter::empty());
        assert_eq!(counts.changed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_validate_against_snapshot() {
        let set: SelectionSet<&str> = SelectionSet::new();
        set.insert(id(1), "a");
        set.insert(id(2), "b");
        set.insert(id(3), "c");

        let counts = observe(&set);
        let snapshot = ListSnapshot::from_ids([2, 4, 5]);
        set.validate_against(&snapshot);

        assert_eq!(set.ids(), vec![id(2)]);
        // One batched removal, no emptied event.
        assert_eq!(counts.changed.load(Ordering::SeqCst), 1);
        assert_eq!(counts.emptied.load(Ordering::SeqCst), 0);

        // Nothing stale: silent.
        set.validate_against(&snapshot);
        assert_eq!(counts.changed.load(Ordering::SeqCst), 1);

        // Everything gone: one changed + one emptied.
        set.validate_against(&ListSnapshot::empty());
        assert!(set.is_empty());
        assert_eq!(counts.changed.load(Ordering::SeqCst), 2);
        assert_eq!(counts.emptied.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_saved_state_round_trip() {
        let set: SelectionSet<String> = SelectionSet::new();
        set.insert(id(3), "three".to_string());
        set.insert(id(1), "one".to_string());
        set.insert(id(7), "seven".to_string());

        let saved = set.saved_state();
        let json = serde_json::to_string(&saved).unwrap();
        let decoded: SavedSelection = serde_json::from_str(&json).unwrap();

        let restored: SelectionSet<String> = SelectionSet::new();
        restored.restore(&decoded, |id| Some(format!("resolved-{}", id.raw())));

        let mut before = set.ids();
        let mut after = restored.ids();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_restore_drops_unresolvable_ids() {
        let saved = SavedSelection {
            ids: vec![id(1), id(2), id(3)],
        };
        let set: SelectionSet<&str> = SelectionSet::new();
        set.restore(&saved, |id| (id.raw() != 2).then_some("item"));

        let mut ids = set.ids();
        ids.sort_unstable();
        assert_eq!(ids, vec![id(1), id(3)]);
    }

    #[test]
    fn test_observer_may_unregister_itself_during_dispatch() {
        let set: Arc<SelectionSet<&str>> = Arc::new(SelectionSet::new());
        let fired = Arc::new(AtomicUsize::new(0));
        let own_id = Arc::new(parking_lot::Mutex::new(None));

        let set_clone = set.clone();
        let fired_clone = fired.clone();
        let own_id_clone = own_id.clone();
        let conn = set.changed.connect(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
            if let Some(conn) = *own_id_clone.lock() {
                set_clone.changed.disconnect(conn);
            }
        });
        *own_id.lock() = Some(conn);

        set.insert(id(1), "a");
        set.insert(id(2), "b");
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_observer_may_query_set_during_dispatch() {
        let set: Arc<SelectionSet<&str>> = Arc::new(SelectionSet::new());
        let seen_len = Arc::new(AtomicUsize::new(0));

        let set_clone = set.clone();
        let seen = seen_len.clone();
        set.changed.connect(move |_| {
            // Re-entrant query must not deadlock.
            seen.store(set_clone.len(), Ordering::SeqCst);
        });

        set.insert(id(1), "a");
        assert_eq!(seen_len.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_mutation() {
        let set: Arc<SelectionSet<u64>> = Arc::new(SelectionSet::new());

        let mut handles = vec![];
        for t in 0..8u64 {
            let set_clone = set.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    set_clone.insert(id(t * 1000 + i), i);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(set.len(), 8 * 50);
    }
}
