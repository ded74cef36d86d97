//! The per-window list-state scope.
//!
//! [`ConversationListState`] bundles the selection set, position tracker,
//! snapshot loader, and view mode for one conversation-list view, and routes
//! the events that must flow between them. It is created with the hosting
//! window and torn down with it (an explicitly passed scope object, not a
//! process-wide singleton), and its pieces reference each other only through
//! conversation ids, so any of them can be replaced or discarded
//! independently.

use maildeck_core::logging::targets;

use crate::model::loader::{LoadTicket, SnapshotLoader};
use crate::model::position::PositionTracker;
use crate::model::selection::SelectionSet;
use crate::model::snapshot::ListSnapshot;
use crate::model::view_mode::{Mode, ViewMode};

/// Everything the conversation list tracks about the host-owned backing
/// list, scoped to one window.
///
/// `T` is the host's per-item snapshot type stored in the selection.
pub struct ConversationListState<T> {
    selection: SelectionSet<T>,
    tracker: PositionTracker,
    loader: SnapshotLoader,
    view_mode: ViewMode,
}

impl<T> Default for ConversationListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConversationListState<T> {
    /// Creates an empty scope. The host connects the observers it needs and
    /// then starts the first load.
    pub fn new() -> Self {
        Self {
            selection: SelectionSet::new(),
            tracker: PositionTracker::new(),
            loader: SnapshotLoader::new(),
            view_mode: ViewMode::new(),
        }
    }

    /// The selection set.
    pub fn selection(&self) -> &SelectionSet<T> {
        &self.selection
    }

    /// The position tracker.
    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    /// Mutable access to the position tracker (initialize/clear are driven by
    /// the host's navigation).
    pub fn tracker_mut(&mut self) -> &mut PositionTracker {
        &mut self.tracker
    }

    /// The snapshot loader.
    pub fn loader(&self) -> &SnapshotLoader {
        &self.loader
    }

    /// The view-mode machine.
    pub fn view_mode(&self) -> &ViewMode {
        &self.view_mode
    }

    /// Registers a new list load, superseding any outstanding one.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    /// Routes a delivered snapshot through the scope: the selection drops
    /// rows the list has lost, then the tracker re-derives its position.
    ///
    /// Returns `false` (and touches nothing) when `ticket` was superseded.
    pub fn apply_snapshot(&mut self, ticket: LoadTicket, snapshot: ListSnapshot) -> bool {
        if !self.loader.deliver(ticket, snapshot.clone()) {
            return false;
        }
        self.selection.validate_against(&snapshot);
        self.tracker.reconcile(&snapshot);
        true
    }

    /// Transitions the view mode, clearing the selection when the user
    /// leaves the conversation list (batch mode does not survive navigating
    /// away). Returns whether the mode changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        let leaving_list = self.view_mode.is_conversation_list_mode();
        let changed = self.view_mode.restore(mode);
        if changed && leaving_list {
            self.selection.clear();
        }
        changed
    }

    /// Drops all bookkeeping and disconnects every observer. Called when the
    /// hosting window goes away; the scope is inert afterwards but safe to
    /// keep calling.
    pub fn teardown(&mut self) {
        tracing::debug!(target: targets::STATE, "scope teardown");
        // Observers go first: a departing window has no use for the events
        // its own teardown would produce.
        self.selection.changed.disconnect_all();
        self.selection.became_empty.disconnect_all();
        self.selection.became_populated.disconnect_all();
        self.tracker.position_changed.disconnect_all();
        self.loader.loaded.disconnect_all();
        self.view_mode.mode_changed.disconnect_all();

        self.selection.clear();
        self.tracker.clear();
    }
}
