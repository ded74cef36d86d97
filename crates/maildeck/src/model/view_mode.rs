//! Central view-mode state machine.
//!
//! Transitions between the app's top-level views should go through one
//! [`ViewMode`] object, and UI components that depend on the mode listen to
//! it, rather than each component guessing from ambient state.

use serde::{Deserialize, Serialize};

use maildeck_core::logging::targets;
use maildeck_core::Signal;

/// All top-level views a mail window can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// The mode has not been initialized.
    #[default]
    Unknown,
    /// Showing the folder list.
    FolderList,
    /// Showing a list of conversations.
    ConversationList,
    /// Showing a single conversation.
    Conversation,
    /// Showing results from a user search.
    SearchResults,
}

/// Holds the current [`Mode`] and notifies listeners on transitions.
pub struct ViewMode {
    mode: Mode,

    /// Emitted with the new mode whenever a transition actually changes it.
    pub mode_changed: Signal<Mode>,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewMode {
    /// Creates a view mode in the [`Mode::Unknown`] state.
    pub fn new() -> Self {
        Self {
            mode: Mode::default(),
            mode_changed: Signal::new(),
        }
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Requests a transition to show a single conversation.
    /// Returns whether a change occurred.
    pub fn transition_to_conversation(&mut self) -> bool {
        self.set_mode(Mode::Conversation)
    }

    /// Requests a transition to show the conversation list.
    /// Returns whether a change occurred.
    pub fn transition_to_conversation_list(&mut self) -> bool {
        self.set_mode(Mode::ConversationList)
    }

    /// Requests a transition to show the folder list.
    /// Returns whether a change occurred.
    pub fn transition_to_folder_list(&mut self) -> bool {
        self.set_mode(Mode::FolderList)
    }

    /// Requests a transition to show search results.
    /// Returns whether a change occurred.
    pub fn transition_to_search_results(&mut self) -> bool {
        self.set_mode(Mode::SearchResults)
    }

    pub fn is_conversation_mode(&self) -> bool {
        self.mode == Mode::Conversation
    }

    pub fn is_conversation_list_mode(&self) -> bool {
        self.mode == Mode::ConversationList
    }

    pub fn is_folder_list_mode(&self) -> bool {
        self.mode == Mode::FolderList
    }

    pub fn is_search_mode(&self) -> bool {
        self.mode == Mode::SearchResults
    }

    /// The mode to persist across a window teardown; restore with
    /// [`restore`](Self::restore).
    pub fn saved_state(&self) -> Mode {
        self.mode
    }

    /// Re-applies a previously saved mode, dispatching like any transition.
    /// Returns whether a change occurred.
    pub fn restore(&mut self, saved: Mode) -> bool {
        self.set_mode(saved)
    }

    fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        tracing::debug!(target: targets::MODE, from = ?self.mode, to = ?mode, "transition");
        self.mode = mode;
        self.mode_changed.emit(mode);
        true
    }
}
