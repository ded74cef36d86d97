//! Maildeck is the headless interaction core of a mail client's conversation
//! list.
//!
//! A conversation list has three pieces of interaction state that outlive any
//! single frame and survive reloads of the backing data: which rows are
//! selected, which conversation is current, and what an in-flight swipe
//! means. This crate owns exactly that state and nothing else: no rendering,
//! no data, no persistence. The host hands in ordered snapshots of its list
//! and raw touch samples; Maildeck hands back signals and animation
//! parameters.
//!
//! # The pieces
//!
//! - [`model::SelectionSet`]: thread-safe id→item selection with
//!   became-empty/became-populated transition events
//! - [`model::PositionTracker`]: keeps "the current conversation" pointed at
//!   the right row while the list changes underneath it
//! - [`model::SnapshotLoader`]: a latest-result slot that makes slow reloads
//!   harmless
//! - [`model::ViewMode`]: the window's top-level view state machine
//! - [`gesture::SwipeTracker`]: swipe-to-dismiss resolution from raw touch
//!   samples
//!
//! # Example
//!
//! ```
//! use maildeck::model::{ConversationListState, ConversationId, ListSnapshot};
//!
//! let mut state: ConversationListState<String> = ConversationListState::new();
//!
//! // The host kicks off a load and delivers the resulting snapshot.
//! let ticket = state.begin_load();
//! state.apply_snapshot(ticket, ListSnapshot::from_ids([3, 1, 4]));
//!
//! // Selection and position bookkeeping now track that list.
//! state.selection().insert(ConversationId::new(3), "subject".to_string());
//! state.tracker_mut().initialize(ConversationId::new(1), 1);
//! ```

pub mod error;
pub mod gesture;
pub mod model;
pub mod prelude;

pub use error::{Error, Result};

// Re-export the signal types hosts interact with directly.
pub use maildeck_core::{ConnectionGuard, ConnectionId, Signal};
