//! Position tracking for the current conversation across list reloads.
//!
//! [`PositionTracker`] remembers which conversation the host considers
//! current and where it sits in the list, and re-derives that position every
//! time the backing list changes underneath it. The host calls
//! [`initialize`](PositionTracker::initialize) when the user opens a
//! conversation and [`reconcile`](PositionTracker::reconcile) on every reload;
//! observers learn the outcome through `position_changed`, including whether
//! the list widget should scroll the row into view.
//!
//! Reconciliation is an identity scan, not a diff: the backing list is
//! externally mutated with no patch information, so searching for the id is
//! the only correctness-preserving approach. Reloads are rare, so the O(n)
//! scan is irrelevant.

use std::collections::HashSet;

use maildeck_core::logging::targets;
use maildeck_core::Signal;

use crate::model::conversation::ConversationId;
use crate::model::snapshot::{ListSnapshot, Row};

/// Lifecycle of the tracked position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    /// No conversation is designated.
    #[default]
    Empty,
    /// The designated conversation is confirmed present at the recorded
    /// position in the latest snapshot.
    Valid,
    /// A conversation is designated but its position has not been confirmed
    /// against a snapshot since it was recorded.
    Stale,
}

/// Which way to walk the list from the current position.
///
/// The conversation list is ordered newest-first: `Newer` steps toward index
/// 0, `Older` steps toward the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the top of the list (decreasing index).
    Newer,
    /// Toward the bottom of the list (increasing index).
    Older,
}

/// Where to land after the current conversation is removed, typically a user
/// preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoAdvance {
    /// Show the adjacent newer conversation.
    Newer,
    /// Show the adjacent older conversation.
    #[default]
    Older,
    /// Return to the conversation list instead of advancing.
    ReturnToList,
}

/// Payload of `position_changed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionEvent {
    /// The designated conversation and its confirmed position, or `None` if
    /// the tracker emptied.
    pub current: Option<(ConversationId, usize)>,
    /// `true` when the designation jumped in a way the user did not drive
    /// (first confirmation, or adoption of a replacement row), so the list
    /// widget should scroll the row into view.
    pub suggest_scroll: bool,
}

/// Tracks the current conversation's identity and list position across
/// reloads of the externally-owned backing list.
pub struct PositionTracker {
    state: TrackerState,
    current: Option<(ConversationId, usize)>,

    /// Emitted whenever the confirmed position changes, a replacement row is
    /// adopted, or the tracker empties.
    pub position_changed: Signal<PositionEvent>,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionTracker {
    /// Creates a tracker that designates no conversation.
    pub fn new() -> Self {
        Self {
            state: TrackerState::Empty,
            current: None,
            position_changed: Signal::new(),
        }
    }

    /// The tracker's lifecycle state.
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// `true` once the designated conversation has been confirmed against a
    /// snapshot.
    pub fn is_valid(&self) -> bool {
        self.state == TrackerState::Valid
    }

    /// The designated conversation id, confirmed or not.
    pub fn current_id(&self) -> Option<ConversationId> {
        self.current.map(|(id, _)| id)
    }

    /// The last recorded position of the designated conversation.
    pub fn position(&self) -> Option<usize> {
        self.current.map(|(_, pos)| pos)
    }

    /// Designates a conversation at an assumed position.
    ///
    /// The position is recorded optimistically; the tracker stays `Stale`
    /// until the next [`reconcile`](Self::reconcile) confirms it. No
    /// notification is dispatched here.
    pub fn initialize(&mut self, id: ConversationId, position: usize) {
        tracing::debug!(target: targets::POSITION, %id, position, "initialize");
        self.current = Some((id, position));
        self.state = TrackerState::Stale;
    }

    /// Re-derives the tracked position against a fresh snapshot.
    ///
    /// - Designated id found at index `k`: the tracker becomes `Valid` at
    ///   `k`. Observers are notified if `k` differs from the previous
    ///   position or the tracker was not previously valid; `suggest_scroll`
    ///   is set only in the latter case (the user already sees rows move when
    ///   only the index shifted).
    /// - Designated id missing, snapshot non-empty: the position is clamped
    ///   to the snapshot bounds and the conversation now living there is
    ///   adopted, `Valid`, with `suggest_scroll` (a different row is current
    ///   now).
    /// - Designated id missing, snapshot empty: the tracker empties.
    ///
    /// A tracker in `Empty` state ignores reconciliation.
    pub fn reconcile(&mut self, snapshot: &ListSnapshot) {
        let Some((id, old_position)) = self.current else {
            return;
        };
        let was_valid = self.state == TrackerState::Valid;

        match snapshot.position_of(id) {
            Some(found) => {
                self.state = TrackerState::Valid;
                self.current = Some((id, found));
                if found != old_position || !was_valid {
                    tracing::debug!(
                        target: targets::POSITION,
                        %id,
                        from = old_position,
                        to = found,
                        "confirmed"
                    );
                    self.position_changed.emit(PositionEvent {
                        current: Some((id, found)),
                        suggest_scroll: !was_valid,
                    });
                }
            }
            None if snapshot.is_empty() => {
                tracing::debug!(target: targets::POSITION, %id, "list emptied, dropping designation");
                self.state = TrackerState::Empty;
                self.current = None;
                self.position_changed.emit(PositionEvent {
                    current: None,
                    suggest_scroll: false,
                });
            }
            None => {
                let clamped = old_position.min(snapshot.len() - 1);
                let Some(adopted) = snapshot.get(clamped).map(|row| row.id) else {
                    return;
                };
                tracing::debug!(
                    target: targets::POSITION,
                    lost = %id,
                    %adopted,
                    position = clamped,
                    "designated conversation gone, adopting resident row"
                );
                self.state = TrackerState::Valid;
                self.current = Some((adopted, clamped));
                self.position_changed.emit(PositionEvent {
                    current: Some((adopted, clamped)),
                    suggest_scroll: true,
                });
            }
        }
    }

    /// Drops the designation. Notifies once; a tracker that is already empty
    /// stays silent.
    pub fn clear(&mut self) {
        if self.state == TrackerState::Empty && self.current.is_none() {
            return;
        }
        tracing::debug!(target: targets::POSITION, "clear");
        self.state = TrackerState::Empty;
        self.current = None;
        self.position_changed.emit(PositionEvent {
            current: None,
            suggest_scroll: false,
        });
    }

    /// Walks `snapshot` from the current position in `direction`, skipping
    /// ids in `excluded` (rows that are mid-removal), and returns the first
    /// remaining conversation, or `None` at the end of the list.
    ///
    /// Requires a `Valid` tracker; an unconfirmed position would walk from a
    /// possibly wrong spot.
    pub fn adjacent(
        &self,
        snapshot: &ListSnapshot,
        direction: Direction,
        excluded: &HashSet<ConversationId>,
    ) -> Option<(ConversationId, usize)> {
        if self.state != TrackerState::Valid {
            return None;
        }
        let (_, position) = self.current?;

        match direction {
            Direction::Newer => (0..position)
                .rev()
                .map(|pos| (snapshot.get(pos), pos))
                .find_map(|(row, pos)| keep(row, pos, excluded)),
            Direction::Older => (position + 1..snapshot.len())
                .map(|pos| (snapshot.get(pos), pos))
                .find_map(|(row, pos)| keep(row, pos, excluded)),
        }
    }

    /// Applies an auto-advance preference after the current conversation (and
    /// possibly its `excluded` companions) are removed: the adjacent
    /// conversation in the preferred direction, or `None` when the preference
    /// is to return to the list or no candidate exists.
    pub fn auto_advance(
        &self,
        policy: AutoAdvance,
        snapshot: &ListSnapshot,
        excluded: &HashSet<ConversationId>,
    ) -> Option<(ConversationId, usize)> {
        let next = match policy {
            AutoAdvance::Newer => self.adjacent(snapshot, Direction::Newer, excluded),
            AutoAdvance::Older => self.adjacent(snapshot, Direction::Older, excluded),
            AutoAdvance::ReturnToList => None,
        };
        tracing::debug!(target: targets::POSITION, ?policy, ?next, "auto_advance");
        next
    }
}

fn keep(
    row: Option<Row>,
    position: usize,
    excluded: &HashSet<ConversationId>,
) -> Option<(ConversationId, usize)> {
    let row = row?;
    (!excluded.contains(&row.id)).then_some((row.id, position))
}
