//! Latest-result snapshot loading.
//!
//! [`SnapshotLoader`] is the request/response seam between the host's data
//! layer and the list state. The host calls [`begin`](SnapshotLoader::begin)
//! when it kicks off a (possibly asynchronous) list query and
//! [`deliver`](SnapshotLoader::deliver) when the result arrives. Only the
//! newest outstanding request can deliver: starting a new load supersedes any
//! older one, so a slow result can never overwrite a fresher list. There is no
//! explicit cancellation; superseding *is* the cancellation.

use maildeck_core::logging::targets;
use maildeck_core::Signal;

use crate::model::snapshot::ListSnapshot;

/// Token identifying one load request. Only the most recently issued ticket
/// is accepted by [`SnapshotLoader::deliver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// Single-slot holder of the latest delivered snapshot.
pub struct SnapshotLoader {
    next_ticket: u64,
    outstanding: Option<u64>,
    latest: Option<ListSnapshot>,

    /// Emitted when a current (non-superseded) load delivers its snapshot.
    pub loaded: Signal<ListSnapshot>,
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotLoader {
    /// Creates a loader with no outstanding request and no result.
    pub fn new() -> Self {
        Self {
            next_ticket: 0,
            outstanding: None,
            latest: None,
            loaded: Signal::new(),
        }
    }

    /// Registers a new load request, superseding any outstanding one.
    pub fn begin(&mut self) -> LoadTicket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        if let Some(superseded) = self.outstanding.replace(ticket) {
            tracing::debug!(target: targets::LOADER, superseded, ticket, "load superseded");
        } else {
            tracing::trace!(target: targets::LOADER, ticket, "load started");
        }
        LoadTicket(ticket)
    }

    /// Publishes the result of the load identified by `ticket`.
    ///
    /// Returns `true` and emits `loaded` if the ticket is still the newest
    /// outstanding request; a superseded or already-consumed ticket is
    /// dropped silently and returns `false`.
    pub fn deliver(&mut self, ticket: LoadTicket, snapshot: ListSnapshot) -> bool {
        if self.outstanding != Some(ticket.0) {
            tracing::debug!(target: targets::LOADER, ticket = ticket.0, "stale delivery dropped");
            return false;
        }
        self.outstanding = None;
        tracing::trace!(
            target: targets::LOADER,
            ticket = ticket.0,
            rows = snapshot.len(),
            "snapshot delivered"
        );
        self.latest = Some(snapshot.clone());
        self.loaded.emit(snapshot);
        true
    }

    /// `true` while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.outstanding.is_some()
    }

    /// The latest delivered snapshot, if any load has completed.
    pub fn latest(&self) -> Option<&ListSnapshot> {
        self.latest.as_ref()
    }
}
