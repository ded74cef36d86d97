//! Signal/slot plumbing for the conversation-list core.
//!
//! Every observable piece of list state (the selection set, the position
//! tracker, the swipe tracker) owns one [`Signal`] per event it reports.
//! The host connects closures; the owning component emits.
//!
//! Dispatch is always synchronous on the emitting thread. What makes this
//! more than a `Vec<Box<dyn Fn>>` is the dispatch contract: before any slot
//! runs, [`Signal::emit`] snapshots the connected slots and releases the
//! internal lock. A slot may therefore disconnect itself, disconnect a peer,
//! or re-enter the component that emitted, none of which may corrupt the
//! iteration. Slots connected *during* a dispatch only see later emissions.
//!
//! # Example
//!
//! ```
//! use maildeck_core::Signal;
//!
//! // Payload is the id list after a selection mutation.
//! let selection_changed = Signal::<Vec<u64>>::new();
//!
//! let conn = selection_changed.connect(|ids| {
//!     println!("{} rows selected", ids.len());
//! });
//!
//! selection_changed.emit(vec![3, 11]);
//! selection_changed.disconnect(conn);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Identifies one signal-slot connection.
    ///
    /// Returned by [`Signal::connect`]; pass it back to
    /// [`Signal::disconnect`] to remove that slot. Stays valid until the
    /// connection is removed or the signal is dropped.
    pub struct ConnectionId;
}

/// A connected slot. Arc-wrapped so a dispatch can run on a snapshot taken
/// outside the lock.
type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A multicast notification source with interior mutability.
///
/// Emitting invokes every connected slot, in connection order, with a shared
/// reference to the payload. `Args` is whatever one event carries; use `()`
/// for pure notifications.
///
/// The signal itself is `Send + Sync` and may be emitted from any thread
/// (slots must be too); components that own signals document which ones
/// actually cross threads.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// When set, emissions are swallowed. See [`Signal::set_blocked`].
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Creates a signal with nothing connected.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connects `slot`, returning the id that removes it again.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Connects `slot` for as long as the returned guard lives.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            signal: self,
            id: self.connect(slot),
        }
    }

    /// Removes the connection `id`, reporting whether it was still present.
    ///
    /// Safe to call from inside a slot: the in-flight dispatch finishes on
    /// the snapshot it already took, and later emissions skip the slot.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Removes every connection.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// The number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Suppresses (or re-enables) emission. While blocked, `emit` is a no-op;
    /// used to keep a batch update from producing a cascade of notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invokes every connected slot with `args`.
    ///
    /// The slot list is snapshotted and the lock released before the first
    /// slot runs, so slots may connect and disconnect freely during their own
    /// execution. Does nothing while blocked.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "emit suppressed: signal blocked");
            return;
        }

        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slot_count = snapshot.len(), "emit");

        for slot in snapshot {
            slot(&args);
        }
    }
}

/// Borrowed connection that disconnects itself when dropped.
///
/// Created by [`Signal::connect_scoped`]; ties the slot's lifetime to a
/// scope on the receiving side, which is how a host view keeps its
/// subscriptions from outliving it.
///
/// ```
/// use maildeck_core::Signal;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let emptied = Signal::<()>::new();
/// let seen = Arc::new(AtomicUsize::new(0));
/// {
///     let seen = seen.clone();
///     let _guard = emptied.connect_scoped(move |_| {
///         seen.fetch_add(1, Ordering::SeqCst);
///     });
///     emptied.emit(());
/// }
/// // Guard gone, slot gone.
/// emptied.emit(());
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct ConnectionGuard<'a, Args> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        let _ = self.signal.disconnect(self.id);
    }
}
