//! Change notification for window manager state.
//!
//! A [`Signal`] holds a table of slots keyed by [`ConnectionId`]. The window
//! manager owns a few of them (frame created, frame removed, active frame
//! changed) and controls such as panels expose their own.
//!
//! Everything runs on the host's polling thread, so [`Signal::emit`] calls
//! each slot directly. The table lock is dropped before the first slot runs;
//! a slot may therefore connect to or disconnect from the signal that is
//! calling it.
//!
//! ```
//! use trellis_core::Signal;
//!
//! let frame_moved = Signal::<(i32, i32)>::new();
//! let id = frame_moved.connect(|(x, y)| println!("frame now at {x},{y}"));
//!
//! frame_moved.emit((40, 60));
//! assert!(frame_moved.disconnect(id));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle for one connected slot, used to disconnect it.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Notifies connected slots with a borrowed `Args` value.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Add a slot. Keep the returned id to remove it again.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Remove a slot. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Call every connected slot with `args`.
    pub fn emit(&self, args: Args) {
        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        if snapshot.is_empty() {
            return;
        }
        tracing::trace!(target: targets::SIGNAL, slots = snapshot.len(), "emit");
        for slot in &snapshot {
            slot(&args);
        }
    }

    /// Connect a slot that is removed again when the returned guard drops.
    pub fn connect_scoped<F>(signal: &Arc<Self>, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            id: signal.connect(slot),
            signal: Arc::clone(signal),
        }
    }
}

/// Disconnects its slot on drop.
pub struct ConnectionGuard<Args: 'static> {
    signal: Arc<Signal<Args>>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<Args> {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}
