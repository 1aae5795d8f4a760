//! Change-listener protocol
//!
//! Collidables publish two kinds of change: position and size. Observers
//! register against a collidable and are called back after every mutation of
//! the matching kind.
//!
//! Each collection of listeners sits behind its own reader/writer lock.
//! Registration and removal take the write lock; notification takes the read
//! lock, so fan-out may run concurrently with other fan-out but never with a
//! concurrent add or remove on the same collection. A listener must not add
//! or remove listeners on the collidable that is notifying it: that would
//! request the write lock while the read lock is held.
//!
//! [`clear`](ListenerSet::clear) is the exception. Called while a
//! notification is running (for example a listener disposing the collidable
//! that moved), it stops the running fan-out and the listeners are dropped
//! once the last notification finishes.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Observer of position changes
pub trait PositionChangeListener<T: ?Sized>: Send + Sync {
    /// Called after `moved` changed position
    fn position_changed(&self, moved: &T);
}

/// Observer of size changes
pub trait SizeChangeListener<T: ?Sized>: Send + Sync {
    /// Called after `changed` changed size
    fn size_changed(&self, changed: &T);
}

/// A lock-guarded, append-ordered collection of listeners
///
/// The backing vector is only allocated on the first [`add`](Self::add).
/// Removal is by `Arc` identity and may reorder the remaining listeners.
pub struct ListenerSet<L: ?Sized> {
    listeners: RwLock<Option<Vec<Arc<L>>>>,
    notifying: AtomicUsize,
    clear_pending: AtomicBool,
}

impl<L: ?Sized> Default for ListenerSet<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized> ListenerSet<L> {
    /// Create an empty, unallocated set
    pub const fn new() -> Self {
        Self {
            listeners: RwLock::new(None),
            notifying: AtomicUsize::new(0),
            clear_pending: AtomicBool::new(false),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Vec<Arc<L>>>> {
        self.listeners.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Vec<Arc<L>>>> {
        self.listeners.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a listener
    ///
    /// Adding the same listener twice makes it fire twice per change.
    pub fn add(&self, listener: Arc<L>) {
        self.write().get_or_insert_with(|| Vec::with_capacity(1)).push(listener);
    }

    /// Remove a listener by identity
    ///
    /// Returns `true` if the listener was registered.
    pub fn remove(&self, listener: &Arc<L>) -> bool {
        let mut guard = self.write();
        let Some(listeners) = guard.as_mut() else {
            return false;
        };
        let target = Arc::as_ptr(listener) as *const ();
        match listeners.iter().position(|l| Arc::as_ptr(l) as *const () == target) {
            Some(index) => {
                listeners.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke `f` once for every registered listener
    pub fn notify(&self, mut f: impl FnMut(&L)) {
        self.notifying.fetch_add(1, Ordering::SeqCst);
        if let Some(listeners) = self.read().as_ref() {
            for listener in listeners {
                if self.clear_pending.load(Ordering::SeqCst) {
                    break;
                }
                f(listener);
            }
        }
        // Read guard is released here, so a deferred clear can take the write lock
        if self.notifying.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.apply_pending_clear();
        }
    }

    /// Drop every listener
    ///
    /// Safe to call from inside a listener callback: the set is emptied as
    /// soon as the running notifications finish, and no further listener of
    /// those notifications is called.
    pub fn clear(&self) {
        self.clear_pending.store(true, Ordering::SeqCst);
        if self.notifying.load(Ordering::SeqCst) == 0 {
            self.apply_pending_clear();
        }
    }

    fn apply_pending_clear(&self) {
        if !self.clear_pending.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(listeners) = self.write().as_mut() {
            listeners.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.read().as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the backing storage has been allocated yet
    pub fn is_allocated(&self) -> bool {
        self.read().is_some()
    }
}
