//! Frame interpolation tracking
//!
//! The [`InterpolationTracker`] is the single frame-loop integration point for
//! interpolated geometry. The host game loop calls
//! [`pre_update`](InterpolationTracker::pre_update) once before every
//! simulation step and [`interpolate`](InterpolationTracker::interpolate) once
//! before every render, and the tracker fans both calls out to every live
//! collidable in registration order.
//!
//! # Locking
//!
//! The registry sits behind a reader/writer lock. Fan-out holds the read lock
//! for the whole iteration; `register`, `deregister` and `deregister_all` take
//! the write lock. Registry changes requested from another thread during a
//! frame's fan-out therefore wait for the fan-out to finish, and are never
//! observed half-way through it.
//!
//! The tracker holds weak references. A collidable dropped without being
//! disposed is skipped by fan-out and pruned on the next registry change.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::id::CollisionId;

/// Default registry capacity
pub const DEFAULT_TRACKER_CAPACITY: usize = 512;

/// Something the tracker can snapshot and interpolate every frame
pub trait Interpolatable: Send + Sync {
    /// Identity used for registry membership
    fn id(&self) -> CollisionId;

    /// Snapshot the current state as the previous state
    ///
    /// Called once per simulation step, before any mutation that should be
    /// blended.
    fn pre_update(&self);

    /// Blend the render state between previous and current state
    ///
    /// `alpha` is the progress through the current simulation step, in `[0, 1]`.
    fn interpolate(&self, alpha: f32);
}

struct TrackedEntry {
    id: CollisionId,
    addr: usize,
    target: Weak<dyn Interpolatable>,
}

impl TrackedEntry {
    fn is_live(&self) -> bool {
        self.target.strong_count() > 0
    }

    fn is(&self, target: &dyn Interpolatable) -> bool {
        self.id == target.id() && self.addr == addr_of(target) && self.is_live()
    }
}

fn addr_of(target: &dyn Interpolatable) -> usize {
    target as *const _ as *const () as usize
}

/// Insertion-ordered set of tracked entries
#[derive(Default)]
struct Registry {
    entries: Vec<TrackedEntry>,
    members: HashSet<CollisionId>,
}

impl Registry {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    /// Forget entries whose collidable has been dropped
    fn prune(&mut self) {
        let members = &mut self.members;
        self.entries.retain(|entry| {
            let live = entry.is_live();
            if !live {
                members.remove(&entry.id);
            }
            live
        });
    }

    fn remove_target(&mut self, target: &dyn Interpolatable) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.is(target)) else {
            return false;
        };
        let entry = self.entries.remove(index);
        self.members.remove(&entry.id);
        true
    }

    fn remove(&mut self, id: CollisionId) -> bool {
        if !self.members.remove(&id) {
            return false;
        }
        self.entries.retain(|entry| entry.id != id);
        true
    }

    fn live(&self) -> impl Iterator<Item = Arc<dyn Interpolatable>> + '_ {
        self.entries.iter().filter_map(|entry| entry.target.upgrade())
    }
}

/// Registry of every live interpolatable collidable
///
/// Create one per application (or per test) and hand an `Arc` of it to every
/// collidable constructor. Collidables register themselves on construction and
/// deregister on dispose.
pub struct InterpolationTracker {
    registry: RwLock<Registry>,
}

impl Default for InterpolationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpolationTracker {
    /// Create a tracker with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TRACKER_CAPACITY)
    }

    /// Create a tracker pre-sized for `capacity` collidables
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: RwLock::new(Registry::with_capacity(capacity)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start tracking a collidable
    ///
    /// Returns `false` (and changes nothing) if a collidable with the same id
    /// is already tracked.
    pub fn register<T: Interpolatable + 'static>(&self, target: &Arc<T>) -> bool {
        let id = target.id();
        let addr = Arc::as_ptr(target) as *const () as usize;
        let weak: Weak<T> = Arc::downgrade(target);
        let mut registry = self.write();
        registry.prune();
        if !registry.members.insert(id) {
            return false;
        }
        registry.entries.push(TrackedEntry { id, addr, target: weak });
        log::debug!("Registered collidable {} for interpolation", id);
        true
    }

    /// Stop tracking a collidable
    ///
    /// Returns `false` if it was not tracked. Another collidable that happens
    /// to share the id is left alone.
    pub fn deregister(&self, target: &dyn Interpolatable) -> bool {
        let mut registry = self.write();
        registry.prune();
        let removed = registry.remove_target(target);
        if removed {
            log::debug!("Deregistered collidable {}", target.id());
        }
        removed
    }

    /// Stop tracking the collidable with the given id
    pub fn deregister_id(&self, id: CollisionId) -> bool {
        let mut registry = self.write();
        registry.prune();
        let removed = registry.remove(id);
        if removed {
            log::debug!("Deregistered collidable {}", id);
        }
        removed
    }

    /// Stop tracking everything
    ///
    /// Intended for full engine teardown.
    pub fn deregister_all(&self) {
        let mut registry = self.write();
        let count = registry.entries.len();
        registry.entries.clear();
        registry.members.clear();
        log::debug!("Deregistered all {} collidables", count);
    }

    /// Whether this exact collidable is currently tracked
    pub fn is_registered(&self, target: &dyn Interpolatable) -> bool {
        self.read().entries.iter().any(|entry| entry.is(target))
    }

    /// Whether a live collidable with the given id is tracked
    pub fn contains_id(&self, id: CollisionId) -> bool {
        let registry = self.read();
        registry.members.contains(&id)
            && registry.entries.iter().any(|entry| entry.id == id && entry.is_live())
    }

    /// Number of live tracked collidables
    pub fn len(&self) -> usize {
        self.read().entries.iter().filter(|entry| entry.is_live()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot phase: call `pre_update` on every tracked collidable
    pub fn pre_update(&self) {
        let registry = self.read();
        log::trace!("pre_update over {} collidables", registry.entries.len());
        for target in registry.live() {
            target.pre_update();
        }
    }

    /// Render phase: call `interpolate(alpha)` on every tracked collidable
    pub fn interpolate(&self, alpha: f32) {
        let registry = self.read();
        log::trace!("interpolate({:.3}) over {} collidables", alpha, registry.entries.len());
        for target in registry.live() {
            target.interpolate(alpha);
        }
    }
}

impl fmt::Debug for InterpolationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpolationTracker")
            .field("tracked", &self.len())
            .finish()
    }
}
