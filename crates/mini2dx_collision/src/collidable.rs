//! Interpolated collision geometry
//!
//! A [`Collidable`] wraps a shape primitive and keeps three independently
//! owned copies of it:
//!
//! - **current** - the live shape that simulation code mutates
//! - **previous** - snapshot of current taken by [`pre_update`](Interpolatable::pre_update)
//! - **render** - blend of previous and current computed by
//!   [`interpolate`](Interpolatable::interpolate)
//!
//! Render code reads the rounded render coordinates only. Mutating the
//! current shape marks the collidable as needing interpolation; the mark is
//! cleared once the rounded render coordinates match the rounded current
//! coordinates, or immediately by a `force_to*` call.
//!
//! [`CollisionBox`](crate::CollisionBox), [`CollisionPoint`](crate::CollisionPoint)
//! and [`CollisionPolygon`](crate::CollisionPolygon) are instantiations of this
//! type for the respective primitives.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bitflags::bitflags;
use mini2dx_geom::GeomError;

use crate::error::CollisionError;
use crate::id::{CollisionId, CollisionIdSequence};
use crate::listener::{ListenerSet, PositionChangeListener, SizeChangeListener};
use crate::render::{AreaShape, InterpolatedShape};
use crate::tracker::{Interpolatable, InterpolationTracker};

bitflags! {
    /// Kinds of change waiting to be interpolated
    ///
    /// A collidable needs interpolation while any flag is set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Position has changed
        const POSITION = 1 << 0;
        /// Size (or vertex layout) has changed
        const SIZE = 1 << 1;
    }
}

/// Listener type notified of position changes to a `Collidable<S>`
pub type PositionListener<S> = dyn PositionChangeListener<Collidable<S>>;
/// Listener type notified of size changes to a `Collidable<S>`
pub type SizeListener<S> = dyn SizeChangeListener<Collidable<S>>;

struct ShapeState<S: InterpolatedShape> {
    current: S,
    previous: S,
    render: S,
    render_coords: S::RenderCoords,
    pending: ChangeFlags,
    disposed: bool,
}

/// A shape primitive with identity, change listeners and render interpolation
pub struct Collidable<S: InterpolatedShape> {
    id: CollisionId,
    state: RwLock<ShapeState<S>>,
    position_listeners: ListenerSet<PositionListener<S>>,
    size_listeners: ListenerSet<SizeListener<S>>,
    tracker: Arc<InterpolationTracker>,
}

impl<S: InterpolatedShape> Collidable<S> {
    /// Wrap a shape, drawing an id from [`CollisionIdSequence`]
    pub fn from_shape(tracker: &Arc<InterpolationTracker>, shape: S) -> Arc<Self> {
        Self::from_shape_with_id(tracker, CollisionIdSequence::next_id(), shape)
    }

    /// Wrap a shape with a caller-chosen id
    ///
    /// Keeping caller-chosen ids unique is the caller's responsibility.
    pub fn from_shape_with_id(tracker: &Arc<InterpolationTracker>, id: CollisionId, shape: S) -> Arc<Self> {
        let render_coords = shape.render_coords();
        let collidable = Arc::new(Self {
            id,
            state: RwLock::new(ShapeState {
                previous: shape.clone(),
                render: shape.clone(),
                current: shape,
                render_coords,
                pending: ChangeFlags::empty(),
                disposed: false,
            }),
            position_listeners: ListenerSet::new(),
            size_listeners: ListenerSet::new(),
            tracker: Arc::clone(tracker),
        });
        if !tracker.register(&collidable) {
            log::warn!(
                "Collidable id {} is already tracked; the new collidable will not be interpolated",
                id
            );
        }
        collidable
    }

    fn read(&self) -> RwLockReadGuard<'_, ShapeState<S>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ShapeState<S>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn id(&self) -> CollisionId {
        self.id
    }

    /// The tracker this collidable registered with
    pub fn tracker(&self) -> &Arc<InterpolationTracker> {
        &self.tracker
    }

    /// Whether the tracker currently holds this collidable
    pub fn is_tracked(&self) -> bool {
        self.tracker.is_registered(self)
    }

    /// Copy of the current shape
    pub fn shape(&self) -> S {
        self.read().current.clone()
    }

    /// Copy of the shape as of the last `pre_update`
    pub fn previous_shape(&self) -> S {
        self.read().previous.clone()
    }

    /// Copy of the last interpolated shape
    pub fn render_shape(&self) -> S {
        self.read().render.clone()
    }

    /// Read the current shape without copying it
    pub fn with_shape<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.read().current)
    }

    /// Rounded coordinates of the render shape
    pub fn render_coords(&self) -> S::RenderCoords {
        self.read().render_coords.clone()
    }

    pub(crate) fn with_render_coords<R>(&self, f: impl FnOnce(&S::RenderCoords) -> R) -> R {
        f(&self.read().render_coords)
    }

    /// Whether the render coordinates still lag behind the current shape
    pub fn is_interpolate_required(&self) -> bool {
        !self.read().pending.is_empty()
    }

    /// Kinds of change not yet converged
    pub fn pending_changes(&self) -> ChangeFlags {
        self.read().pending
    }

    pub fn is_disposed(&self) -> bool {
        self.read().disposed
    }

    /// Mutate the current shape, then notify listeners of `changes`
    pub(crate) fn update(&self, changes: ChangeFlags, f: impl FnOnce(&mut S)) -> Result<(), CollisionError> {
        self.try_update(changes, |shape| {
            f(shape);
            Ok(())
        })
    }

    /// Like [`update`](Self::update) for mutations that can reject their input
    ///
    /// `f` must leave the shape untouched when it returns an error.
    pub(crate) fn try_update(
        &self,
        changes: ChangeFlags,
        f: impl FnOnce(&mut S) -> Result<(), GeomError>,
    ) -> Result<(), CollisionError> {
        {
            let mut state = self.write();
            self.ensure_live(&state)?;
            f(&mut state.current)?;
            state.pending |= changes;
        }
        self.notify(changes);
        Ok(())
    }

    /// Mutate the current shape and snap previous and render state to it
    ///
    /// No interpolation lag follows; listeners of `changes` are still notified.
    pub(crate) fn force(
        &self,
        changes: ChangeFlags,
        f: impl FnOnce(&mut S) -> Result<(), GeomError>,
    ) -> Result<(), CollisionError> {
        {
            let mut guard = self.write();
            self.ensure_live(&guard)?;
            let state = &mut *guard;
            f(&mut state.current)?;
            state.previous.clone_from(&state.current);
            state.render.clone_from(&state.current);
            state.render_coords = state.render.render_coords();
            state.pending = ChangeFlags::empty();
        }
        self.notify(changes);
        Ok(())
    }

    fn ensure_live(&self, state: &ShapeState<S>) -> Result<(), CollisionError> {
        if state.disposed {
            log::warn!("Rejected mutation of disposed collidable {}", self.id);
            return Err(CollisionError::Disposed(self.id));
        }
        Ok(())
    }

    /// Flag pending changes without touching the shape
    fn mark_changed(&self, changes: ChangeFlags) {
        let mut state = self.write();
        if !state.disposed {
            state.pending |= changes;
        }
    }

    fn notify(&self, changes: ChangeFlags) {
        if changes.contains(ChangeFlags::POSITION) {
            self.notify_position_listeners();
        }
        if changes.contains(ChangeFlags::SIZE) {
            self.notify_size_listeners();
        }
    }

    pub fn add_position_listener(&self, listener: Arc<PositionListener<S>>) {
        self.position_listeners.add(listener);
    }

    /// Returns `true` if the listener was registered
    pub fn remove_position_listener(&self, listener: &Arc<PositionListener<S>>) -> bool {
        self.position_listeners.remove(listener)
    }

    pub(crate) fn notify_position_listeners(&self) {
        self.position_listeners.notify(|listener| listener.position_changed(self));
    }

    pub(crate) fn notify_size_listeners(&self) {
        self.size_listeners.notify(|listener| listener.size_changed(self));
    }

    /// Release this collidable
    ///
    /// Deregisters from the tracker and drops every listener. Later mutations
    /// fail with [`CollisionError::Disposed`]; `pre_update` and `interpolate`
    /// become no-ops. Disposing twice does nothing.
    pub fn dispose(&self) {
        {
            let mut state = self.write();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.pending = ChangeFlags::empty();
        }
        self.tracker.deregister(self);
        self.position_listeners.clear();
        self.size_listeners.clear();
        log::debug!("Disposed collidable {}", self.id);
    }
}

impl<S: InterpolatedShape> Interpolatable for Collidable<S> {
    fn id(&self) -> CollisionId {
        self.id
    }

    fn pre_update(&self) {
        let mut guard = self.write();
        if guard.disposed {
            return;
        }
        let state = &mut *guard;
        state.previous.clone_from(&state.current);
    }

    fn interpolate(&self, alpha: f32) {
        let mut guard = self.write();
        if guard.disposed || guard.pending.is_empty() {
            return;
        }
        let state = &mut *guard;
        if alpha >= 1.0 {
            // Land exactly on current; lerp at 1.0 can fall an ulp short
            state.render.clone_from(&state.current);
        } else {
            state.render = state.previous.lerp(&state.current, alpha.max(0.0));
        }
        state.render_coords = state.render.render_coords();
        if state.render_coords == state.current.render_coords() {
            state.pending = ChangeFlags::empty();
        }
    }
}

/// Ignores notifications about any other collidable
impl<S: InterpolatedShape> PositionChangeListener<Collidable<S>> for Collidable<S> {
    fn position_changed(&self, moved: &Collidable<S>) {
        if moved.id != self.id {
            return;
        }
        self.mark_changed(ChangeFlags::POSITION);
    }
}

impl<S: AreaShape> Collidable<S> {
    pub fn add_size_listener(&self, listener: Arc<SizeListener<S>>) {
        self.size_listeners.add(listener);
    }

    /// Returns `true` if the listener was registered
    pub fn remove_size_listener(&self, listener: &Arc<SizeListener<S>>) -> bool {
        self.size_listeners.remove(listener)
    }
}

/// Ignores notifications about any other collidable
impl<S: AreaShape> SizeChangeListener<Collidable<S>> for Collidable<S> {
    fn size_changed(&self, changed: &Collidable<S>) {
        if changed.id != self.id {
            return;
        }
        self.mark_changed(ChangeFlags::SIZE);
    }
}

impl<S: InterpolatedShape> PartialEq for Collidable<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S: InterpolatedShape> Eq for Collidable<S> {}

impl<S: InterpolatedShape> Hash for Collidable<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<S: InterpolatedShape> fmt::Debug for Collidable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Collidable")
            .field("id", &self.id)
            .field("current", &state.current)
            .field("render_coords", &state.render_coords)
            .field("pending", &state.pending)
            .field("disposed", &state.disposed)
            .finish()
    }
}
