//! Interpolated collision geometry for mini2Dx
//!
//! Simulation code moves collidables at a fixed step rate; render code draws
//! them at whatever rate the display runs. This crate bridges the two:
//!
//! - Collidables ([`CollisionBox`], [`CollisionPoint`], [`CollisionPolygon`])
//!   keep previous, current and render copies of their shape
//! - The [`InterpolationTracker`] snapshots every collidable before each
//!   simulation step and blends every collidable before each render
//! - Position and size listeners observe mutations of a collidable
//!
//! # Frame protocol
//!
//! ```ignore
//! let tracker = Arc::new(InterpolationTracker::new());
//! let player = CollisionBox::new(&tracker, 0.0, 0.0, 16.0, 16.0);
//!
//! // once per simulation step
//! tracker.pre_update();
//! player.translate(4.0, 0.0)?;
//!
//! // once per render
//! tracker.interpolate(alpha);
//! draw(player.render_x(), player.render_y());
//! ```

mod area;
mod collidable;
mod collision_box;
mod collision_point;
mod collision_polygon;
pub mod error;
pub mod id;
pub mod listener;
pub mod render;
pub mod tracker;

pub use area::{CollisionArea, CollisionObject};
pub use collidable::{ChangeFlags, Collidable, PositionListener, SizeListener};
pub use collision_box::CollisionBox;
pub use collision_point::CollisionPoint;
pub use collision_polygon::CollisionPolygon;
pub use error::CollisionError;
pub use id::{CollisionId, CollisionIdSequence};
pub use listener::{ListenerSet, PositionChangeListener, SizeChangeListener};
pub use render::{AreaShape, InterpolatedShape, RenderBounds, RenderPosition, RenderVertices};
pub use tracker::{Interpolatable, InterpolationTracker, DEFAULT_TRACKER_CAPACITY};

// Re-export the geometry primitives the collidables wrap
pub use mini2dx_geom::{Point, Polygon, Rectangle, RegularHexagon};
