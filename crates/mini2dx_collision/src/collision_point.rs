//! Interpolated points

use std::fmt;
use std::sync::Arc;

use mini2dx_geom::Point;

use crate::area::CollisionObject;
use crate::collidable::{ChangeFlags, Collidable};
use crate::error::CollisionError;
use crate::id::CollisionId;
use crate::tracker::InterpolationTracker;

/// A [`Point`] that interpolates its render position
///
/// Points have no size, so they take position listeners only.
pub type CollisionPoint = Collidable<Point>;

impl Collidable<Point> {
    pub fn new(tracker: &Arc<InterpolationTracker>, x: f32, y: f32) -> Arc<Self> {
        Self::from_shape(tracker, Point::new(x, y))
    }

    pub fn with_id(tracker: &Arc<InterpolationTracker>, id: CollisionId, x: f32, y: f32) -> Arc<Self> {
        Self::from_shape_with_id(tracker, id, Point::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.with_shape(|p| p.x)
    }

    pub fn y(&self) -> f32 {
        self.with_shape(|p| p.y)
    }

    pub fn set_x(&self, x: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |p| p.x = x)
    }

    pub fn set_y(&self, y: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |p| p.y = y)
    }

    pub fn set(&self, x: f32, y: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |p| p.set(x, y))
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |p| p.translate(dx, dy))
    }

    pub fn distance_to(&self, other: &CollisionPoint) -> f32 {
        let target = other.shape();
        self.with_shape(|p| p.distance(target))
    }
}

impl CollisionObject for Collidable<Point> {
    fn force_to(&self, x: f32, y: f32) -> Result<(), CollisionError> {
        self.force(ChangeFlags::POSITION, |p| {
            p.set(x, y);
            Ok(())
        })
    }

    fn render_x(&self) -> i32 {
        self.with_render_coords(|c| c.x)
    }

    fn render_y(&self) -> i32 {
        self.with_render_coords(|c| c.y)
    }
}

impl fmt::Display for Collidable<Point> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.shape();
        write!(f, "CollisionPoint{{id={}, x={}, y={}}}", self.id(), current.x, current.y)
    }
}
