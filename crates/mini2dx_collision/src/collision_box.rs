//! Interpolated axis-aligned boxes

use std::fmt;
use std::sync::Arc;

use mini2dx_geom::{Point, Rectangle};

use crate::area::{CollisionArea, CollisionObject};
use crate::collidable::{ChangeFlags, Collidable};
use crate::error::CollisionError;
use crate::id::CollisionId;
use crate::tracker::InterpolationTracker;

/// A [`Rectangle`] that interpolates its render bounds
///
/// Game objects move a box around the world during the update phase and read
/// its render coordinates during the render phase.
pub type CollisionBox = Collidable<Rectangle>;

impl Collidable<Rectangle> {
    /// Create a box with an id drawn from the sequence
    pub fn new(tracker: &Arc<InterpolationTracker>, x: f32, y: f32, width: f32, height: f32) -> Arc<Self> {
        Self::from_shape(tracker, Rectangle::new(x, y, width, height))
    }

    /// Create a box with a caller-chosen id
    pub fn with_id(
        tracker: &Arc<InterpolationTracker>,
        id: CollisionId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Arc<Self> {
        Self::from_shape_with_id(tracker, id, Rectangle::new(x, y, width, height))
    }

    /// A 1x1 box at the origin
    pub fn unit(tracker: &Arc<InterpolationTracker>) -> Arc<Self> {
        Self::from_shape(tracker, Rectangle::unit())
    }

    pub fn x(&self) -> f32 {
        self.with_shape(|r| r.x)
    }

    pub fn y(&self) -> f32 {
        self.with_shape(|r| r.y)
    }

    pub fn width(&self) -> f32 {
        self.with_shape(|r| r.width)
    }

    pub fn height(&self) -> f32 {
        self.with_shape(|r| r.height)
    }

    pub fn set_x(&self, x: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |r| r.x = x)
    }

    pub fn set_y(&self, y: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |r| r.y = y)
    }

    pub fn set_position(&self, x: f32, y: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |r| r.set_position(x, y))
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |r| r.translate(dx, dy))
    }

    pub fn set_width(&self, width: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::SIZE, |r| r.width = width)
    }

    pub fn set_height(&self, height: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::SIZE, |r| r.height = height)
    }

    pub fn set_size(&self, width: f32, height: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::SIZE, |r| r.set_size(width, height))
    }

    /// Set position and size in one mutation
    pub fn set(&self, x: f32, y: f32, width: f32, height: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION | ChangeFlags::SIZE, |r| r.set(x, y, width, height))
    }

    /// Resize horizontally with no interpolation lag
    pub fn force_to_width(&self, width: f32) -> Result<(), CollisionError> {
        self.force(ChangeFlags::SIZE, |r| {
            r.width = width;
            Ok(())
        })
    }

    /// Resize vertically with no interpolation lag
    pub fn force_to_height(&self, height: f32) -> Result<(), CollisionError> {
        self.force(ChangeFlags::SIZE, |r| {
            r.height = height;
            Ok(())
        })
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.with_shape(|r| r.contains(Point::new(x, y)))
    }

    /// Whether the current bounds of two boxes overlap
    pub fn intersects(&self, other: &CollisionBox) -> bool {
        let bounds = other.shape();
        self.with_shape(|r| r.intersects(&bounds))
    }
}

impl CollisionObject for Collidable<Rectangle> {
    fn force_to(&self, x: f32, y: f32) -> Result<(), CollisionError> {
        self.force(ChangeFlags::POSITION, |r| {
            r.set_position(x, y);
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

impl CollisionArea for Collidable<Rectangle> {
    fn force_to_bounds(&self, x: f32, y: f32, width: f32, height: f32) -> Result<(), CollisionError> {
        self.force(ChangeFlags::POSITION | ChangeFlags::SIZE, |r| {
            r.set(x, y, width, height);
            Ok(())
        })
    }

    fn render_width(&self) -> i32 {
        self.with_render_coords(|c| c.width)
    }

    fn render_height(&self) -> i32 {
        self.with_render_coords(|c| c.height)
    }
}

impl fmt::Display for Collidable<Rectangle> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.shape();
        let render = self.render_coords();
        write!(
            f,
            "CollisionBox [id={}, x={}, y={}, width={}, height={}, render=({}, {}, {}, {})]",
            self.id(),
            current.x,
            current.y,
            current.width,
            current.height,
            render.x,
            render.y,
            render.width,
            render.height
        )
    }
}
