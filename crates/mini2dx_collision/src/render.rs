//! Rounded render coordinates
//!
//! Render code only ever reads whole-pixel coordinates. Each shape primitive
//! declares what its rounded projection looks like; two projections being
//! equal is what "converged" means for interpolation.

use std::fmt;

use mini2dx_geom::{round_to_pixel, Lerp, Point, Polygon, Rectangle};

/// A shape primitive that can be wrapped by a [`Collidable`](crate::Collidable)
pub trait InterpolatedShape: Lerp + Clone + fmt::Debug + Send + Sync + 'static {
    /// Whole-pixel projection of the shape
    type RenderCoords: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// Round this shape to render coordinates
    fn render_coords(&self) -> Self::RenderCoords;
}

/// A shape with a size, so size listeners are meaningful
///
/// Only collidables over an `AreaShape` accept size listeners.
pub trait AreaShape: InterpolatedShape {}

impl AreaShape for Rectangle {}

impl AreaShape for Polygon {}

/// Rounded position of a point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderPosition {
    pub x: i32,
    pub y: i32,
}

/// Rounded position and size of an area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Rounded bounds and vertices of a polygon
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderVertices {
    /// `x`/`y` of vertex 0, bounding-box `width`/`height`
    pub bounds: RenderBounds,
    /// Every vertex, rounded
    pub vertices: Vec<[i32; 2]>,
}

impl InterpolatedShape for Point {
    type RenderCoords = RenderPosition;

    fn render_coords(&self) -> RenderPosition {
        RenderPosition {
            x: round_to_pixel(self.x),
            y: round_to_pixel(self.y),
        }
    }
}

impl InterpolatedShape for Rectangle {
    type RenderCoords = RenderBounds;

    fn render_coords(&self) -> RenderBounds {
        RenderBounds {
            x: round_to_pixel(self.x),
            y: round_to_pixel(self.y),
            width: round_to_pixel(self.width),
            height: round_to_pixel(self.height),
        }
    }
}

impl InterpolatedShape for Polygon {
    type RenderCoords = RenderVertices;

    fn render_coords(&self) -> RenderVertices {
        RenderVertices {
            bounds: RenderBounds {
                x: round_to_pixel(self.x()),
                y: round_to_pixel(self.y()),
                width: round_to_pixel(self.width()),
                height: round_to_pixel(self.height()),
            },
            vertices: self
                .vertices()
                .iter()
                .map(|v| [round_to_pixel(v.x), round_to_pixel(v.y)])
                .collect(),
        }
    }
}
