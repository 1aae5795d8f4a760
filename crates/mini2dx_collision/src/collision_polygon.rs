//! Interpolated polygons
//!
//! Polygons are vertex-defined, so their size cannot be forced through
//! width/height; replace the vertices with
//! [`force_to_vertices`](Collidable::force_to_vertices) instead.

use std::fmt;
use std::sync::Arc;

use mini2dx_geom::{Point, Polygon, RegularHexagon};

use crate::area::{CollisionArea, CollisionObject};
use crate::collidable::{ChangeFlags, Collidable};
use crate::error::CollisionError;
use crate::id::{CollisionId, CollisionIdSequence};
use crate::tracker::InterpolationTracker;

/// A [`Polygon`] that interpolates its render vertices
///
/// Interpolation is vertex-wise and converges once every rounded render
/// vertex matches the rounded current vertex.
pub type CollisionPolygon = Collidable<Polygon>;

impl Collidable<Polygon> {
    /// Create from a flat `[x0, y0, x1, y1, ...]` coordinate slice
    pub fn new(tracker: &Arc<InterpolationTracker>, vertices: &[f32]) -> Result<Arc<Self>, CollisionError> {
        Self::with_id(tracker, CollisionIdSequence::next_id(), vertices)
    }

    pub fn with_id(
        tracker: &Arc<InterpolationTracker>,
        id: CollisionId,
        vertices: &[f32],
    ) -> Result<Arc<Self>, CollisionError> {
        let polygon = Polygon::from_flat(vertices)?;
        Ok(Self::from_shape_with_id(tracker, id, polygon))
    }

    /// Create from a slice of points
    pub fn from_points(tracker: &Arc<InterpolationTracker>, points: &[Point]) -> Result<Arc<Self>, CollisionError> {
        Self::from_points_with_id(tracker, CollisionIdSequence::next_id(), points)
    }

    pub fn from_points_with_id(
        tracker: &Arc<InterpolationTracker>,
        id: CollisionId,
        points: &[Point],
    ) -> Result<Arc<Self>, CollisionError> {
        let polygon = Polygon::from_points(points)?;
        Ok(Self::from_shape_with_id(tracker, id, polygon))
    }

    /// Create a regular hexagon around a center point
    pub fn hexagon(tracker: &Arc<InterpolationTracker>, center_x: f32, center_y: f32, radius: f32) -> Arc<Self> {
        Self::from_shape(tracker, RegularHexagon::new(center_x, center_y, radius).to_polygon())
    }

    /// X coordinate of vertex 0
    pub fn x(&self) -> f32 {
        self.with_shape(Polygon::x)
    }

    /// Y coordinate of vertex 0
    pub fn y(&self) -> f32 {
        self.with_shape(Polygon::y)
    }

    pub fn width(&self) -> f32 {
        self.with_shape(Polygon::width)
    }

    pub fn height(&self) -> f32 {
        self.with_shape(Polygon::height)
    }

    pub fn vertex_count(&self) -> usize {
        self.with_shape(Polygon::vertex_count)
    }

    pub fn vertices(&self) -> Vec<Point> {
        self.with_shape(|p| p.vertices().to_vec())
    }

    pub fn set_x(&self, x: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |p| p.set_x(x))
    }

    pub fn set_y(&self, y: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |p| p.set_y(y))
    }

    /// Move so that vertex 0 sits at `(x, y)`
    pub fn set_xy(&self, x: f32, y: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |p| p.set_xy(x, y))
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Result<(), CollisionError> {
        self.update(ChangeFlags::POSITION, |p| p.translate(dx, dy))
    }

    /// Replace every vertex from a flat coordinate slice
    pub fn set_vertices(&self, vertices: &[f32]) -> Result<(), CollisionError> {
        self.try_update(ChangeFlags::POSITION | ChangeFlags::SIZE, |p| p.set_vertices(vertices))
    }

    /// Replace every vertex
    pub fn set_points(&self, points: &[Point]) -> Result<(), CollisionError> {
        self.try_update(ChangeFlags::POSITION | ChangeFlags::SIZE, |p| p.set_points(points))
    }

    /// Replace every vertex in current, previous and render state
    pub fn force_to_vertices(&self, vertices: &[f32]) -> Result<(), CollisionError> {
        self.force(ChangeFlags::POSITION | ChangeFlags::SIZE, |p| p.set_vertices(vertices))
    }

    /// Rounded render X coordinate of a vertex
    pub fn render_vertex_x(&self, index: usize) -> Option<i32> {
        self.with_render_coords(|c| c.vertices.get(index).map(|v| v[0]))
    }

    /// Rounded render Y coordinate of a vertex
    pub fn render_vertex_y(&self, index: usize) -> Option<i32> {
        self.with_render_coords(|c| c.vertices.get(index).map(|v| v[1]))
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.with_shape(|p| p.contains(Point::new(x, y)))
    }
}

impl CollisionObject for Collidable<Polygon> {
    fn force_to(&self, x: f32, y: f32) -> Result<(), CollisionError> {
        self.force(ChangeFlags::POSITION, |p| {
            p.set_xy(x, y);
            Ok(())
        })
    }

    fn render_x(&self) -> i32 {
        self.with_render_coords(|c| c.bounds.x)
    }

    fn render_y(&self) -> i32 {
        self.with_render_coords(|c| c.bounds.y)
    }
}

impl CollisionArea for Collidable<Polygon> {
    /// Always fails: a polygon's size follows from its vertices
    fn force_to_bounds(&self, _x: f32, _y: f32, _width: f32, _height: f32) -> Result<(), CollisionError> {
        Err(CollisionError::UnsupportedOperation(
            "force_to_bounds(x, y, width, height) is not supported on CollisionPolygon",
        ))
    }

    fn render_width(&self) -> i32 {
        self.with_render_coords(|c| c.bounds.width)
    }

    fn render_height(&self) -> i32 {
        self.with_render_coords(|c| c.bounds.height)
    }
}

impl fmt::Display for Collidable<Polygon> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollisionPolygon{{id={}, vertices={}}}", self.id(), self.vertex_count())
    }
}
