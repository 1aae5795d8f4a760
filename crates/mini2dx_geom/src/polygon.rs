//! Vertex-defined polygons
//!
//! A polygon is an ordered list of at least three vertices. Its "position" is
//! the position of vertex 0; its width and height are the extents of the
//! vertex bounding box. Moving the polygon translates every vertex.

use serde::{Serialize, Deserialize};

use crate::error::GeomError;
use crate::shape::Lerp;
use crate::Point;

/// A simple polygon in 2D space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from a flat `[x0, y0, x1, y1, ...]` coordinate slice
    pub fn from_flat(coordinates: &[f32]) -> Result<Self, GeomError> {
        Self::from_points(&points_from_flat(coordinates)?)
    }

    /// Create a polygon from a slice of points
    pub fn from_points(points: &[Point]) -> Result<Self, GeomError> {
        validate_vertex_count(points.len())?;
        Ok(Self {
            vertices: points.to_vec(),
        })
    }

    /// Create a regular polygon
    ///
    /// Vertex 0 sits at `rotation_degrees` around the center; the remaining
    /// vertices follow counter-clockwise at equal angles.
    pub fn regular(center: Point, radius: f32, sides: usize, rotation_degrees: f32) -> Result<Self, GeomError> {
        validate_vertex_count(sides)?;
        let step = 360.0 / sides as f32;
        let vertices: Vec<Point> = (0..sides)
            .map(|i| {
                let angle = (rotation_degrees + step * i as f32).to_radians();
                Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect();
        Ok(Self::from_vertices_unchecked(vertices))
    }

    /// Callers guarantee at least three vertices
    pub(crate) fn from_vertices_unchecked(vertices: Vec<Point>) -> Self {
        debug_assert!(vertices.len() >= 3);
        Self { vertices }
    }

    /// Get the vertices of this polygon
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// View the vertex data as a flat `[x0, y0, x1, y1, ...]` slice
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
    }

    pub fn x_at(&self, index: usize) -> Option<f32> {
        self.vertices.get(index).map(|v| v.x)
    }

    pub fn y_at(&self, index: usize) -> Option<f32> {
        self.vertices.get(index).map(|v| v.y)
    }

    /// X coordinate of vertex 0
    pub fn x(&self) -> f32 {
        self.vertices[0].x
    }

    /// Y coordinate of vertex 0
    pub fn y(&self) -> f32 {
        self.vertices[0].y
    }

    pub fn min_x(&self) -> f32 {
        self.vertices.iter().map(|v| v.x).fold(f32::INFINITY, f32::min)
    }

    pub fn min_y(&self) -> f32 {
        self.vertices.iter().map(|v| v.y).fold(f32::INFINITY, f32::min)
    }

    pub fn max_x(&self) -> f32 {
        self.vertices.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn max_y(&self) -> f32 {
        self.vertices.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max)
    }

    /// Width of the vertex bounding box
    pub fn width(&self) -> f32 {
        self.max_x() - self.min_x()
    }

    /// Height of the vertex bounding box
    pub fn height(&self) -> f32 {
        self.max_y() - self.min_y()
    }

    /// Replace every vertex from a flat coordinate slice
    ///
    /// The vertex count may change.
    pub fn set_vertices(&mut self, coordinates: &[f32]) -> Result<(), GeomError> {
        let points = points_from_flat(coordinates)?;
        self.set_points(&points)
    }

    /// Replace every vertex
    pub fn set_points(&mut self, points: &[Point]) -> Result<(), GeomError> {
        validate_vertex_count(points.len())?;
        self.vertices.clear();
        self.vertices.extend_from_slice(points);
        Ok(())
    }

    /// Move the polygon so that vertex 0 sits at `x`
    pub fn set_x(&mut self, x: f32) {
        let dx = x - self.x();
        self.translate(dx, 0.0);
    }

    /// Move the polygon so that vertex 0 sits at `y`
    pub fn set_y(&mut self, y: f32) {
        let dy = y - self.y();
        self.translate(0.0, dy);
    }

    /// Move the polygon so that vertex 0 sits at `(x, y)`
    pub fn set_xy(&mut self, x: f32, y: f32) {
        let dx = x - self.x();
        let dy = y - self.y();
        self.translate(dx, dy);
    }

    /// Move every vertex by a delta
    pub fn translate(&mut self, dx: f32, dy: f32) {
        for vertex in &mut self.vertices {
            vertex.translate(dx, dy);
        }
    }

    /// Check if a point lies inside the polygon (even-odd rule)
    pub fn contains(&self, point: Point) -> bool {
        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

impl Lerp for Polygon {
    /// Vertex-wise interpolation
    ///
    /// When the vertex counts differ there is no meaningful blend, so the
    /// result snaps to `target`.
    fn lerp(&self, target: &Self, alpha: f32) -> Self {
        if self.vertices.len() != target.vertices.len() {
            return target.clone();
        }
        let vertices = self
            .vertices
            .iter()
            .zip(&target.vertices)
            .map(|(from, to)| from.lerp(to, alpha))
            .collect();
        Self { vertices }
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = GeomError;

    fn try_from(vertices: Vec<Point>) -> Result<Self, Self::Error> {
        validate_vertex_count(vertices.len())?;
        Ok(Self { vertices })
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

fn points_from_flat(coordinates: &[f32]) -> Result<Vec<Point>, GeomError> {
    if coordinates.len() % 2 != 0 {
        return Err(GeomError::OddCoordinateCount(coordinates.len()));
    }
    Ok(coordinates
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

fn validate_vertex_count(count: usize) -> Result<(), GeomError> {
    if count < 3 {
        return Err(GeomError::TooFewVertices(count));
    }
    Ok(())
}
