//! Regular hexagons
//!
//! A hexagon where all interior angles are 120 degrees, described by its center
//! and the distance from the center to each corner.

use serde::{Serialize, Deserialize};

use crate::{Point, Polygon};

/// A regular hexagon
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegularHexagon {
    /// Center of the hexagon
    pub center: Point,
    /// Distance from the center to the corner points
    pub radius: f32,
    /// Rotation of vertex 0 in degrees
    pub rotation: f32,
}

impl RegularHexagon {
    /// Rotating by this many degrees maps the hexagon onto itself
    pub const ROTATION_SYMMETRY: f32 = 60.0;
    pub const TOTAL_SIDES: usize = 6;

    pub fn new(center_x: f32, center_y: f32, radius: f32) -> Self {
        Self {
            center: Point::new(center_x, center_y),
            radius,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees % Self::ROTATION_SYMMETRY;
        self
    }

    /// Build the vertex representation
    pub fn to_polygon(&self) -> Polygon {
        let step = Self::ROTATION_SYMMETRY.to_radians();
        let vertices: Vec<Point> = (0..Self::TOTAL_SIDES)
            .map(|i| {
                let angle = self.rotation.to_radians() + step * i as f32;
                Point::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                )
            })
            .collect();
        Polygon::from_vertices_unchecked(vertices)
    }
}

impl From<RegularHexagon> for Polygon {
    fn from(hexagon: RegularHexagon) -> Self {
        hexagon.to_polygon()
    }
}
