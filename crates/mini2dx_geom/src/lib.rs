//! 2D Geometry Primitives
//!
//! This crate provides the plain shape values that mini2Dx collision types wrap.
//!
//! ## Core Types
//!
//! - [`Point`] - 2D point with x, y components
//! - [`Rectangle`] - Axis-aligned box with position and size
//! - [`Polygon`] - Vertex-defined polygon (position = vertex 0)
//! - [`RegularHexagon`] - Center/radius description of a hexagon
//!
//! ## Shape Behaviour
//!
//! - [`Lerp`] - Component-wise linear interpolation between two shape states
//! - [`round_to_pixel`] - Rounding used for render coordinates

mod point;
mod rectangle;
pub mod error;
pub mod shape;
pub mod polygon;
pub mod hexagon;

pub use point::Point;
pub use rectangle::Rectangle;
pub use error::GeomError;
pub use shape::{Lerp, round_to_pixel};
pub use polygon::Polygon;
pub use hexagon::RegularHexagon;
