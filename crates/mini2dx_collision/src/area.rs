//! Uniform render-facing surface of collidables
//!
//! Render code that does not care which kind of collidable it holds can work
//! through these traits.

use crate::error::CollisionError;
use crate::tracker::Interpolatable;

/// A collidable with a position
pub trait CollisionObject: Interpolatable {
    /// Move to `(x, y)` with no interpolation lag
    ///
    /// Current, previous and render state all take the new position and the
    /// interpolation-required flag is cleared.
    fn force_to(&self, x: f32, y: f32) -> Result<(), CollisionError>;

    /// Rounded render X coordinate
    fn render_x(&self) -> i32;

    /// Rounded render Y coordinate
    fn render_y(&self) -> i32;
}

/// A collidable with a position and a size
pub trait CollisionArea: CollisionObject {
    /// Move and resize with no interpolation lag
    fn force_to_bounds(&self, x: f32, y: f32, width: f32, height: f32) -> Result<(), CollisionError>;

    /// Rounded render width
    fn render_width(&self) -> i32;

    /// Rounded render height
    fn render_height(&self) -> i32;
}
