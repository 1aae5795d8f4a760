//! Shared shape behaviour
//!
//! Shapes here are pure geometric data - no identity, listeners or render state.
//! Those live in the collision crate, which wraps these primitives.

/// Component-wise linear interpolation between two states of a shape
pub trait Lerp {
    /// Blend from `self` towards `target`
    ///
    /// `alpha = 0.0` yields `self`, `alpha = 1.0` yields `target`.
    fn lerp(&self, target: &Self, alpha: f32) -> Self;
}

/// Round a coordinate to the nearest whole pixel
///
/// Halves round up (towards positive infinity), so `-0.5` rounds to `0`
/// and `2.5` rounds to `3`.
#[inline]
pub fn round_to_pixel(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}
