//! Axis-aligned rectangle

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::shape::Lerp;
use crate::Point;

/// An axis-aligned rectangle defined by its top-left corner and size
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    /// Create a new rectangle
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A 1x1 rectangle at the origin
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Overwrite every component
    pub fn set(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Move the rectangle by a delta
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Top-left corner
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Center of the rectangle
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Check if a point is inside or on the edge of the rectangle
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.max_x()
            && point.y >= self.y
            && point.y <= self.max_y()
    }

    /// Check if two rectangles overlap
    ///
    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x < other.max_x()
            && self.max_x() > other.x
            && self.y < other.max_y()
            && self.max_y() > other.y
    }
}

impl Lerp for Rectangle {
    fn lerp(&self, target: &Self, alpha: f32) -> Self {
        Self::new(
            self.x + (target.x - self.x) * alpha,
            self.y + (target.y - self.y) * alpha,
            self.width + (target.width - self.width) * alpha,
            self.height + (target.height - self.height) * alpha,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters() {
        let mut rect = Rectangle::unit();
        rect.set_position(2.0, 3.0);
        rect.set_size(4.0, 5.0);
        assert_eq!(rect, Rectangle::new(2.0, 3.0, 4.0, 5.0));

        rect.set(0.0, 0.0, 1.0, 1.0);
        assert_eq!(rect, Rectangle::unit());
    }

    #[test]
    fn test_translate() {
        let mut rect = Rectangle::new(1.0, 1.0, 2.0, 2.0);
        rect.translate(-1.0, 4.0);
        assert_eq!(rect.position(), Point::new(0.0, 5.0));
        assert_eq!(rect.width, 2.0);
    }

    #[test]
    fn test_center() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 4.0);
        assert_eq!(rect.center(), Point::new(5.0, 2.0));
    }

    #[test]
    fn test_contains() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(rect.contains(Point::new(10.0, 10.0))); // corner
        assert!(!rect.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn test_intersects() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(5.0, 5.0, 10.0, 10.0);
        let c = Rectangle::new(10.0, 0.0, 5.0, 5.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c)); // shared edge only
    }

    #[test]
    fn test_lerp() {
        let from = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let to = Rectangle::new(10.0, 0.0, 20.0, 10.0);
        assert_eq!(from.lerp(&to, 0.5), Rectangle::new(5.0, 0.0, 15.0, 10.0));
        assert_eq!(from.lerp(&to, 1.0), to);
    }
}
