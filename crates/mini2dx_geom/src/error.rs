//! Geometry error types

use std::fmt;

/// Error type for malformed geometry input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeomError {
    /// A flat coordinate slice had an odd number of values
    OddCoordinateCount(usize),
    /// A polygon needs at least three vertices
    TooFewVertices(usize),
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeomError::OddCoordinateCount(count) => {
                write!(f, "Expected x/y coordinate pairs, got {} values", count)
            }
            GeomError::TooFewVertices(count) => {
                write!(f, "Polygon needs at least 3 vertices, got {}", count)
            }
        }
    }
}

impl std::error::Error for GeomError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_count_display() {
        let msg = GeomError::OddCoordinateCount(5).to_string();
        assert!(msg.contains("pairs"));
        assert!(msg.contains('5'));
    }

    #[test]
    fn test_too_few_vertices_display() {
        let msg = GeomError::TooFewVertices(2).to_string();
        assert!(msg.contains("at least 3"));
        assert!(msg.contains('2'));
    }
}
