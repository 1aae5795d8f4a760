//! Collision error types

use std::fmt;

use mini2dx_geom::GeomError;

use crate::id::CollisionId;

/// Error type for collidable operations
///
/// Every variant signals a broken caller contract; none of them is a
/// condition worth retrying.
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// The operation does not apply to this kind of collidable
    UnsupportedOperation(&'static str),
    /// The collidable was disposed and must not be used again
    Disposed(CollisionId),
    /// Malformed geometry was supplied
    Geometry(GeomError),
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionError::UnsupportedOperation(op) => write!(f, "Unsupported operation: {}", op),
            CollisionError::Disposed(id) => write!(f, "Collidable {} has been disposed", id),
            CollisionError::Geometry(err) => write!(f, "Invalid geometry: {}", err),
        }
    }
}

impl std::error::Error for CollisionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollisionError::Geometry(err) => Some(err),
            CollisionError::UnsupportedOperation(_) => None,
            CollisionError::Disposed(_) => None,
        }
    }
}

impl From<GeomError> for CollisionError {
    fn from(err: GeomError) -> Self {
        CollisionError::Geometry(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unsupported_display() {
        let err = CollisionError::UnsupportedOperation("force_to_bounds on CollisionPolygon");
        let msg = err.to_string();
        assert!(msg.contains("Unsupported"));
        assert!(msg.contains("CollisionPolygon"));
    }

    #[test]
    fn test_disposed_display() {
        let msg = CollisionError::Disposed(42).to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("disposed"));
    }

    #[test]
    fn test_from_geom_error() {
        let err: CollisionError = GeomError::TooFewVertices(2).into();
        assert_eq!(err, CollisionError::Geometry(GeomError::TooFewVertices(2)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source() {
        assert!(CollisionError::Disposed(1).source().is_none());
        assert!(CollisionError::UnsupportedOperation("x").source().is_none());
    }
}
