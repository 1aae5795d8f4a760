//! Collision identity
//!
//! Every collidable gets an integer id at construction. Ids define equality
//! and hashing of collidables, independent of their geometry.

use std::sync::atomic::{AtomicI32, Ordering};

/// Identifier of a collidable
pub type CollisionId = i32;

static NEXT_ID: AtomicI32 = AtomicI32::new(0);

/// Process-wide generator for collidable ids
///
/// Ids increase strictly for the lifetime of the process and are safe to
/// draw from any thread. The sequence wraps around at `i32::MAX`.
pub struct CollisionIdSequence;

impl CollisionIdSequence {
    /// Draw the next id
    #[inline]
    pub fn next_id() -> CollisionId {
        // fetch_add wraps on overflow
        NEXT_ID.fetch_add(1, Ordering::Relaxed)
    }
}
