//! Application systems
//!
//! Host-side systems that drive the collision crate.

mod frame_loop;

pub use frame_loop::{FixedTimestep, FrameLoop, FrameResult};
