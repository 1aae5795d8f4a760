//! mini2Dx interpolation demo host
//!
//! Configuration and a fixed-step frame loop built on
//! [`mini2dx_collision`].

pub mod config;
pub mod systems;
