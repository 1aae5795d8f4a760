//! Headless interpolation demo
//!
//! Moves a row of boxes and a hexagon at a fixed step rate while "rendering"
//! at the configured display rate, logging the interpolated render coordinates.

use std::sync::Arc;

use mini2dx::config::AppConfig;
use mini2dx::systems::FrameLoop;
use mini2dx_collision::{
    CollisionArea, CollisionBox, CollisionError, CollisionObject, CollisionPolygon, InterpolationTracker,
};

/// Boxes wrap back to the left edge past this X coordinate
const WORLD_WIDTH: f32 = 320.0;

struct Demo {
    tracker: Arc<InterpolationTracker>,
    boxes: Vec<Arc<CollisionBox>>,
    hexagon: Arc<CollisionPolygon>,
    speed: f32,
}

impl Demo {
    fn new(config: &AppConfig) -> Self {
        let tracker = Arc::new(InterpolationTracker::with_capacity(config.tracker.initial_capacity));
        let boxes = (0..config.demo.entity_count)
            .map(|i| CollisionBox::new(&tracker, 0.0, i as f32 * 24.0, 16.0, 16.0))
            .collect();
        let hexagon = CollisionPolygon::hexagon(&tracker, 160.0, 120.0, 12.0);

        Self {
            tracker,
            boxes,
            hexagon,
            speed: config.demo.speed,
        }
    }

    fn step(&self, dt: f32) -> Result<(), CollisionError> {
        let distance = self.speed * dt;
        for b in &self.boxes {
            if b.x() + distance > WORLD_WIDTH {
                // Teleport without a streak across the screen
                b.force_to(0.0, b.y())?;
            } else {
                b.translate(distance, 0.0)?;
            }
        }
        self.hexagon.translate(0.0, distance * 0.5)?;
        Ok(())
    }

    fn render(&self, frame: u32) {
        for b in &self.boxes {
            log::debug!(
                "frame {} box {} at ({}, {}) size {}x{}",
                frame,
                b.id(),
                b.render_x(),
                b.render_y(),
                b.render_width(),
                b.render_height()
            );
        }
        log::debug!(
            "frame {} hexagon {} at ({}, {})",
            frame,
            self.hexagon.id(),
            self.hexagon.render_x(),
            self.hexagon.render_y()
        );
    }

    fn shutdown(&self) {
        for b in &self.boxes {
            b.dispose();
        }
        self.hexagon.dispose();
        self.tracker.deregister_all();
    }
}

fn main() {
    let config = AppConfig::load();

    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting mini2Dx interpolation demo");

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let demo = Demo::new(&config);
    let mut frame_loop = FrameLoop::from_config(&config.timing);
    let frame_dt = config.demo.frame_seconds();
    log::info!(
        "Tracking {} collidables, {} steps/s, rendering at {} fps",
        demo.tracker.len(),
        config.timing.steps_per_second,
        config.demo.render_rate
    );

    for frame in 0..config.demo.frames {
        let result = frame_loop.frame(&demo.tracker, frame_dt, |dt| {
            if let Err(e) = demo.step(dt) {
                log::warn!("Simulation step failed: {}", e);
            }
        });
        if result.steps > 0 {
            log::trace!("frame {} alpha {:.3}", frame, result.alpha);
        }
        demo.render(frame);
    }

    if let Some(first) = demo.boxes.first() {
        log::info!(
            "Finished after {} steps, first box rendered at ({}, {})",
            frame_loop.total_steps(),
            first.render_x(),
            first.render_y()
        );
    }
    demo.shutdown();
}
