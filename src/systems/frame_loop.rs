//! Fixed-step frame loop
//!
//! Runs the simulation at a fixed step rate and renders at whatever rate
//! frames arrive. Each frame:
//! 1. Clamp the frame time and add it to the accumulator
//! 2. For every whole step due: `tracker.pre_update()`, then the step callback
//! 3. One `tracker.interpolate(alpha)` with the leftover step fraction

use mini2dx_collision::InterpolationTracker;

use crate::config::TimingConfig;

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_frame_time: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Create an accumulator for steps of `step` seconds
    ///
    /// Frame times above `max_frame_time` are clamped so a stall does not
    /// queue an unbounded number of steps.
    pub fn new(step: f32, max_frame_time: f32) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            max_frame_time: max_frame_time.max(0.0),
            accumulator: 0.0,
        }
    }

    pub fn from_config(config: &TimingConfig) -> Self {
        Self::new(config.step_seconds(), config.max_frame_time)
    }

    /// Step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many steps are now due
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, self.max_frame_time);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Progress through the next step, in `[0, 1]`
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}

/// What a single [`FrameLoop::frame`] call did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    /// Simulation steps run this frame
    pub steps: u32,
    /// Alpha passed to `interpolate`
    pub alpha: f32,
}

/// Drives an [`InterpolationTracker`] through the frame protocol
#[derive(Debug, Clone)]
pub struct FrameLoop {
    timestep: FixedTimestep,
    total_steps: u64,
}

impl FrameLoop {
    pub fn new(timestep: FixedTimestep) -> Self {
        Self {
            timestep,
            total_steps: 0,
        }
    }

    pub fn from_config(config: &TimingConfig) -> Self {
        Self::new(FixedTimestep::from_config(config))
    }

    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    /// Steps run since creation
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Run one rendered frame
    ///
    /// `step_fn` receives the fixed step length and performs the simulation
    /// mutations for that step.
    pub fn frame<F>(&mut self, tracker: &InterpolationTracker, frame_dt: f32, mut step_fn: F) -> FrameResult
    where
        F: FnMut(f32),
    {
        let steps = self.timestep.advance(frame_dt);
        let dt = self.timestep.step();
        for _ in 0..steps {
            tracker.pre_update();
            step_fn(dt);
        }
        self.total_steps += u64::from(steps);

        let alpha = self.timestep.alpha();
        tracker.interpolate(alpha);
        log::trace!("Frame ran {} steps, alpha {:.3}", steps, alpha);

        FrameResult { steps, alpha }
    }
}
