//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`M2D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use mini2dx_collision::DEFAULT_TRACKER_CAPACITY;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fixed-step timing
    #[serde(default)]
    pub timing: TimingConfig,
    /// Interpolation tracker sizing
    #[serde(default)]
    pub tracker: TrackerConfig,
    /// Headless demo parameters
    #[serde(default)]
    pub demo: DemoConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // M2D_TIMING__STEPS_PER_SECOND=30 -> timing.steps_per_second = 30
        figment = figment.merge(Env::prefixed("M2D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Fixed-step timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Simulation steps per second
    pub steps_per_second: u32,
    /// Longest frame time fed to the accumulator, in seconds
    pub max_frame_time: f32,
}

impl TimingConfig {
    /// Length of one simulation step in seconds
    pub fn step_seconds(&self) -> f32 {
        1.0 / self.steps_per_second.max(1) as f32
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            steps_per_second: 60,
            max_frame_time: 0.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Registry slots reserved up front
    pub initial_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_TRACKER_CAPACITY,
        }
    }
}

/// Headless demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of boxes to simulate
    pub entity_count: usize,
    /// Horizontal speed in units per second
    pub speed: f32,
    /// Render frames to run before exiting
    pub frames: u32,
    /// Simulated display refresh rate
    pub render_rate: f32,
}

impl DemoConfig {
    /// Simulated time between two rendered frames
    pub fn frame_seconds(&self) -> f32 {
        1.0 / self.render_rate.max(1.0)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            entity_count: 4,
            speed: 48.0,
            frames: 240,
            render_rate: 144.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    source: Box<figment::Error>,
}

impl ConfigError {
    /// The underlying figment error, with the offending key and source
    pub fn figment_error(&self) -> &figment::Error {
        &self.source
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError { source: Box::new(e) }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.source)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.timing.steps_per_second, 60);
        assert_eq!(config.tracker.initial_capacity, DEFAULT_TRACKER_CAPACITY);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_step_seconds() {
        let timing = TimingConfig {
            steps_per_second: 50,
            ..TimingConfig::default()
        };
        assert!((timing.step_seconds() - 0.02).abs() < 1e-6);

        let zero = TimingConfig {
            steps_per_second: 0,
            ..TimingConfig::default()
        };
        assert_eq!(zero.step_seconds(), 1.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("steps_per_second"));
        assert!(toml.contains("initial_capacity"));
    }

    #[test]
    fn test_error_keeps_figment_source() {
        use std::error::Error;

        let result: Result<AppConfig, ConfigError> = Figment::new()
            .merge(Toml::string("[timing]\nsteps_per_second = \"fast\"\n"))
            .extract()
            .map_err(ConfigError::from);
        let err = result.unwrap_err();

        assert!(err.source().is_some());
        assert!(err.figment_error().path.iter().any(|key| key == "steps_per_second"));
        assert!(err.to_string().starts_with("Configuration error: "));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[timing]\nsteps_per_second = 30\n").unwrap();
        assert_eq!(config.timing.steps_per_second, 30);
        assert_eq!(config.timing.max_frame_time, 0.25);
        assert_eq!(config.demo.entity_count, 4);
    }
}
