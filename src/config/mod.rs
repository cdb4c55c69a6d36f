pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::game::{GRAVITY_INTERVAL, POINTS_PER_LINE};
use loader::ConfigError;

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub driver: DriverConfig,
}

/// Rules of a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravity_interval_secs: f32,
    pub points_per_line: u32,
    pub restart_on_game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity_interval_secs: GRAVITY_INTERVAL.as_secs_f32(),
            points_per_line: POINTS_PER_LINE,
            restart_on_game_over: false,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Gravity interval as a `Duration`, falling back to the default for unusable values.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.gravity_interval_secs)
            .ok()
            .filter(|interval| !interval.is_zero())
            .unwrap_or(GRAVITY_INTERVAL)
    }
}

/// Settings for the headless autopilot binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub duration_secs: f32,
    pub tick_millis: u64,
    pub command_chance: f32,
    pub realtime: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            duration_secs: 120.0,
            tick_millis: 16,
            command_chance: 0.3,
            realtime: false,
        }
    }
}

impl Config {
    /// Copy of the process-wide configuration.
    #[must_use]
    pub fn current() -> Self {
        CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the process-wide configuration.
    pub fn install(config: Config) {
        *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    // Force reload the configuration from file
    pub fn force_reload() -> bool {
        match loader::load_config_from_file() {
            Ok(new_config) => {
                Self::install(new_config);
                true
            }
            Err(e) => {
                log::warn!("Keeping previous configuration: {e}");
                false
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if !sim.gravity_interval_secs.is_finite() || sim.gravity_interval_secs <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "simulation.gravity_interval_secs must be a positive number, got {}",
                sim.gravity_interval_secs
            )));
        }

        // TOML integers are signed 64-bit
        if let Some(seed) = sim.seed.filter(|&seed| i64::try_from(seed).is_err()) {
            return Err(ConfigError::Invalid(format!(
                "simulation.seed must be at most {}, got {seed}",
                i64::MAX
            )));
        }

        let driver = &self.driver;
        if Duration::try_from_secs_f32(driver.duration_secs).is_err() || driver.duration_secs <= 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "driver.duration_secs must be a positive, representable number of seconds, got {}",
                driver.duration_secs
            )));
        }
        if driver.tick_millis == 0 {
            return Err(ConfigError::Invalid(
                "driver.tick_millis must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&driver.command_chance) {
            return Err(ConfigError::Invalid(format!(
                "driver.command_chance must be within 0..=1, got {}",
                driver.command_chance
            )));
        }
        Ok(())
    }
}
