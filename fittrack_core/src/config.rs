//! Configuration file support for FitTrack.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fittrack/config.toml`.
//! It seeds the starting profile and tunes the simulated feeds. The file is
//! only written by `fittrack init-config`; nothing a session changes is ever
//! written back.

use crate::analysis::DEFAULT_ANALYSIS_DELAY;
use crate::calorie_math::{DEFAULT_STRIDE_LENGTH_M, DEFAULT_WEIGHT_KG};
use crate::settings::ValidatedSettings;
use crate::step_feed::{StepDetector, DEFAULT_STEP_THRESHOLD, DEFAULT_UPDATE_INTERVAL};
use crate::types::{
    FitnessGoals, FitnessState, PositiveReal, DEFAULT_DAILY_CALORIES, DEFAULT_DAILY_STEPS,
    DEFAULT_TARGET_WEIGHT_KG,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub goals: GoalsConfig,

    #[serde(default)]
    pub sensor: SensorConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Starting body measurements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_weight_kg")]
    pub weight_kg: f64,

    #[serde(default = "default_stride_length_m")]
    pub stride_length_m: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            weight_kg: default_weight_kg(),
            stride_length_m: default_stride_length_m(),
        }
    }
}

/// Starting goals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_daily_steps")]
    pub daily_steps: u32,

    #[serde(default = "default_daily_calories")]
    pub daily_calories: u32,

    #[serde(default = "default_target_weight_kg")]
    pub target_weight_kg: f64,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            daily_steps: default_daily_steps(),
            daily_calories: default_daily_calories(),
            target_weight_kg: default_target_weight_kg(),
        }
    }
}

/// Step sensor tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorConfig {
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    #[serde(default = "default_step_threshold")]
    pub step_threshold: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            step_threshold: default_step_threshold(),
        }
    }
}

impl SensorConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    pub fn detector(&self) -> StepDetector {
        StepDetector {
            threshold: self.step_threshold,
        }
    }
}

/// Mock meal analysis tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_analysis_delay_ms")]
    pub delay_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_analysis_delay_ms(),
        }
    }
}

impl AnalysisConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

// Default value functions
fn default_weight_kg() -> f64 {
    DEFAULT_WEIGHT_KG
}

fn default_stride_length_m() -> f64 {
    DEFAULT_STRIDE_LENGTH_M
}

fn default_daily_steps() -> u32 {
    DEFAULT_DAILY_STEPS.get()
}

fn default_daily_calories() -> u32 {
    DEFAULT_DAILY_CALORIES.get()
}

fn default_target_weight_kg() -> f64 {
    DEFAULT_TARGET_WEIGHT_KG
}

fn default_update_interval_ms() -> u64 {
    DEFAULT_UPDATE_INTERVAL.as_millis() as u64
}

fn default_step_threshold() -> f64 {
    DEFAULT_STEP_THRESHOLD
}

fn default_analysis_delay_ms() -> u64 {
    DEFAULT_ANALYSIS_DELAY.as_millis() as u64
}

fn positive(value: f64, field: &str) -> Result<PositiveReal> {
    PositiveReal::new(value)
        .ok_or_else(|| Error::Config(format!("{} must be a positive number, got {}", field, value)))
}

fn non_zero(value: u32, field: &str) -> Result<NonZeroU32> {
    NonZeroU32::new(value).ok_or_else(|| Error::Config(format!("{} must be at least 1", field)))
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from(".config"))
        });
        base.join("fittrack").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Take profile and goals from a saved settings form
    pub fn apply_settings(&mut self, settings: &ValidatedSettings) {
        self.profile.weight_kg = settings.weight.get();
        self.profile.stride_length_m = settings.stride_length.get();
        self.goals.daily_steps = settings.daily_steps_goal.get();
        self.goals.daily_calories = settings.daily_calorie_goal.get();
        self.goals.target_weight_kg = settings.target_weight.get();
    }

    /// Reject values the store would never accept
    pub fn validate(&self) -> Result<()> {
        self.initial_state().map(|_| ())?;
        if !(self.sensor.step_threshold.is_finite() && self.sensor.step_threshold > 0.0) {
            return Err(Error::Config(format!(
                "sensor.step_threshold must be a positive number, got {}",
                self.sensor.step_threshold
            )));
        }
        if self.sensor.update_interval_ms == 0 {
            return Err(Error::Config(
                "sensor.update_interval_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The state a new session starts from
    pub fn initial_state(&self) -> Result<FitnessState> {
        let goals = FitnessGoals {
            daily_steps: non_zero(self.goals.daily_steps, "goals.daily_steps")?,
            daily_calories: non_zero(self.goals.daily_calories, "goals.daily_calories")?,
            target_weight: positive(self.goals.target_weight_kg, "goals.target_weight_kg")?,
        };

        Ok(FitnessState::new(
            positive(self.profile.weight_kg, "profile.weight_kg")?,
            positive(self.profile.stride_length_m, "profile.stride_length_m")?,
            goals,
        ))
    }
}
