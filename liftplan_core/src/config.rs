//! Configuration file support for Liftplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftplan/config.toml`.
//! The selection and load algorithms never read it themselves; callers pass
//! the relevant section in explicitly.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub load: LoadConfig,

    #[serde(default)]
    pub routine: RoutineConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// How an exercise's required equipment is matched against what the user owns
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentMatch {
    /// At least one required tag is available
    #[default]
    Any,
    /// Every required tag is available
    All,
}

/// Exercise selection parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Share of the routine reserved for compound movements
    #[serde(default = "default_compound_ratio")]
    pub compound_ratio: f64,

    /// Pool cap when the muscle filter is relaxed
    #[serde(default = "default_equipment_fallback_limit")]
    pub equipment_fallback_limit: usize,

    /// Pool cap when every filter is dropped
    #[serde(default = "default_absolute_fallback_limit")]
    pub absolute_fallback_limit: usize,

    #[serde(default)]
    pub equipment_match: EquipmentMatch,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            compound_ratio: default_compound_ratio(),
            equipment_fallback_limit: default_equipment_fallback_limit(),
            absolute_fallback_limit: default_absolute_fallback_limit(),
            equipment_match: EquipmentMatch::default(),
        }
    }
}

/// Load recommendation parameters
///
/// All weights are in kilograms.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_rounding_increment")]
    pub rounding_increment: f64,

    /// Weight suggested when there is no 1RM and no usable history
    #[serde(default = "default_beginner_default")]
    pub beginner_default: f64,

    /// Number of most recent log entries considered
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    #[serde(default = "default_target_reps")]
    pub default_target_reps: u32,

    #[serde(default = "default_unit")]
    pub unit: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            rounding_increment: default_rounding_increment(),
            beginner_default: default_beginner_default(),
            history_window: default_history_window(),
            default_target_reps: default_target_reps(),
            unit: default_unit(),
        }
    }
}

/// Routine assembly parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoutineConfig {
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,

    #[serde(default = "default_minutes_per_exercise")]
    pub minutes_per_exercise: u32,

    #[serde(default = "default_min_exercises")]
    pub min_exercises: usize,

    #[serde(default = "default_sets")]
    pub sets: u32,

    #[serde(default = "default_reps")]
    pub reps: u32,

    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,

    #[serde(default = "default_goal")]
    pub default_goal: String,
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
            minutes_per_exercise: default_minutes_per_exercise(),
            min_exercises: default_min_exercises(),
            sets: default_sets(),
            reps: default_reps(),
            rest_seconds: default_rest_seconds(),
            default_goal: default_goal(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("liftplan")
}

fn default_compound_ratio() -> f64 {
    0.4
}

fn default_equipment_fallback_limit() -> usize {
    20
}

fn default_absolute_fallback_limit() -> usize {
    10
}

fn default_rounding_increment() -> f64 {
    2.5
}

fn default_beginner_default() -> f64 {
    20.0
}

fn default_history_window() -> usize {
    5
}

fn default_target_reps() -> u32 {
    10
}

fn default_unit() -> String {
    "kg".into()
}

fn default_duration_minutes() -> u32 {
    60
}

fn default_minutes_per_exercise() -> u32 {
    10
}

fn default_min_exercises() -> usize {
    3
}

fn default_sets() -> u32 {
    3
}

fn default_reps() -> u32 {
    10
}

fn default_rest_seconds() -> u32 {
    60
}

fn default_goal() -> String {
    "muscle_building".into()
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
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("liftplan")
            .join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the algorithms cannot work with
    pub fn validate(&self) -> Result<()> {
        let s = &self.selection;
        if !(s.compound_ratio > 0.0 && s.compound_ratio <= 1.0) {
            return Err(Error::Config(format!(
                "selection.compound_ratio must be in (0, 1], got {}",
                s.compound_ratio
            )));
        }
        if s.equipment_fallback_limit == 0 || s.absolute_fallback_limit == 0 {
            return Err(Error::Config(
                "selection fallback limits must be at least 1".into(),
            ));
        }

        let l = &self.load;
        if !(l.rounding_increment > 0.0 && l.rounding_increment.is_finite()) {
            return Err(Error::Config(format!(
                "load.rounding_increment must be positive, got {}",
                l.rounding_increment
            )));
        }
        if !(l.beginner_default >= 0.0 && l.beginner_default.is_finite()) {
            return Err(Error::Config(format!(
                "load.beginner_default must be non-negative, got {}",
                l.beginner_default
            )));
        }
        if l.history_window == 0 || l.default_target_reps == 0 {
            return Err(Error::Config(
                "load.history_window and load.default_target_reps must be at least 1".into(),
            ));
        }

        let r = &self.routine;
        if r.minutes_per_exercise == 0 || r.min_exercises == 0 {
            return Err(Error::Config(
                "routine.minutes_per_exercise and routine.min_exercises must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
