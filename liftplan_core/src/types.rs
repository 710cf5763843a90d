//! Core domain types for the Liftplan system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and their catalog
//! - Selection requests and results
//! - Training logs, load requests and load results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Equipment tag for movements performed without external load.
///
/// Also substituted as the only available equipment when a user owns none.
pub const BODY_WEIGHT: &str = "body-weight";

// ============================================================================
// Exercise Types
// ============================================================================

/// Movement mechanics of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mechanics {
    Compound,
    Isolation,
    #[default]
    #[serde(other)]
    Other,
}

impl Mechanics {
    /// Parse a free-form mechanics column; anything unrecognised is `Other`
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("compound") => Mechanics::Compound,
            Some("isolation") => Mechanics::Isolation,
            _ => Mechanics::Other,
        }
    }

    pub fn is_compound(self) -> bool {
        self == Mechanics::Compound
    }
}

/// Display payload carried through selection untouched
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ExerciseInfo {
    pub name: String,
    pub name_ko: Option<String>,
    pub video_path: Option<String>,
    pub thumbnail_path: Option<String>,
    pub icon_path: Option<String>,
    #[serde(default)]
    pub tips_ko: Vec<String>,
    pub primary_muscle: Option<String>,
    pub exercise_type: Option<String>,
    pub difficulty_level: Option<String>,
}

/// A candidate exercise from the catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    #[serde(default)]
    pub mechanics: Mechanics,
    pub equipment_required: BTreeSet<String>,
    #[serde(default)]
    pub muscle_groups: BTreeSet<String>,
    pub popularity_score: Option<f64>,
    #[serde(default)]
    pub info: ExerciseInfo,
}

impl Exercise {
    /// Create an exercise with no equipment, muscles or score
    pub fn new(id: impl Into<String>, name: impl Into<String>, mechanics: Mechanics) -> Self {
        Self {
            id: id.into(),
            mechanics,
            equipment_required: BTreeSet::new(),
            muscle_groups: BTreeSet::new(),
            popularity_score: None,
            info: ExerciseInfo {
                name: name.into(),
                ..ExerciseInfo::default()
            },
        }
    }

    pub fn with_equipment<I, S>(mut self, equipment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment_required
            .extend(equipment.into_iter().map(Into::into));
        self
    }

    pub fn with_muscles<I, S>(mut self, muscles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.muscle_groups.extend(muscles.into_iter().map(Into::into));
        self
    }

    pub fn with_popularity(mut self, score: f64) -> Self {
        self.popularity_score = Some(score);
        self
    }

    /// Popularity used for ranking; absent scores rank as zero
    pub fn popularity(&self) -> f64 {
        self.popularity_score.unwrap_or(0.0)
    }

    /// True when the only equipment this exercise needs is the lifter's body
    pub fn is_body_weight(&self) -> bool {
        self.equipment_required.len() == 1 && self.equipment_required.contains(BODY_WEIGHT)
    }

    /// Single equipment tag used for load recommendations
    ///
    /// Body-weight-only exercises resolve to [`BODY_WEIGHT`]; otherwise the
    /// first external-load tag in sorted order is used.
    pub fn equipment_tag(&self) -> Option<&str> {
        if self.is_body_weight() {
            return Some(BODY_WEIGHT);
        }
        self.equipment_required
            .iter()
            .map(String::as_str)
            .find(|tag| *tag != BODY_WEIGHT)
    }
}

/// An ordered collection of candidate exercises
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
}

impl Catalog {
    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }
}

// ============================================================================
// Selection Types
// ============================================================================

/// What the user wants a routine built from
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionRequest {
    pub available_equipment: BTreeSet<String>,
    /// Lowercase muscle tags; empty means no muscle filter
    pub target_muscle_groups: BTreeSet<String>,
    pub count: usize,
}

/// Which candidate pool a selection was drawn from
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PoolTier {
    /// Equipment and muscle filters both applied
    Matched,
    /// Muscle filter relaxed, equipment filter kept
    EquipmentOnly,
    /// All filters dropped
    Unfiltered,
}

/// Ordered exercises chosen for a routine
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Compounds first, then everything else
    pub exercises: Vec<Exercise>,
    pub tier: PoolTier,
}

// ============================================================================
// Load Types
// ============================================================================

/// One logged training entry; index `i` of both vectors forms one set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseLogEntry {
    pub weight_used: Vec<f64>,
    pub reps_completed: Vec<f64>,
    pub created_at: DateTime<Utc>,
}

impl ExerciseLogEntry {
    /// Iterate `(weight, reps)` pairs
    pub fn sets(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.weight_used
            .iter()
            .copied()
            .zip(self.reps_completed.iter().copied())
    }
}

/// Stored user profile data relevant to load recommendations
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct UserProfile {
    pub id: String,
    /// Declared one-rep maxes keyed by exercise name
    #[serde(default)]
    pub one_rep_max: BTreeMap<String, f64>,
}

/// Inputs for a working-weight recommendation
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    pub known_one_rep_max: Option<f64>,
    /// Most recent first
    pub recent_logs: Vec<ExerciseLogEntry>,
    pub equipment_type: String,
    pub target_reps: u32,
}

/// How a recommendation was derived
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoadMethod {
    #[serde(rename = "known_1rm")]
    KnownOneRepMax,
    #[serde(rename = "estimated_from_history")]
    EstimatedFromHistory,
    #[serde(rename = "bodyweight_default")]
    BodyweightDefault,
    #[serde(rename = "default_beginner")]
    DefaultBeginner,
}

impl LoadMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadMethod::KnownOneRepMax => "known_1rm",
            LoadMethod::EstimatedFromHistory => "estimated_from_history",
            LoadMethod::BodyweightDefault => "bodyweight_default",
            LoadMethod::DefaultBeginner => "default_beginner",
        }
    }
}

/// A recommended working weight
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoadResult {
    pub recommended_weight: f64,
    pub estimated_one_rep_max: f64,
    pub method: LoadMethod,
}
