//! Workout routine assembly.
//!
//! Turns a [`Selection`] into the routine structure handed back to clients:
//! one entry per exercise with default sets, reps and rest, plus a short
//! display summary of the exercise.

use crate::config::RoutineConfig;
use crate::{Exercise, Selection};
use serde::{Deserialize, Serialize};

/// Broad routine category derived from the training goal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoutineCategory {
    Strength,
    Cardio,
}

impl RoutineCategory {
    pub fn for_goal(goal: &str) -> Self {
        match goal {
            "cardio" | "endurance" => RoutineCategory::Cardio,
            _ => RoutineCategory::Strength,
        }
    }
}

/// What the user asked for, as received from the request layer
#[derive(Clone, Debug)]
pub struct RoutineParams {
    pub goal: String,
    /// Targets as the user typed them, used for the description
    pub target_muscle_groups: Vec<String>,
    pub duration_minutes: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSummary {
    pub exercise_id: String,
    pub name: String,
    pub name_ko: Option<String>,
    pub video: Option<String>,
    pub thumbnail: Option<String>,
    pub icon: Option<String>,
    pub primary_muscle: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub difficulty_level: String,
}

impl From<&Exercise> for ExerciseSummary {
    fn from(exercise: &Exercise) -> Self {
        let info = &exercise.info;
        Self {
            exercise_id: exercise.id.clone(),
            name: info.name.clone(),
            name_ko: info.name_ko.clone(),
            video: info.video_path.clone(),
            thumbnail: info.thumbnail_path.clone(),
            icon: info.icon_path.clone(),
            primary_muscle: info
                .primary_muscle
                .clone()
                .unwrap_or_else(|| "full-body".into()),
            exercise_type: info
                .exercise_type
                .clone()
                .unwrap_or_else(|| "strength".into()),
            difficulty_level: info
                .difficulty_level
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_else(|| "intermediate".into()),
        }
    }
}

/// One exercise slot in a routine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutineExercise {
    pub exercise_id: String,
    pub order_index: usize,
    pub sets: u32,
    pub reps: u32,
    /// Seconds
    pub rest_time: u32,
    pub notes: String,
    pub exercise: ExerciseSummary,
}

/// A generated workout routine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRoutine {
    pub name: String,
    pub description: String,
    pub estimated_duration: u32,
    pub category: RoutineCategory,
    pub difficulty_level: String,
    pub is_public: bool,
    pub is_favorite: bool,
    pub exercises: Vec<RoutineExercise>,
}

/// Number of exercises that fit in a session of `duration_minutes`
pub fn exercise_count_for_duration(duration_minutes: u32, config: &RoutineConfig) -> usize {
    let fitted = (duration_minutes / config.minutes_per_exercise.max(1)) as usize;
    fitted.max(config.min_exercises)
}

/// Wrap a selection into a routine with default prescriptions
pub fn build_routine(
    selection: &Selection,
    params: &RoutineParams,
    config: &RoutineConfig,
) -> WorkoutRoutine {
    let focus = if params.target_muscle_groups.is_empty() {
        "Full Body".to_string()
    } else {
        params.target_muscle_groups.join(", ")
    };

    let exercises = selection
        .exercises
        .iter()
        .enumerate()
        .map(|(order_index, exercise)| RoutineExercise {
            exercise_id: exercise.id.clone(),
            order_index,
            sets: config.sets,
            reps: config.reps,
            rest_time: config.rest_seconds,
            notes: exercise.info.tips_ko.first().cloned().unwrap_or_default(),
            exercise: ExerciseSummary::from(exercise),
        })
        .collect();

    WorkoutRoutine {
        name: format!("AI Generated {} Workout", params.goal),
        description: format!("Focus on {}", focus),
        estimated_duration: params.duration_minutes,
        category: RoutineCategory::for_goal(&params.goal),
        difficulty_level: "intermediate".into(),
        is_public: false,
        is_favorite: false,
        exercises,
    }
}
