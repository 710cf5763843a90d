//! Local JSON data store.
//!
//! Reads exported table rows from the data directory and narrows them into
//! the typed core model:
//! - `exercises.json`
//! - `user_equipment.json`
//! - `user_profiles.json`
//! - `exercise_logs.json`
//!
//! A missing file means the table has no rows. A file that exists but
//! cannot be parsed is an error.

use chrono::{DateTime, Utc};
use liftplan_core::{
    Error, Exercise, ExerciseInfo, ExerciseLogEntry, Mechanics, Result, UserProfile,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const EXERCISES_FILE: &str = "exercises.json";
const EQUIPMENT_FILE: &str = "user_equipment.json";
const PROFILES_FILE: &str = "user_profiles.json";
const LOGS_FILE: &str = "exercise_logs.json";

/// Single tag or list of tags
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(tag) => vec![tag],
            OneOrMany::Many(tags) => tags,
        }
    }
}

/// Row format of the exercise table
#[derive(Debug, Deserialize)]
struct ExerciseRow {
    id: String,
    exercise_name: String,
    exercise_name_ko: Option<String>,
    mechanics: Option<String>,
    equipment: OneOrMany,
    #[serde(default)]
    muscle_groups: Vec<String>,
    popularity_score: Option<f64>,
    video_path: Option<String>,
    thumbnail_path: Option<String>,
    icon_path: Option<String>,
    tips_ko: Option<Vec<String>>,
    primary_muscle: Option<String>,
    #[serde(rename = "type")]
    exercise_type: Option<String>,
    difficulty_level: Option<String>,
}

impl From<ExerciseRow> for Exercise {
    fn from(row: ExerciseRow) -> Self {
        Exercise {
            id: row.id,
            mechanics: Mechanics::parse(row.mechanics.as_deref()),
            equipment_required: row
                .equipment
                .into_vec()
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
            muscle_groups: row
                .muscle_groups
                .into_iter()
                .map(|m| m.trim().to_lowercase())
                .collect(),
            popularity_score: row.popularity_score,
            info: ExerciseInfo {
                name: row.exercise_name,
                name_ko: row.exercise_name_ko,
                video_path: row.video_path,
                thumbnail_path: row.thumbnail_path,
                icon_path: row.icon_path,
                tips_ko: row.tips_ko.unwrap_or_default(),
                primary_muscle: row.primary_muscle,
                exercise_type: row.exercise_type,
                difficulty_level: row.difficulty_level,
            },
        }
    }
}

/// Row format of the user equipment table
#[derive(Debug, Deserialize)]
struct EquipmentRow {
    user_id: String,
    equipment_type: String,
    #[serde(default = "default_available")]
    is_available: bool,
}

fn default_available() -> bool {
    true
}

/// Row format of the exercise log table
#[derive(Debug, Deserialize)]
struct LogRow {
    user_id: String,
    exercise_id: String,
    #[serde(default)]
    weight_used: Vec<f64>,
    #[serde(default)]
    reps_completed: Vec<f64>,
    created_at: DateTime<Utc>,
}

impl From<LogRow> for ExerciseLogEntry {
    fn from(row: LogRow) -> Self {
        ExerciseLogEntry {
            weight_used: row.weight_used,
            reps_completed: row.reps_completed,
            created_at: row.created_at,
        }
    }
}

/// Read access to the exported tables in one data directory
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Exported exercise catalog, or `None` when none has been exported
    pub fn exercises(&self) -> Result<Option<Vec<Exercise>>> {
        let path = self.dir.join(EXERCISES_FILE);
        if !path.exists() {
            tracing::debug!("No exercise catalog at {:?}", path);
            return Ok(None);
        }
        let rows: Vec<ExerciseRow> = read_rows(&path)?;
        tracing::info!("Loaded {} exercises from {:?}", rows.len(), path);
        Ok(Some(rows.into_iter().map(Exercise::from).collect()))
    }

    /// Equipment tags the user has marked available, in file order
    pub fn available_equipment(&self, user_id: &str) -> Result<Vec<String>> {
        let rows: Vec<EquipmentRow> = read_rows(&self.dir.join(EQUIPMENT_FILE))?;
        let mut equipment: Vec<String> = Vec::new();
        for row in rows {
            if row.user_id == user_id && row.is_available && !equipment.contains(&row.equipment_type) {
                equipment.push(row.equipment_type);
            }
        }
        tracing::debug!("User {} has equipment {:?}", user_id, equipment);
        Ok(equipment)
    }

    pub fn profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let rows: Vec<UserProfile> = read_rows(&self.dir.join(PROFILES_FILE))?;
        Ok(rows.into_iter().find(|p| p.id == user_id))
    }

    /// Every log the user recorded for an exercise, unordered
    pub fn exercise_logs(&self, user_id: &str, exercise_id: &str) -> Result<Vec<ExerciseLogEntry>> {
        let rows: Vec<LogRow> = read_rows(&self.dir.join(LOGS_FILE))?;
        let logs: Vec<ExerciseLogEntry> = rows
            .into_iter()
            .filter(|r| r.user_id == user_id && r.exercise_id == exercise_id)
            .map(ExerciseLogEntry::from)
            .collect();
        tracing::debug!(
            "Found {} logs for user {} on exercise {}",
            logs.len(),
            user_id,
            exercise_id
        );
        Ok(logs)
    }
}

/// Read a JSON array of rows; a missing file yields no rows
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        tracing::warn!("Failed to parse {:?}: {}", path, e);
        Error::Json(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, DataStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            std::fs::write(temp_dir.path().join(name), contents).unwrap();
        }
        let store = DataStore::new(temp_dir.path());
        (temp_dir, store)
    }

    #[test]
    fn test_missing_files_mean_no_rows() {
        let (_dir, store) = store_with(&[]);

        assert!(store.exercises().unwrap().is_none());
        assert!(store.available_equipment("u1").unwrap().is_empty());
        assert!(store.profile("u1").unwrap().is_none());
        assert!(store.exercise_logs("u1", "e1").unwrap().is_empty());
    }

    #[test]
    fn test_exercise_rows_are_narrowed() {
        let json = r#"[
            {
                "id": "e1",
                "exercise_name": "Bench Press",
                "exercise_name_ko": "벤치 프레스",
                "mechanics": "compound",
                "equipment": "barbell",
                "muscle_groups": ["Chest", "triceps"],
                "popularity_score": 97,
                "tips_ko": ["견갑골을 모으세요"],
                "type": "strength",
                "difficulty_level": "Intermediate"
            },
            {
                "id": "e2",
                "exercise_name": "Weighted Dip",
                "mechanics": null,
                "equipment": ["body-weight", "dip-belt"],
                "muscle_groups": ["triceps"]
            }
        ]"#;
        let (_dir, store) = store_with(&[(EXERCISES_FILE, json)]);

        let exercises = store.exercises().unwrap().unwrap();

        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].mechanics, Mechanics::Compound);
        assert!(exercises[0].equipment_required.contains("barbell"));
        assert!(exercises[0].muscle_groups.contains("chest"));
        assert_eq!(exercises[0].popularity_score, Some(97.0));
        assert_eq!(exercises[0].info.tips_ko.len(), 1);
        assert_eq!(exercises[1].mechanics, Mechanics::Other);
        assert_eq!(exercises[1].equipment_required.len(), 2);
        assert_eq!(exercises[1].popularity(), 0.0);
    }

    #[test]
    fn test_available_equipment_filters_user_and_availability() {
        let json = r#"[
            {"user_id": "u1", "equipment_type": "barbell", "is_available": true},
            {"user_id": "u1", "equipment_type": "cable", "is_available": false},
            {"user_id": "u2", "equipment_type": "machine", "is_available": true},
            {"user_id": "u1", "equipment_type": "dumbbell"},
            {"user_id": "u1", "equipment_type": "barbell"}
        ]"#;
        let (_dir, store) = store_with(&[(EQUIPMENT_FILE, json)]);

        assert_eq!(
            store.available_equipment("u1").unwrap(),
            vec!["barbell".to_string(), "dumbbell".to_string()]
        );
    }

    #[test]
    fn test_profile_and_logs() {
        let profiles = r#"[{"id": "u1", "one_rep_max": {"Bench Press": 100}}]"#;
        let logs = r#"[
            {"user_id": "u1", "exercise_id": "e1", "weight_used": [80, 90], "reps_completed": [8, 5], "created_at": "2024-03-01T18:00:00Z"},
            {"user_id": "u1", "exercise_id": "e2", "weight_used": [40], "reps_completed": [10], "created_at": "2024-03-02T18:00:00Z"},
            {"user_id": "u2", "exercise_id": "e1", "weight_used": [60], "reps_completed": [5], "created_at": "2024-03-03T18:00:00Z"}
        ]"#;
        let (_dir, store) = store_with(&[(PROFILES_FILE, profiles), (LOGS_FILE, logs)]);

        let profile = store.profile("u1").unwrap().unwrap();
        assert_eq!(profile.one_rep_max.get("Bench Press"), Some(&100.0));
        assert!(store.profile("u9").unwrap().is_none());

        let entries = store.exercise_logs("u1", "e1").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].weight_used, vec![80.0, 90.0]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let (_dir, store) = store_with(&[(PROFILES_FILE, "{ not json ]")]);

        assert!(matches!(store.profile("u1"), Err(Error::Json(_))));
    }
}
