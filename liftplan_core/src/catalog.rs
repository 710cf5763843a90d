//! Built-in starter catalog of exercises.
//!
//! Used when no exercise catalog has been exported to the data directory.
//! Order is significant: it is the candidate order the selector sees.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// Cached starter catalog
static STARTER_CATALOG: Lazy<Catalog> = Lazy::new(build_starter_catalog);

/// Get a reference to the cached starter catalog
pub fn starter_catalog() -> &'static Catalog {
    &STARTER_CATALOG
}

struct Entry {
    id: &'static str,
    name: &'static str,
    mechanics: Mechanics,
    equipment: &'static [&'static str],
    muscles: &'static [&'static str],
    primary: &'static str,
    popularity: f64,
    difficulty: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "barbell-back-squat",
        name: "Barbell Back Squat",
        mechanics: Mechanics::Compound,
        equipment: &["barbell"],
        muscles: &["quadriceps", "glutes", "hamstrings"],
        primary: "quadriceps",
        popularity: 98.0,
        difficulty: "intermediate",
    },
    Entry {
        id: "barbell-bench-press",
        name: "Bench Press",
        mechanics: Mechanics::Compound,
        equipment: &["barbell"],
        muscles: &["chest", "triceps", "shoulders"],
        primary: "chest",
        popularity: 97.0,
        difficulty: "intermediate",
    },
    Entry {
        id: "barbell-deadlift",
        name: "Deadlift",
        mechanics: Mechanics::Compound,
        equipment: &["barbell"],
        muscles: &["hamstrings", "glutes", "back"],
        primary: "hamstrings",
        popularity: 95.0,
        difficulty: "advanced",
    },
    Entry {
        id: "barbell-overhead-press",
        name: "Overhead Press",
        mechanics: Mechanics::Compound,
        equipment: &["barbell"],
        muscles: &["shoulders", "triceps"],
        primary: "shoulders",
        popularity: 85.0,
        difficulty: "intermediate",
    },
    Entry {
        id: "barbell-row",
        name: "Barbell Row",
        mechanics: Mechanics::Compound,
        equipment: &["barbell"],
        muscles: &["back", "biceps"],
        primary: "back",
        popularity: 84.0,
        difficulty: "intermediate",
    },
    Entry {
        id: "dumbbell-incline-press",
        name: "Incline Dumbbell Press",
        mechanics: Mechanics::Compound,
        equipment: &["dumbbell"],
        muscles: &["chest", "shoulders"],
        primary: "chest",
        popularity: 78.0,
        difficulty: "beginner",
    },
    Entry {
        id: "dumbbell-curl",
        name: "Dumbbell Curl",
        mechanics: Mechanics::Isolation,
        equipment: &["dumbbell"],
        muscles: &["biceps"],
        primary: "biceps",
        popularity: 80.0,
        difficulty: "beginner",
    },
    Entry {
        id: "dumbbell-lateral-raise",
        name: "Lateral Raise",
        mechanics: Mechanics::Isolation,
        equipment: &["dumbbell"],
        muscles: &["shoulders"],
        primary: "shoulders",
        popularity: 76.0,
        difficulty: "beginner",
    },
    Entry {
        id: "dumbbell-fly",
        name: "Dumbbell Fly",
        mechanics: Mechanics::Isolation,
        equipment: &["dumbbell"],
        muscles: &["chest"],
        primary: "chest",
        popularity: 62.0,
        difficulty: "beginner",
    },
    Entry {
        id: "cable-triceps-pushdown",
        name: "Triceps Pushdown",
        mechanics: Mechanics::Isolation,
        equipment: &["cable"],
        muscles: &["triceps"],
        primary: "triceps",
        popularity: 74.0,
        difficulty: "beginner",
    },
    Entry {
        id: "cable-lat-pulldown",
        name: "Lat Pulldown",
        mechanics: Mechanics::Compound,
        equipment: &["cable"],
        muscles: &["back", "biceps"],
        primary: "back",
        popularity: 82.0,
        difficulty: "beginner",
    },
    Entry {
        id: "machine-leg-extension",
        name: "Leg Extension",
        mechanics: Mechanics::Isolation,
        equipment: &["machine"],
        muscles: &["quadriceps"],
        primary: "quadriceps",
        popularity: 70.0,
        difficulty: "beginner",
    },
    Entry {
        id: "machine-leg-curl",
        name: "Lying Leg Curl",
        mechanics: Mechanics::Isolation,
        equipment: &["machine"],
        muscles: &["hamstrings"],
        primary: "hamstrings",
        popularity: 66.0,
        difficulty: "beginner",
    },
    Entry {
        id: "push-up",
        name: "Push-up",
        mechanics: Mechanics::Compound,
        equipment: &[BODY_WEIGHT],
        muscles: &["chest", "triceps", "shoulders"],
        primary: "chest",
        popularity: 90.0,
        difficulty: "beginner",
    },
    Entry {
        id: "pull-up",
        name: "Pull-up",
        mechanics: Mechanics::Compound,
        equipment: &[BODY_WEIGHT],
        muscles: &["back", "biceps"],
        primary: "back",
        popularity: 88.0,
        difficulty: "intermediate",
    },
    Entry {
        id: "bodyweight-squat",
        name: "Air Squat",
        mechanics: Mechanics::Compound,
        equipment: &[BODY_WEIGHT],
        muscles: &["quadriceps", "glutes"],
        primary: "quadriceps",
        popularity: 72.0,
        difficulty: "beginner",
    },
    Entry {
        id: "plank",
        name: "Plank",
        mechanics: Mechanics::Other,
        equipment: &[BODY_WEIGHT],
        muscles: &["abs"],
        primary: "abs",
        popularity: 68.0,
        difficulty: "beginner",
    },
    Entry {
        id: "crunch",
        name: "Crunch",
        mechanics: Mechanics::Isolation,
        equipment: &[BODY_WEIGHT],
        muscles: &["abs"],
        primary: "abs",
        popularity: 60.0,
        difficulty: "beginner",
    },
];

fn build_starter_catalog() -> Catalog {
    let exercises = ENTRIES
        .iter()
        .map(|entry| {
            let mut exercise = Exercise::new(entry.id, entry.name, entry.mechanics)
                .with_equipment(entry.equipment.iter().copied())
                .with_muscles(entry.muscles.iter().copied())
                .with_popularity(entry.popularity);
            exercise.info.primary_muscle = Some(entry.primary.into());
            exercise.info.exercise_type = Some("strength".into());
            exercise.info.difficulty_level = Some(entry.difficulty.into());
            exercise
        })
        .collect();

    Catalog { exercises }
}

impl Catalog {
    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors (empty if valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = BTreeSet::new();

        for exercise in &self.exercises {
            if exercise.id.trim().is_empty() {
                errors.push(format!("Exercise '{}' has an empty id", exercise.info.name));
            } else if !seen.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise id '{}'", exercise.id));
            }

            if exercise.equipment_required.is_empty() {
                errors.push(format!("Exercise '{}' requires no equipment tag", exercise.id));
            }

            for muscle in &exercise.muscle_groups {
                if *muscle != muscle.to_lowercase() {
                    errors.push(format!(
                        "Exercise '{}' has non-lowercase muscle tag '{}'",
                        exercise.id, muscle
                    ));
                }
            }

            if let Some(score) = exercise.popularity_score {
                if !score.is_finite() {
                    errors.push(format!(
                        "Exercise '{}' has a non-finite popularity score",
                        exercise.id
                    ));
                }
            }
        }

        if self.exercises.is_empty() {
            errors.push("Catalog has no exercises".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_catalog_loads() {
        let catalog = starter_catalog();
        assert_eq!(catalog.exercises.len(), ENTRIES.len());
        assert!(catalog.get("barbell-bench-press").is_some());
    }

    #[test]
    fn test_starter_catalog_validates() {
        let errors = starter_catalog().validate();
        assert!(
            errors.is_empty(),
            "Starter catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_body_weight_exercises_exist() {
        let count = starter_catalog()
            .exercises
            .iter()
            .filter(|e| e.is_body_weight())
            .count();
        assert!(count >= 3, "Should have body-weight options for users without equipment");
    }

    #[test]
    fn test_validate_reports_problems() {
        let catalog = Catalog {
            exercises: vec![
                Exercise::new("a", "A", Mechanics::Compound)
                    .with_equipment(["barbell"])
                    .with_muscles(["Chest"]),
                Exercise::new("a", "A again", Mechanics::Compound).with_equipment(["barbell"]),
                Exercise::new("b", "B", Mechanics::Isolation),
            ],
        };

        let errors = catalog.validate();

        assert_eq!(errors.len(), 3, "{:?}", errors);
        assert!(errors.iter().any(|e| e.contains("Duplicate")));
        assert!(errors.iter().any(|e| e.contains("non-lowercase")));
        assert!(errors.iter().any(|e| e.contains("no equipment")));
    }

    #[test]
    fn test_empty_catalog_is_invalid() {
        assert_eq!(Catalog::default().validate().len(), 1);
    }
}
