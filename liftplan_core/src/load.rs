//! Working-weight recommendations.
//!
//! The estimated 1RM comes from the first available source:
//! 1. Body-weight exercises skip estimation entirely
//! 2. A 1RM the user declared for the exercise
//! 3. The best Epley estimate across every set in the recent logs
//!
//! With no source at all the beginner default weight is suggested.

use crate::config::LoadConfig;
use crate::epley::{estimate_one_rep_max, round_to_increment, weight_for_reps};
use crate::{
    Error, Exercise, ExerciseLogEntry, LoadMethod, LoadRequest, LoadResult, Result, UserProfile,
    BODY_WEIGHT,
};

impl LoadRequest {
    /// Assemble a request from stored records
    ///
    /// The known 1RM is looked up by exercise name. Logs are ordered newest
    /// first and truncated to `history_window` entries.
    pub fn from_records(
        exercise: &Exercise,
        profile: Option<&UserProfile>,
        mut logs: Vec<ExerciseLogEntry>,
        target_reps: u32,
        history_window: usize,
    ) -> Result<Self> {
        let equipment_type = exercise.equipment_tag().ok_or_else(|| {
            Error::InvalidInput(format!(
                "exercise {} has no equipment tag",
                exercise.id
            ))
        })?;

        let known_one_rep_max = profile
            .and_then(|p| p.one_rep_max.get(&exercise.info.name))
            .copied();

        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        logs.truncate(history_window);

        Ok(Self {
            known_one_rep_max,
            recent_logs: logs,
            equipment_type: equipment_type.to_string(),
            target_reps,
        })
    }
}

/// Recommend a working weight using the default load parameters
pub fn recommend(request: &LoadRequest) -> Result<LoadResult> {
    recommend_with(request, &LoadConfig::default())
}

/// Recommend a working weight for `request.target_reps`
///
/// Missing data never fails; only malformed input does.
pub fn recommend_with(request: &LoadRequest, config: &LoadConfig) -> Result<LoadResult> {
    if request.target_reps == 0 {
        return Err(Error::InvalidInput("target reps must be at least 1".into()));
    }

    if request.equipment_type == BODY_WEIGHT {
        tracing::info!("Body-weight exercise, no load recommended");
        return Ok(LoadResult {
            recommended_weight: 0.0,
            estimated_one_rep_max: 0.0,
            method: LoadMethod::BodyweightDefault,
        });
    }

    validate_history(request)?;

    let basis = request
        .known_one_rep_max
        .filter(|orm| *orm > 0.0)
        .map(|orm| (orm, LoadMethod::KnownOneRepMax))
        .or_else(|| {
            best_estimate(&request.recent_logs).map(|e1rm| (e1rm, LoadMethod::EstimatedFromHistory))
        });

    let result = match basis {
        Some((one_rep_max, method)) => {
            let raw = weight_for_reps(one_rep_max, f64::from(request.target_reps));
            LoadResult {
                recommended_weight: round_to_increment(raw, config.rounding_increment),
                estimated_one_rep_max: one_rep_max,
                method,
            }
        }
        None => LoadResult {
            recommended_weight: config.beginner_default,
            estimated_one_rep_max: 0.0,
            method: LoadMethod::DefaultBeginner,
        },
    };

    tracing::info!(
        "Recommended {} {} for {} reps (1RM {:.1}, {})",
        result.recommended_weight,
        config.unit,
        request.target_reps,
        result.estimated_one_rep_max,
        result.method.as_str()
    );

    Ok(result)
}

/// Highest Epley estimate over every set with positive weight and reps
pub fn best_estimate(logs: &[ExerciseLogEntry]) -> Option<f64> {
    logs.iter()
        .flat_map(ExerciseLogEntry::sets)
        .filter(|(weight, reps)| *weight > 0.0 && *reps > 0.0)
        .map(|(weight, reps)| estimate_one_rep_max(weight, reps))
        .fold(None, |best: Option<f64>, e1rm| match best {
            Some(b) if b >= e1rm => Some(b),
            _ => Some(e1rm),
        })
}

/// Check the 1RM and log data that feed the estimate
fn validate_history(request: &LoadRequest) -> Result<()> {
    if let Some(orm) = request.known_one_rep_max {
        if !orm.is_finite() {
            return Err(Error::InvalidInput(format!(
                "known one-rep max must be a finite number, got {}",
                orm
            )));
        }
    }

    for (i, log) in request.recent_logs.iter().enumerate() {
        if log.weight_used.len() != log.reps_completed.len() {
            return Err(Error::InvalidInput(format!(
                "log entry {} has {} weights but {} rep counts",
                i,
                log.weight_used.len(),
                log.reps_completed.len()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mechanics;
    use assert_approx_eq::assert_approx_eq;
    use chrono::{Duration, TimeZone, Utc};

    fn log(sets: &[(f64, f64)], days_ago: i64) -> ExerciseLogEntry {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
        ExerciseLogEntry {
            weight_used: sets.iter().map(|(w, _)| *w).collect(),
            reps_completed: sets.iter().map(|(_, r)| *r).collect(),
            created_at: base - Duration::days(days_ago),
        }
    }

    fn request(known: Option<f64>, logs: Vec<ExerciseLogEntry>, equipment: &str) -> LoadRequest {
        LoadRequest {
            known_one_rep_max: known,
            recent_logs: logs,
            equipment_type: equipment.to_string(),
            target_reps: 10,
        }
    }

    #[test]
    fn test_known_one_rep_max() {
        let result = recommend(&request(Some(100.0), vec![], "barbell")).unwrap();

        assert_eq!(result.method, LoadMethod::KnownOneRepMax);
        assert_eq!(result.estimated_one_rep_max, 100.0);
        assert_eq!(result.recommended_weight, 75.0);
    }

    #[test]
    fn test_known_one_rep_max_wins_over_history() {
        let logs = vec![log(&[(200.0, 5.0)], 0)];
        let result = recommend(&request(Some(100.0), logs, "barbell")).unwrap();

        assert_eq!(result.method, LoadMethod::KnownOneRepMax);
        assert_eq!(result.estimated_one_rep_max, 100.0);
    }

    #[test]
    fn test_non_positive_known_one_rep_max_is_ignored() {
        let logs = vec![log(&[(80.0, 8.0)], 0)];
        let result = recommend(&request(Some(0.0), logs, "barbell")).unwrap();
        assert_eq!(result.method, LoadMethod::EstimatedFromHistory);

        let result = recommend(&request(Some(-5.0), vec![], "barbell")).unwrap();
        assert_eq!(result.method, LoadMethod::DefaultBeginner);
    }

    #[test]
    fn test_estimated_from_history() {
        let logs = vec![log(&[(80.0, 8.0), (90.0, 5.0)], 0)];
        let result = recommend(&request(None, logs, "barbell")).unwrap();

        assert_eq!(result.method, LoadMethod::EstimatedFromHistory);
        assert_approx_eq!(result.estimated_one_rep_max, 104.985, 1e-9);
        // 104.985 / 1.333 = 78.76 -> 80.0
        assert_eq!(result.recommended_weight, 80.0);
    }

    #[test]
    fn test_history_scans_every_log_and_skips_empty_sets() {
        let logs = vec![
            log(&[(60.0, 10.0), (0.0, 12.0)], 1),
            log(&[(100.0, 0.0), (70.0, 6.0)], 3),
            log(&[(95.0, 3.0)], 9),
        ];
        let best = best_estimate(&logs).unwrap();

        assert_approx_eq!(best, 95.0 * (1.0 + 0.0333 * 3.0), 1e-9);
    }

    #[test]
    fn test_best_estimate_none_without_positive_sets() {
        assert_eq!(best_estimate(&[]), None);
        assert_eq!(best_estimate(&[log(&[(0.0, 5.0), (40.0, 0.0)], 0)]), None);
    }

    #[test]
    fn test_beginner_default() {
        let result = recommend(&request(None, vec![], "dumbbell")).unwrap();

        assert_eq!(result.method, LoadMethod::DefaultBeginner);
        assert_eq!(result.recommended_weight, 20.0);
        assert_eq!(result.estimated_one_rep_max, 0.0);
    }

    #[test]
    fn test_beginner_default_is_configurable() {
        let config = LoadConfig {
            beginner_default: 10.0,
            ..LoadConfig::default()
        };
        let result = recommend_with(&request(None, vec![], "dumbbell"), &config).unwrap();
        assert_eq!(result.recommended_weight, 10.0);
    }

    #[test]
    fn test_body_weight_ignores_other_data() {
        let logs = vec![log(&[(80.0, 8.0)], 0)];
        let result = recommend(&request(Some(100.0), logs, BODY_WEIGHT)).unwrap();

        assert_eq!(result.method, LoadMethod::BodyweightDefault);
        assert_eq!(result.recommended_weight, 0.0);
        assert_eq!(result.estimated_one_rep_max, 0.0);
    }

    #[test]
    fn test_body_weight_skips_log_validation() {
        let mut bad = log(&[(10.0, 5.0)], 0);
        bad.weight_used.push(20.0);
        let result = recommend(&request(Some(f64::NAN), vec![bad], BODY_WEIGHT)).unwrap();

        assert_eq!(result.method, LoadMethod::BodyweightDefault);
        assert_eq!(result.recommended_weight, 0.0);
        assert_eq!(result.estimated_one_rep_max, 0.0);
    }

    #[test]
    fn test_mismatched_log_is_invalid() {
        let mut bad = log(&[(80.0, 8.0)], 0);
        bad.reps_completed.push(6.0);

        let result = recommend(&request(None, vec![bad], "barbell"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_zero_target_reps_is_invalid() {
        let mut req = request(Some(100.0), vec![], "barbell");
        req.target_reps = 0;
        assert!(matches!(recommend(&req), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_recommendation_is_aligned_to_increment() {
        for reps in 1..=20 {
            let mut req = request(Some(137.0), vec![], "barbell");
            req.target_reps = reps;
            let weight = recommend(&req).unwrap().recommended_weight;
            assert_eq!(round_to_increment(weight, 2.5), weight);
        }
    }

    #[test]
    fn test_from_records_orders_and_truncates_logs() {
        let exercise = Exercise::new("ex-1", "Bench Press", Mechanics::Compound)
            .with_equipment(["barbell"]);
        let mut profile = UserProfile {
            id: "user-1".into(),
            ..UserProfile::default()
        };
        profile.one_rep_max.insert("Bench Press".into(), 110.0);

        let logs: Vec<_> = [4, 0, 6, 2, 1, 5, 3]
            .iter()
            .map(|d| log(&[(50.0, 5.0)], *d))
            .collect();

        let req = LoadRequest::from_records(&exercise, Some(&profile), logs, 8, 5).unwrap();

        assert_eq!(req.known_one_rep_max, Some(110.0));
        assert_eq!(req.equipment_type, "barbell");
        assert_eq!(req.target_reps, 8);
        assert_eq!(req.recent_logs.len(), 5);
        for pair in req.recent_logs.windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
        }
        assert_eq!(req.recent_logs[0].created_at, log(&[], 0).created_at);
    }

    #[test]
    fn test_from_records_without_profile_entry() {
        let exercise = Exercise::new("ex-2", "Goblet Squat", Mechanics::Compound)
            .with_equipment(["kettlebell"]);
        let profile = UserProfile::default();

        let req = LoadRequest::from_records(&exercise, Some(&profile), vec![], 10, 5).unwrap();
        assert_eq!(req.known_one_rep_max, None);

        let req = LoadRequest::from_records(&exercise, None, vec![], 10, 5).unwrap();
        assert_eq!(req.known_one_rep_max, None);
    }

    #[test]
    fn test_from_records_requires_equipment() {
        let exercise = Exercise::new("ex-3", "Unknown", Mechanics::Other);
        let result = LoadRequest::from_records(&exercise, None, vec![], 10, 5);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
