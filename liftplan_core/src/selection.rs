//! Exercise selection for routine generation.
//!
//! Selection runs in two phases:
//! 1. **Pool construction** with fallback tiers:
//!    - equipment + muscle filter
//!    - equipment only, capped
//!    - no filter, capped
//! 2. **Balanced pick**: a share of compounds by popularity, then
//!    everything else, backfilled from the pool when short. Compounds are
//!    always ordered first.

use crate::config::{EquipmentMatch, SelectionConfig};
use crate::{Error, Exercise, PoolTier, Result, Selection, SelectionRequest, BODY_WEIGHT};
use std::collections::BTreeSet;

impl SelectionRequest {
    /// Build a request from raw user input
    ///
    /// Muscle tags are trimmed and lower-cased. A user with no equipment is
    /// treated as having only [`BODY_WEIGHT`].
    pub fn from_user_input<E, T, S1, S2>(equipment: E, targets: T, count: usize) -> Self
    where
        E: IntoIterator<Item = S1>,
        T: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let mut available_equipment: BTreeSet<String> = equipment
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        if available_equipment.is_empty() {
            tracing::info!("No equipment registered, falling back to {}", BODY_WEIGHT);
            available_equipment.insert(BODY_WEIGHT.to_string());
        }

        let target_muscle_groups = targets
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            available_equipment,
            target_muscle_groups,
            count,
        }
    }
}

/// Select exercises using the default selection parameters
pub fn select(candidates: &[Exercise], request: &SelectionRequest) -> Result<Selection> {
    select_with(candidates, request, &SelectionConfig::default())
}

/// Select an ordered, duplicate-free list of exercises for a routine
///
/// Returns [`Error::EmptyCatalog`] only when there are no candidates at all;
/// a request larger than the pool simply yields everything available.
pub fn select_with(
    candidates: &[Exercise],
    request: &SelectionRequest,
    config: &SelectionConfig,
) -> Result<Selection> {
    validate_request(request)?;

    let (pool, tier) = build_pool(candidates, request, config);
    if pool.is_empty() {
        return Err(Error::EmptyCatalog);
    }

    let exercises = pick_balanced(&pool, request.count, config.compound_ratio);

    tracing::info!(
        "Selected {} of {} requested exercises from {:?} pool of {}",
        exercises.len(),
        request.count,
        tier,
        pool.len()
    );

    Ok(Selection { exercises, tier })
}

fn validate_request(request: &SelectionRequest) -> Result<()> {
    if request.count < 1 {
        return Err(Error::InvalidInput(
            "exercise count must be at least 1".into(),
        ));
    }
    if request.available_equipment.is_empty() {
        return Err(Error::InvalidInput(
            "available equipment must not be empty".into(),
        ));
    }
    Ok(())
}

fn equipment_matches(exercise: &Exercise, available: &BTreeSet<String>, mode: EquipmentMatch) -> bool {
    match mode {
        EquipmentMatch::Any => !exercise.equipment_required.is_disjoint(available),
        EquipmentMatch::All => exercise.equipment_required.is_subset(available),
    }
}

fn muscles_match(exercise: &Exercise, targets: &BTreeSet<String>) -> bool {
    targets.is_empty() || !exercise.muscle_groups.is_disjoint(targets)
}

/// Choose the candidate pool, relaxing filters until something is left
fn build_pool<'a>(
    candidates: &'a [Exercise],
    request: &SelectionRequest,
    config: &SelectionConfig,
) -> (Vec<&'a Exercise>, PoolTier) {
    let usable = |e: &&Exercise| {
        equipment_matches(e, &request.available_equipment, config.equipment_match)
    };

    let matched: Vec<&Exercise> = candidates
        .iter()
        .filter(usable)
        .filter(|e| muscles_match(e, &request.target_muscle_groups))
        .collect();
    let matched = dedup_by_id(matched);
    if !matched.is_empty() {
        return (matched, PoolTier::Matched);
    }

    tracing::info!("No exercises found for target muscles, relaxing muscle filter");
    let equipment_only = dedup_by_id(candidates.iter().filter(usable).collect());
    let equipment_only: Vec<_> = equipment_only
        .into_iter()
        .take(config.equipment_fallback_limit)
        .collect();
    if !equipment_only.is_empty() {
        return (equipment_only, PoolTier::EquipmentOnly);
    }

    tracing::info!(
        "No exercises found for available equipment, taking first {} of catalog",
        config.absolute_fallback_limit
    );
    let unfiltered = dedup_by_id(candidates.iter().collect());
    let unfiltered = unfiltered
        .into_iter()
        .take(config.absolute_fallback_limit)
        .collect();
    (unfiltered, PoolTier::Unfiltered)
}

/// Keep the first occurrence of every exercise id
fn dedup_by_id(exercises: Vec<&Exercise>) -> Vec<&Exercise> {
    let mut seen = BTreeSet::new();
    exercises
        .into_iter()
        .filter(|&e| seen.insert(e.id.as_str()))
        .collect()
}

/// Stable sort, highest popularity first
fn sort_by_popularity(exercises: &mut [&Exercise]) {
    exercises.sort_by(|a, b| b.popularity().total_cmp(&a.popularity()));
}

fn pick_balanced(pool: &[&Exercise], count: usize, compound_ratio: f64) -> Vec<Exercise> {
    let (mut compounds, mut others): (Vec<&Exercise>, Vec<&Exercise>) =
        pool.iter().copied().partition(|e| e.mechanics.is_compound());
    sort_by_popularity(&mut compounds);
    sort_by_popularity(&mut others);

    let main_count = ((count as f64 * compound_ratio).floor() as usize)
        .max(1)
        .min(compounds.len());

    let mut picked: Vec<&Exercise> = compounds[..main_count].to_vec();
    let remaining = count.saturating_sub(picked.len());
    picked.extend(others.iter().take(remaining));

    if picked.len() < count {
        // Walk the pool in ranked order so scores stay non-increasing per group
        let used: BTreeSet<&str> = picked.iter().map(|e| e.id.as_str()).collect();
        let shortfall = count - picked.len();
        let backfill: Vec<&Exercise> = compounds
            .iter()
            .chain(others.iter())
            .filter(|e| !used.contains(e.id.as_str()))
            .take(shortfall)
            .copied()
            .collect();
        tracing::debug!("Backfilling {} exercises from pool", backfill.len());
        picked.extend(backfill);
    }

    let (mut ordered, rest): (Vec<&Exercise>, Vec<&Exercise>) =
        picked.into_iter().partition(|e| e.mechanics.is_compound());
    ordered.extend(rest);
    ordered.into_iter().cloned().collect()
}
