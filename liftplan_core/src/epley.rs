//! Epley one-rep-max formulas.
//!
//! `1RM = weight × (1 + 0.0333 × reps)`, and its inverse for deriving a
//! working weight from a 1RM. The coefficient is the fixed approximation
//! of 1/30 used by stored recommendations and must not be replaced by the
//! exact fraction.

/// Epley coefficient (1/30 rounded)
pub const EPLEY_COEFFICIENT: f64 = 0.0333;

/// Estimated 1RM for a set of `reps` at `weight`
pub fn estimate_one_rep_max(weight: f64, reps: f64) -> f64 {
    weight * (1.0 + EPLEY_COEFFICIENT * reps)
}

/// Weight that should be liftable for `reps` given a 1RM
pub fn weight_for_reps(one_rep_max: f64, reps: f64) -> f64 {
    one_rep_max / (1.0 + EPLEY_COEFFICIENT * reps)
}

/// Round to the nearest multiple of `increment`, halves away from zero
pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    (value / increment).round() * increment
}
