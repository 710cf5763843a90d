#![forbid(unsafe_code)]

//! Core domain model and business logic for Liftplan.
//!
//! This crate provides:
//! - Domain types (exercises, logs, requests and results)
//! - Exercise selection with fallback tiers
//! - One-rep-max estimation and load recommendation
//! - Routine assembly
//! - Starter catalog, configuration and logging setup
//!
//! Selection, load recommendation and routine assembly are pure functions
//! of their inputs and perform no I/O.

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod epley;
pub mod selection;
pub mod load;
pub mod routine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::starter_catalog;
pub use config::Config;
pub use selection::{select, select_with};
pub use load::{recommend, recommend_with};
pub use routine::{build_routine, exercise_count_for_duration, RoutineParams, WorkoutRoutine};
