mod store;

use clap::{Parser, Subcommand};
use liftplan_core::routine::RoutineParams;
use liftplan_core::*;
use serde::Serialize;
use std::path::PathBuf;
use store::DataStore;

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "Workout routine generation and load recommendation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workout routine for a user
    Generate {
        #[arg(long)]
        user: String,

        /// Target muscle group (repeatable)
        #[arg(long = "target")]
        targets: Vec<String>,

        /// Session length in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// Training goal (e.g. muscle_building, cardio, endurance)
        #[arg(long)]
        goal: Option<String>,
    },

    /// Recommend a working weight for an exercise
    Recommend {
        #[arg(long)]
        user: String,

        #[arg(long)]
        exercise: String,

        /// Reps the weight should be achievable for
        #[arg(long)]
        reps: Option<u32>,
    },

    /// Validate and list the exercise catalog
    Catalog,
}

/// Load recommendation as reported to callers
#[derive(Serialize)]
struct LoadResponse {
    recommended_weight: f64,
    target_reps: u32,
    estimated_1rm: f64,
    calculation_method: LoadMethod,
    unit: String,
}

fn main() -> Result<()> {
    // Initialize logging
    liftplan_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = DataStore::new(data_dir);
    tracing::debug!("Using data directory {:?}", store.dir());

    match cli.command {
        Commands::Generate {
            user,
            targets,
            duration,
            goal,
        } => cmd_generate(&store, &config, &user, targets, duration, goal),
        Commands::Recommend {
            user,
            exercise,
            reps,
        } => cmd_recommend(&store, &config, &user, &exercise, reps),
        Commands::Catalog => cmd_catalog(&store),
    }
}

fn load_catalog(store: &DataStore) -> Result<Catalog> {
    match store.exercises()? {
        Some(exercises) => Ok(Catalog { exercises }),
        None => {
            tracing::info!("No exported catalog found, using starter catalog");
            Ok(starter_catalog().clone())
        }
    }
}

fn cmd_generate(
    store: &DataStore,
    config: &Config,
    user: &str,
    targets: Vec<String>,
    duration: Option<u32>,
    goal: Option<String>,
) -> Result<()> {
    let duration = duration.unwrap_or(config.routine.default_duration_minutes);
    let goal = goal.unwrap_or_else(|| config.routine.default_goal.clone());

    tracing::info!(
        "Generating routine for user {}: targets={:?}, duration={}, goal={}",
        user,
        targets,
        duration,
        goal
    );

    let equipment = store.available_equipment(user)?;
    let count = exercise_count_for_duration(duration, &config.routine);
    let request = SelectionRequest::from_user_input(&equipment, &targets, count);

    let catalog = load_catalog(store)?;
    let selection = select_with(&catalog.exercises, &request, &config.selection)?;

    let params = RoutineParams {
        goal,
        target_muscle_groups: targets,
        duration_minutes: duration,
    };
    let routine = build_routine(&selection, &params, &config.routine);

    print_json(&routine)
}

fn cmd_recommend(
    store: &DataStore,
    config: &Config,
    user: &str,
    exercise_id: &str,
    reps: Option<u32>,
) -> Result<()> {
    let target_reps = reps.unwrap_or(config.load.default_target_reps);

    let catalog = load_catalog(store)?;
    let exercise = catalog
        .get(exercise_id)
        .ok_or_else(|| Error::NotFound(format!("exercise {}", exercise_id)))?;

    let profile = store.profile(user)?;
    let logs = store.exercise_logs(user, exercise_id)?;

    let request = LoadRequest::from_records(
        exercise,
        profile.as_ref(),
        logs,
        target_reps,
        config.load.history_window,
    )?;
    let result = recommend_with(&request, &config.load)?;

    print_json(&LoadResponse {
        recommended_weight: result.recommended_weight,
        target_reps,
        estimated_1rm: result.estimated_one_rep_max,
        calculation_method: result.method,
        unit: config.load.unit.clone(),
    })
}

fn cmd_catalog(store: &DataStore) -> Result<()> {
    let catalog = load_catalog(store)?;

    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    for exercise in &catalog.exercises {
        let equipment: Vec<&str> = exercise
            .equipment_required
            .iter()
            .map(String::as_str)
            .collect();
        println!(
            "{:<28} {:<10} {:<24} {}",
            exercise.id,
            format!("{:?}", exercise.mechanics),
            equipment.join(","),
            exercise.info.name
        );
    }
    println!("\n✓ {} exercises", catalog.exercises.len());

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
