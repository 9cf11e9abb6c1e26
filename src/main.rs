use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use log::info;

use formcoach::{Database, FeedController, SettingsStore, WorkoutConfig, WorkoutController};

/// Demo entry point: runs one synthetic workout through the full pipeline
/// and prints the persisted summary.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("formcoach starting up...");

    let data_dir = std::env::var("FORMCOACH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("formcoach-data"));
    std::fs::create_dir_all(&data_dir)?;

    let database = Database::new(data_dir.join("formcoach.sqlite3"))?;
    let settings_store = SettingsStore::new(data_dir.join("settings.json"))?;
    let settings = settings_store.get();

    let exercise_id = std::env::args().nth(1).unwrap_or_else(|| "squat".to_string());
    let config = WorkoutConfig {
        exercise_id,
        target_reps: settings.default_rep_count,
        confidence_threshold: settings.confidence_threshold,
        min_confident_keypoints: settings.min_confident_keypoints,
    };

    info!(
        "starting {} session, target {} reps",
        config.exercise_id, config.target_reps
    );

    let controller = WorkoutController::new(config, Utc::now());
    let mut feed = FeedController::new();
    feed.start(controller, database.clone())?;

    if let Some(summary) = feed.wait().await? {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    let stats = database.history_stats().await?;
    info!(
        "history: {} workouts, {}% average accuracy, {} kcal total",
        stats.total_workouts, stats.average_accuracy, stats.total_calories_burned
    );

    Ok(())
}
