pub mod config;
pub mod goal;
pub mod schedule;
pub mod settings;
pub mod stats;
pub mod task;
pub mod timer;
pub mod views;

use serde::Serialize;
use studymate_core::storage::data_dir;
use studymate_core::{Config, Database, PersistenceGateway, StudyApp};
use tracing_subscriber::EnvFilter;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the app on the configured SQLite store.
pub fn open_app() -> Result<StudyApp<Database>, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open_at(config.database_path(&data_dir()?))?;
    Ok(StudyApp::open(PersistenceGateway::with_key(
        db,
        config.storage.blob_key,
    )))
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Log to stderr. `STUDYMATE_LOG` overrides the configured filter.
///
/// Runs before any subscriber exists, so config problems are not logged
/// here; `open_app` reports them once logging is up.
pub fn init_logging() {
    let directive = std::env::var("STUDYMATE_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| Config::load().ok().map(|c| c.logging.filter))
        .unwrap_or_else(|| "warn".to_string());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
