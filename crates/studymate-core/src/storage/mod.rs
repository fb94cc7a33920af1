mod config;
pub mod database;
pub mod gateway;
pub mod memory;

pub use config::{Config, LoggingConfig, StorageConfig};
pub use database::Database;
pub use gateway::{PersistenceGateway, DEFAULT_BLOB_KEY};
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::PersistenceError;

/// Opaque key-value store holding whole serialized blobs.
///
/// Each `set` replaces the value for a key in a single write.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// Returns the data directory, creating it if needed.
///
/// `STUDYMATE_DATA_DIR` wins when set. Otherwise `~/.config/studymate[-dev]/`
/// depending on `STUDYMATE_ENV` (set it to `dev` for the development
/// directory).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, PersistenceError> {
    let dir = match std::env::var("STUDYMATE_DATA_DIR") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("STUDYMATE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studymate-dev")
            } else {
                base_dir.join("studymate")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
