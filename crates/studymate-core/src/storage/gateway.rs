//! Persistence gateway: load, save and wipe the combined state blob.
//!
//! Every failure is recovered here. `load` falls back to defaults, `save`
//! and `wipe` log and carry on. The `try_*` variants surface the error for
//! callers (and tests) that want it.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::BlobStore;
use crate::error::PersistenceError;
use crate::state::{PersistedState, Settings};

/// Key under which the state blob is stored.
pub const DEFAULT_BLOB_KEY: &str = "study_mate_data";

pub struct PersistenceGateway<S: BlobStore> {
    store: S,
    key: String,
}

/// Decode one top-level key, falling back to `fallback` when it is absent or
/// malformed.
fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str, fallback: T) -> T {
    match obj.get(key) {
        None | Some(Value::Null) => fallback,
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring malformed saved field");
                fallback
            }
        },
    }
}

/// Decode a top-level array item by item. Malformed items are skipped so
/// their valid siblings survive the next save.
fn elements<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Vec<T> {
    match obj.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item.clone()) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "skipping malformed saved item");
                    None
                }
            })
            .collect(),
        Some(_) => {
            tracing::warn!(key, "ignoring saved field that is not an array");
            Vec::new()
        }
    }
}

fn settings(obj: &Map<String, Value>) -> Settings {
    let defaults = Settings::default();
    match obj.get("settings") {
        Some(Value::Object(fields)) => Settings {
            pomodoro_time: field(fields, "pomodoroTime", defaults.pomodoro_time),
            break_time: field(fields, "breakTime", defaults.break_time),
            youtube_url: field(fields, "youtubeUrl", defaults.youtube_url),
        },
        None | Some(Value::Null) => defaults,
        Some(_) => {
            tracing::warn!("ignoring saved settings that are not an object");
            defaults
        }
    }
}

fn decode(blob: &str) -> Result<PersistedState, PersistenceError> {
    let obj: Map<String, Value> = serde_json::from_str(blob)?;
    let defaults = PersistedState::default();
    let state = PersistedState {
        tasks: elements(&obj, "tasks"),
        long_term_tasks: elements(&obj, "longTermTasks"),
        history: elements(&obj, "history"),
        schedule: elements(&obj, "schedule"),
        daily_goal_slots: field(&obj, "dailyGoalSlots", defaults.daily_goal_slots),
        settings: settings(&obj),
        streak: field(&obj, "streak", defaults.streak),
    };
    Ok(state.normalized())
}

impl<S: BlobStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_BLOB_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the blob. `Ok(None)` when nothing has been saved yet.
    ///
    /// Malformed individual keys fall back to their defaults; only a blob
    /// that is not a JSON object at all is an error.
    pub fn try_load(&self) -> Result<Option<PersistedState>, PersistenceError> {
        match self.store.get(&self.key)? {
            None => Ok(None),
            Some(blob) => decode(&blob).map(Some),
        }
    }

    /// Read the blob, or the default state if it is missing or unreadable.
    pub fn load(&self) -> PersistedState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved state, starting fresh");
                PersistedState::default()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to load state, using defaults");
                PersistedState::default()
            }
        }
    }

    pub fn try_save(&mut self, state: &PersistedState) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string(state)?;
        self.store.set(&self.key, &blob)
    }

    /// Write the blob. Returns whether the write went through.
    pub fn save(&mut self, state: &PersistedState) -> bool {
        match self.try_save(state) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to save state");
                false
            }
        }
    }

    pub fn try_wipe(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)
    }

    /// Delete the blob. The caller resets its in-memory state.
    pub fn wipe(&mut self) -> bool {
        match self.try_wipe() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to wipe state");
                false
            }
        }
    }
}
