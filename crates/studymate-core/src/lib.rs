//! # Study Mate Core Library
//!
//! This library provides the core business logic for Study Mate, a personal
//! study tracker. All operations are available through [`StudyApp`]; the CLI
//! binary is a thin presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Task Store**: tasks, long-term goals, the graded completion history
//!   and the streak counter
//! - **Scheduler**: today's ordered plan, holding task ids only
//! - **Timer Engine**: a tick-driven work/break countdown, plus a tokio
//!   driver that ticks it from the real clock
//! - **Statistics**: per-day completion counts and average scores
//! - **Storage**: one JSON blob in a key-value store (SQLite or memory)
//!   behind a fail-soft persistence gateway, and a TOML configuration
//!
//! ## Key Components
//!
//! - [`StudyApp`]: Controller owning the whole state tree
//! - [`TaskStore`]: Task lifecycle and history
//! - [`TimerEngine`]: Core timer state machine
//! - [`PersistenceGateway`]: Load/save/wipe of the state blob
//! - [`Config`]: Application configuration management

pub mod app;
pub mod error;
pub mod events;
pub mod schedule;
pub mod state;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;

pub use app::{DashboardView, GoalsView, HistoryView, SettingsView, StudyApp, TaskEditorView, TimerView};
pub use error::{ConfigError, CoreError, PersistenceError, ValidationError};
pub use events::Event;
pub use schedule::Scheduler;
pub use state::{PersistedState, Settings};
pub use stats::{AverageScore, DailyStats, GoalProgress, Statistics};
pub use storage::{BlobStore, Config, Database, MemoryStore, PersistenceGateway};
pub use task::{Grade, HistoryEntry, LongTermTask, Task, TaskStore};
pub use timer::{CycleDurations, DriveOutcome, Phase, TimerDriver, TimerEngine, TimerState};
