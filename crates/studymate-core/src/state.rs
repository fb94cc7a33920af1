//! The durable subset of application state.
//!
//! Serialized as one JSON blob with camelCase keys:
//! `tasks`, `longTermTasks`, `history`, `schedule`, `dailyGoalSlots`,
//! `settings`, `streak`. The live timer countdown is never part of it.

use serde::{Deserialize, Serialize};

use crate::task::{HistoryEntry, LongTermTask, Task};
use crate::timer::CycleDurations;

pub const DEFAULT_DAILY_GOAL_SLOTS: u32 = 4;
pub const DEFAULT_POMODORO_TIME: u32 = 25;
pub const DEFAULT_BREAK_TIME: u32 = 5;
pub const DEFAULT_MEDIA_URL: &str = "https://www.youtube.com/embed/jfKfPfyJRdk";

fn default_daily_goal_slots() -> u32 {
    DEFAULT_DAILY_GOAL_SLOTS
}
fn default_pomodoro_time() -> u32 {
    DEFAULT_POMODORO_TIME
}
fn default_break_time() -> u32 {
    DEFAULT_BREAK_TIME
}
fn default_media_url() -> String {
    DEFAULT_MEDIA_URL.into()
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Work phase length in minutes
    #[serde(default = "default_pomodoro_time")]
    pub pomodoro_time: u32,
    /// Break phase length in minutes
    #[serde(default = "default_break_time")]
    pub break_time: u32,
    /// Embedded media shown next to the timer. Opaque to the core.
    #[serde(default = "default_media_url")]
    pub youtube_url: String,
}

impl Settings {
    pub fn durations(&self) -> CycleDurations {
        CycleDurations {
            work_min: self.pomodoro_time,
            break_min: self.break_time,
        }
    }

    fn normalize(&mut self) {
        if self.pomodoro_time == 0 {
            self.pomodoro_time = DEFAULT_POMODORO_TIME;
        }
        if self.break_time == 0 {
            self.break_time = DEFAULT_BREAK_TIME;
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pomodoro_time: DEFAULT_POMODORO_TIME,
            break_time: DEFAULT_BREAK_TIME,
            youtube_url: default_media_url(),
        }
    }
}

/// Everything that survives a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub long_term_tasks: Vec<LongTermTask>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub schedule: Vec<String>,
    #[serde(default = "default_daily_goal_slots")]
    pub daily_goal_slots: u32,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub streak: u64,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            long_term_tasks: Vec::new(),
            history: Vec::new(),
            schedule: Vec::new(),
            daily_goal_slots: DEFAULT_DAILY_GOAL_SLOTS,
            settings: Settings::default(),
            streak: 0,
        }
    }
}

impl PersistedState {
    /// Replace out-of-range values with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.daily_goal_slots == 0 {
            self.daily_goal_slots = DEFAULT_DAILY_GOAL_SLOTS;
        }
        self.settings.normalize();
        self
    }
}
