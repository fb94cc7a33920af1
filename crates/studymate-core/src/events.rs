use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Grade;
use crate::timer::{Phase, TimerState};

/// Every state change worth telling the user about produces an Event.
/// The presentation layer prints or notifies; the core never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown ran out: the timer stopped and switched phase.
    PhaseChanged {
        from: Phase,
        to: Phase,
        duration_secs: u64,
        message: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        phase: Phase,
        remaining_secs: u64,
        display: String,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        task_id: String,
        grade: Grade,
        score: u8,
        streak: u64,
        at: DateTime<Utc>,
    },
}
