//! Focus timer engine.
//!
//! A tick-driven countdown with a work/break cycle. The engine has no clock
//! of its own: each call to `tick()` is one elapsed second. A real-clock
//! adapter ([`super::TimerDriver`]) or a test calls it.
//!
//! ## State Transitions
//!
//! ```text
//! Idle/Work  --start-->  Running/Work  --00:00-->  Idle/Break
//!     ^                                                 |
//!     +--------  Idle/Work  <--00:00--  Running/Break <-+ start
//! ```
//!
//! `stop()` returns to Idle at any point, keeping phase and remaining time.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn flipped(self) -> Phase {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    /// Message shown when a phase has just been entered.
    pub fn entry_message(self) -> &'static str {
        match self {
            Phase::Break => "Good work! Time for a break.",
            Phase::Work => "Break is over. Back to studying!",
        }
    }
}

/// Configured length of each phase, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDurations {
    pub work_min: u32,
    pub break_min: u32,
}

impl CycleDurations {
    pub fn minutes_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_min,
            Phase::Break => self.break_min,
        }
    }
}

impl Default for CycleDurations {
    fn default() -> Self {
        Self {
            work_min: 25,
            break_min: 5,
        }
    }
}

/// Core timer engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    phase: Phase,
    minutes: u32,
    seconds: u32,
    durations: CycleDurations,
}

impl TimerEngine {
    /// Idle, in the work phase, with the full work duration remaining.
    pub fn new(durations: CycleDurations) -> Self {
        Self {
            state: TimerState::Idle,
            phase: Phase::Work,
            minutes: durations.work_min,
            seconds: 0,
            durations,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_break(&self) -> bool {
        self.phase == Phase::Break
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn remaining_secs(&self) -> u64 {
        u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn durations(&self) -> CycleDurations {
        self.durations
    }

    /// Remaining time as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            phase: self.phase,
            remaining_secs: self.remaining_secs(),
            display: self.format_remaining(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => None,
            TimerState::Idle => {
                self.state = TimerState::Running;
                Some(Event::TimerStarted {
                    phase: self.phase,
                    remaining_secs: self.remaining_secs(),
                    at: Utc::now(),
                })
            }
        }
    }

    pub fn stop(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => None,
            TimerState::Running => {
                self.state = TimerState::Idle;
                Some(Event::TimerStopped {
                    phase: self.phase,
                    remaining_secs: self.remaining_secs(),
                    at: Utc::now(),
                })
            }
        }
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Record new phase lengths. The countdown in progress is untouched;
    /// the new values apply the next time a phase starts over.
    pub fn apply_durations(&mut self, durations: CycleDurations) {
        self.durations = durations;
    }

    /// Advance one second. Returns `Some(Event::PhaseChanged)` on the tick
    /// that reaches 00:00. Idle timers ignore ticks.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        if self.seconds == 0 {
            if self.minutes == 0 {
                return Some(self.expire());
            }
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            self.seconds -= 1;
        }
        if self.minutes == 0 && self.seconds == 0 {
            return Some(self.expire());
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expire(&mut self) -> Event {
        let from = self.phase;
        let to = from.flipped();
        self.state = TimerState::Idle;
        self.phase = to;
        self.minutes = self.durations.minutes_for(to);
        self.seconds = 0;
        tracing::debug!(?from, ?to, "timer phase changed");
        Event::PhaseChanged {
            from,
            to,
            duration_secs: self.remaining_secs(),
            message: to.entry_message().to_string(),
            at: Utc::now(),
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(CycleDurations::default())
    }
}
