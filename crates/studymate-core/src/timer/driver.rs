//! Real-clock adapter for [`TimerEngine`].
//!
//! Feeds the engine one tick per period from a tokio interval until the
//! phase expires or a stop signal arrives on a `watch` channel.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::TimerEngine;
use crate::events::Event;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Why a drive ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DriveOutcome {
    /// The countdown ran out; carries the phase-change event.
    Expired(Event),
    /// A stop signal arrived (or the engine was stopped from a callback).
    Stopped,
    /// The engine was not running, nothing was driven.
    NotRunning,
}

#[derive(Debug, Clone)]
pub struct TimerDriver {
    period: Duration,
}

impl Default for TimerDriver {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl TimerDriver {
    /// Tick every `period`, at least every millisecond.
    pub fn with_period(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Drive a running engine.
    ///
    /// `stop` is checked before every tick: once `true` is sent (or the
    /// sender is dropped) the engine is stopped and no further tick fires.
    /// `on_tick` sees the engine after each tick.
    pub async fn run<F>(
        &self,
        engine: &mut TimerEngine,
        stop: &mut watch::Receiver<bool>,
        mut on_tick: F,
    ) -> DriveOutcome
    where
        F: FnMut(&TimerEngine),
    {
        if !engine.is_running() {
            return DriveOutcome::NotRunning;
        }
        if *stop.borrow_and_update() {
            engine.stop();
            return DriveOutcome::Stopped;
        }

        let mut ticks = interval_at(Instant::now() + self.period, self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            tokio::select! {
                biased;
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow_and_update() {
                        engine.stop();
                        return DriveOutcome::Stopped;
                    }
                }
                _ = ticks.tick() => {
                    let event = engine.tick();
                    on_tick(engine);
                    if let Some(event) = event {
                        return DriveOutcome::Expired(event);
                    }
                    if !engine.is_running() {
                        return DriveOutcome::Stopped;
                    }
                }
            }
        }
    }
}
