mod driver;
mod engine;

pub use driver::{DriveOutcome, TimerDriver};
pub use engine::{CycleDurations, Phase, TimerEngine, TimerState};
