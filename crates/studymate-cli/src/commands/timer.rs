//! Timer commands.
//!
//! The timer is not persisted; `run` drives it in the foreground until the
//! requested number of phases has elapsed or Ctrl-C is pressed.

use std::time::Duration;

use clap::Subcommand;
use studymate_core::{DriveOutcome, Phase, TimerDriver};
use tokio::sync::watch;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print the timer state as JSON
    Status,
    /// Run the countdown in the foreground
    Run {
        /// Number of phases to complete before exiting
        #[arg(long, default_value = "1")]
        cycles: u32,
        /// Tick period in milliseconds
        #[arg(long, default_value = "1000", hide = true)]
        tick_ms: u64,
    },
}

pub fn run(action: TimerAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        TimerAction::Status => print_json(&app.dashboard().timer),
        TimerAction::Run { cycles, tick_ms } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let driver = TimerDriver::with_period(Duration::from_millis(tick_ms.max(1)));

            runtime.block_on(async {
                let (tx, mut stop) = watch::channel(false);
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        let _ = tx.send(true);
                    } else {
                        tx.closed().await;
                    }
                });

                let mut elapsed = 0;
                while elapsed < cycles {
                    if let Some(event) = app.start_timer() {
                        print_json(&event)?;
                    }
                    let outcome = driver
                        .run(app.timer_mut(), &mut stop, |engine| {
                            let label = match engine.phase() {
                                Phase::Work => "work",
                                Phase::Break => "break",
                            };
                            eprint!("\r{label} {}", engine.format_remaining());
                        })
                        .await;
                    eprintln!();

                    match outcome {
                        DriveOutcome::Expired(event) => {
                            print_json(&event)?;
                            elapsed += 1;
                        }
                        DriveOutcome::Stopped | DriveOutcome::NotRunning => {
                            tracing::info!("timer interrupted");
                            break;
                        }
                    }
                }
                print_json(&app.dashboard().timer)
            })
        }
    }
}
