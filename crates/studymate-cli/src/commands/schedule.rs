use clap::Subcommand;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show today's schedule, current task first
    Show,
    /// Append a task to the schedule
    Add { id: String },
    /// Take a task off the schedule (it returns to the pool)
    Remove { id: String },
    /// Replace the schedule with the given order
    Set {
        /// Task IDs in order; unknown or completed IDs are dropped
        ids: Vec<String>,
    },
}

pub fn run(action: ScheduleAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        ScheduleAction::Show => {}
        ScheduleAction::Add { id } => {
            app.add_to_schedule(&id)?;
        }
        ScheduleAction::Remove { id } => {
            app.remove_from_schedule(&id);
        }
        ScheduleAction::Set { ids } => {
            app.set_schedule_order(ids);
        }
    }

    print_json(&app.task_editor().schedule)
}
