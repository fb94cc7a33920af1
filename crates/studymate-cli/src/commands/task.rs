//! Task management commands for CLI.

use clap::Subcommand;
use studymate_core::task::parse_planned_slots;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task (unscheduled)
    Add {
        /// What to study
        content: String,
        /// Subject / category (default: other)
        #[arg(long, default_value = "")]
        subject: String,
        /// Planned work slots; anything below 1 becomes 1
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        slots: String,
    },
    /// List unscheduled and scheduled open tasks
    List,
    /// Complete a task with a self-assessment grade
    Complete {
        /// Task ID
        id: String,
        /// AA, A, B, C or D
        #[arg(long)]
        grade: Option<String>,
    },
    /// Delete an open task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        TaskAction::Add {
            content,
            subject,
            slots,
        } => {
            let task = app.create_task(&subject, &content, parse_planned_slots(&slots))?;
            print_json(&task)?;
        }
        TaskAction::List => {
            print_json(&app.task_editor())?;
        }
        TaskAction::Complete { id, grade } => {
            let event = app.complete_task(&id, grade.as_deref())?;
            print_json(&event)?;
        }
        TaskAction::Delete { id } => {
            if app.delete_task(&id) {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
    }
    Ok(())
}
