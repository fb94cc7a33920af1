//! Long-term goal commands.

use chrono::NaiveDate;
use clap::Subcommand;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a deadline-bound goal
    Add {
        content: String,
        #[arg(long, default_value = "")]
        subject: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        deadline: NaiveDate,
    },
    /// List goals with days remaining
    List,
    /// Delete a goal
    Delete { id: String },
}

pub fn run(action: GoalAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        GoalAction::Add {
            content,
            subject,
            deadline,
        } => {
            let goal = app.create_long_term_task(&subject, &content, deadline)?;
            print_json(&goal)?;
        }
        GoalAction::List => {
            let today = chrono::Local::now().date_naive();
            let goals: Vec<_> = app
                .goals()
                .long_term_tasks
                .into_iter()
                .map(|g| {
                    let days_left = g.days_left(today);
                    serde_json::json!({ "goal": g, "daysLeft": days_left })
                })
                .collect();
            print_json(&goals)?;
        }
        GoalAction::Delete { id } => {
            // Deleting an unknown goal is not an error.
            app.delete_long_term_task(&id);
            println!("Goal deleted: {id}");
        }
    }
    Ok(())
}
