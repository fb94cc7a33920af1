use clap::Subcommand;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's completions and average score
    Today,
    /// Per-day completions and average score, oldest first
    Week {
        #[arg(long, default_value = "7")]
        days: u32,
    },
}

pub fn run(action: StatsAction) -> CliResult {
    let app = open_app()?;
    let stats = app.statistics();

    match action {
        StatsAction::Today => {
            let average = stats.today_average_score();
            print_json(&serde_json::json!({
                "completed": stats.today_completed_count(),
                "goal": stats.goal_progress(app.daily_goal_slots()),
                "averageScore": average,
                "averageDisplay": average.to_string(),
                "streak": app.streak(),
            }))?;
        }
        StatsAction::Week { days } => {
            print_json(&stats.last_n_days(days))?;
        }
    }
    Ok(())
}
