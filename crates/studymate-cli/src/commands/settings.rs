use clap::Subcommand;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Change settings; omitted values stay as they are
    Set {
        /// Work phase length in minutes
        #[arg(long, allow_negative_numbers = true)]
        pomodoro: Option<i64>,
        /// Break phase length in minutes
        #[arg(long = "break", allow_negative_numbers = true)]
        break_time: Option<i64>,
        /// Background media URL
        #[arg(long)]
        media: Option<String>,
    },
}

pub fn run(action: SettingsAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        SettingsAction::Show => {}
        SettingsAction::Set {
            pomodoro,
            break_time,
            media,
        } => {
            if pomodoro.is_some() || break_time.is_some() {
                let current = app.settings().clone();
                app.update_settings(
                    pomodoro.unwrap_or(i64::from(current.pomodoro_time)),
                    break_time.unwrap_or(i64::from(current.break_time)),
                )?;
            }
            if let Some(url) = media {
                app.set_media_url(&url);
            }
        }
    }

    print_json(&app.settings_view())
}

pub fn daily_goal(slots: i64) -> CliResult {
    let mut app = open_app()?;
    app.set_daily_goal(slots)?;
    print_json(&app.task_editor())
}
