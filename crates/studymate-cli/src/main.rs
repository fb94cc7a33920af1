use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studymate", version, about = "Study Mate CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's overview: current task, timer, goal, score trend
    Dashboard,
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Long-term goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Today's schedule
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Set how many tasks to complete today
    DailyGoal {
        #[arg(allow_negative_numbers = true)]
        slots: i64,
    },
    /// Completion history, newest first
    History,
    /// Completion statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Focus timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Study settings (timer durations, media)
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Delete all saved data
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging();

    let result = match cli.command {
        Commands::Dashboard => commands::views::dashboard(),
        Commands::Task { action } => commands::task::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::DailyGoal { slots } => commands::settings::daily_goal(slots),
        Commands::History => commands::views::history(),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset { yes } => commands::views::reset(yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
