//! Read-only screens and the data wipe.

use super::{open_app, print_json, CliResult};

pub fn dashboard() -> CliResult {
    let app = open_app()?;
    print_json(&app.dashboard())
}

pub fn history() -> CliResult {
    let app = open_app()?;
    print_json(&app.history_log())
}

pub fn reset(confirmed: bool) -> CliResult {
    if !confirmed {
        return Err("refusing to delete all data without --yes".into());
    }
    let mut app = open_app()?;
    app.reset_all();
    println!("all data deleted");
    Ok(())
}
