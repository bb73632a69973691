// tripdesk: terminal console for trips, participants, and invites.
// Loads config, starts logging, and runs the event loop on the restored terminal.

mod app;
mod config;
mod domain;
mod error;
mod files;
mod logging;
mod state;
mod ui;

use app::App;
use config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("tripdesk: logging disabled: {}", e);
    }

    let mut app = App::new(&config)?;
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result?;
    tracing::info!("exited");
    Ok(())
}
