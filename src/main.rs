mod cli;
mod error;
mod fmt;
mod logging;
mod models;
mod reports;
mod session;
mod settings;
mod state;
mod store;
mod tui;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let settings = settings::load_settings();

    let result = match cli.command {
        Some(Commands::Init { data_dir }) => cli::init::run(data_dir),
        Some(Commands::Categories) => cli::categories::list(),
        Some(Commands::Demo) => {
            start_logging(&settings);
            cli::demo::run_demo(&settings)
        }
        None => {
            start_logging(&settings);
            cli::app::start(&settings)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}

/// The TUI owns the terminal, so logs go to a file. A failure here only
/// costs the log.
fn start_logging(settings: &settings::Settings) {
    if let Err(e) = logging::init(settings) {
        eprintln!("{} {e}", "Warning: logging disabled:".yellow());
    }
}
