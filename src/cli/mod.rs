pub mod app;
pub mod auth;
pub mod avatar;
pub mod categories;
pub mod dashboard;
pub mod demo;
pub mod editor;
pub mod init;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "finboard",
    version,
    about = "Personal finance dashboard for the terminal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the settings file and create the data directory.
    Init {
        /// Where the log file goes (default: ~/.local/share/finboard)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Open the dashboard signed in as a demo user with sample transactions.
    Demo,
    /// List the transaction categories.
    Categories,
}
