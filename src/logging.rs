use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{FinboardError, Result};
use crate::settings::Settings;

pub const LOG_FILE: &str = "finboard.log";

/// Filter used when `RUST_LOG` is not set.
fn default_directive(settings: &Settings) -> String {
    format!("finboard={}", settings.log_level)
}

/// Send tracing output to `<data_dir>/finboard.log`. The terminal belongs to
/// the TUI, so nothing is written to stdout or stderr.
pub fn init(settings: &Settings) -> Result<PathBuf> {
    let dir = settings.data_path();
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .map_err(|e| FinboardError::Other(format!("logging already initialized: {e}")))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "finboard starting");
    Ok(path)
}
