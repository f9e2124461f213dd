use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::Result;
use crate::logging::LOG_FILE;
use crate::settings::{load_settings_from, save_settings_to, settings_path, shellexpand_path, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let path = settings_path();
    let settings = init_at(&path, data_dir)?;
    println!("{} {}", "Settings written to".green(), path.display());
    println!(
        "Log file: {}",
        PathBuf::from(&settings.data_dir).join(LOG_FILE).display()
    );
    Ok(())
}

/// Write settings (keeping any existing values) and create the data directory.
fn init_at(path: &Path, data_dir: Option<String>) -> Result<Settings> {
    let mut settings = load_settings_from(path);
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }

    save_settings_to(&settings, path)?;
    std::fs::create_dir_all(settings.data_path())?;
    tracing::info!(data_dir = %settings.data_dir, "initialized");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_settings_and_creates_data_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cfg").join("settings.json");
        let data = tmp.path().join("data");

        let settings = init_at(&path, Some(data.to_string_lossy().to_string())).unwrap();
        assert!(path.exists());
        assert!(data.is_dir());

        let reloaded = load_settings_from(&path);
        assert_eq!(reloaded.data_dir, settings.data_dir);
        assert_eq!(reloaded.log_level, "info");
    }

    #[test]
    fn keeps_existing_values_without_flag() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        let mut existing = Settings::default();
        existing.data_dir = tmp.path().join("d").to_string_lossy().to_string();
        existing.log_level = "debug".into();
        save_settings_to(&existing, &path).unwrap();

        let settings = init_at(&path, None).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.data_dir, existing.data_dir);
    }
}
