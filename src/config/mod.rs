//! Configuration module for askweb
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;

/// Locations searched for a settings file, in order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/askweb/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("askweb/settings.yml"));
    }
    paths
}

/// Load settings from file or use defaults, then apply environment overrides.
///
/// Returns the file the settings came from, if any.
pub fn load() -> Result<(Settings, Option<PathBuf>)> {
    let explicit = std::env::var("ASKWEB_SETTINGS_PATH")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.exists());

    let found = explicit.or_else(|| default_paths().into_iter().find(|p| p.exists()));

    let mut settings = match found {
        Some(ref path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    settings.merge_env();
    Ok((settings, found))
}
