//! Durable storage for the settings document.

mod settings_file;

pub use settings_file::FileSettingsStore;

use std::path::PathBuf;

use crate::error::SettingsError;

/// Returns `~/.config/respite[-dev]/` based on RESPITE_ENV.
///
/// Set RESPITE_ENV=dev to use a separate development data directory.
pub fn config_dir() -> Result<PathBuf, SettingsError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RESPITE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("respite-dev")
    } else {
        base_dir.join("respite")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| SettingsError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
