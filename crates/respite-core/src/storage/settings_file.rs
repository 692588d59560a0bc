//! TOML-file settings store.
//!
//! Holds the authoritative in-memory copy of the settings document and
//! mirrors it to disk. In-memory updates are infallible; only `persist` and
//! `set` touch the filesystem.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{CoreError, SettingsError};
use crate::messages::RotationState;
use crate::settings::{Settings, SettingsStore};

pub struct FileSettingsStore {
    path: PathBuf,
    cached: Mutex<Settings>,
}

impl FileSettingsStore {
    /// Open the store at the default location, creating the file with
    /// defaults if it does not exist yet.
    pub fn open_default() -> Result<Self, CoreError> {
        let path = super::config_dir()?.join("settings.toml");
        Self::open(path)
    }

    /// Open the store at `path`, creating the file with defaults if it does
    /// not exist yet. A present-but-unparseable file is an error; silently
    /// replacing a user's document would lose their configuration.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let settings = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                SettingsError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Settings::default();
                write_document(&path, &settings)?;
                settings
            }
            Err(e) => {
                return Err(SettingsError::LoadFailed {
                    path,
                    message: e.to_string(),
                }
                .into())
            }
        };
        Ok(Self {
            path,
            cached: Mutex::new(settings),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Settings> {
        self.cached.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn write_document(path: &Path, settings: &Settings) -> Result<(), CoreError> {
    let content = toml::to_string_pretty(settings).map_err(|e| {
        SettingsError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    std::fs::write(path, content).map_err(|e| {
        SettingsError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    Ok(())
}

impl SettingsStore for FileSettingsStore {
    fn get(&self) -> Settings {
        self.lock().clone()
    }

    fn set(&self, settings: &Settings) -> Result<(), CoreError> {
        *self.lock() = settings.clone();
        write_document(&self.path, settings)
    }

    fn set_rotation(&self, rotation: &RotationState) {
        self.lock().messages.rotation = rotation.clone();
    }

    fn persist(&self) -> Result<(), CoreError> {
        let snapshot = self.lock().clone();
        write_document(&self.path, &snapshot)
    }
}
