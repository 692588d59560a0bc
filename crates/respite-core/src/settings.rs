//! Application settings.
//!
//! Serialized to/from TOML at `~/.config/respite/settings.toml` by the
//! file-backed store in [`crate::storage`]. The engine consumes settings only
//! through the [`SettingsStore`] trait injected at construction, and writes
//! back only the rotation-state fields via the non-resetting
//! [`SettingsStore::set_rotation`] path.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::hours::WorkingHours;
use crate::messages::{BreakMessage, RotationState, SelectionMode};

/// How a break is presented to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Full popup with a countdown the user interacts with.
    #[default]
    Popup,
    /// Brief OS notification; the break completes immediately.
    Notification,
}

/// Break cadence and duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_frequency_secs")]
    pub frequency_secs: u64,
    #[serde(default = "default_length_secs")]
    pub length_secs: u64,
    #[serde(default = "default_postpone_length_secs")]
    pub postpone_length_secs: u64,
    /// 0 means unlimited postpones.
    #[serde(default)]
    pub postpone_limit: u32,
    #[serde(default)]
    pub presentation: PresentationMode,
}

/// Idle detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdleSettings {
    #[serde(default = "default_true")]
    pub monitor_enabled: bool,
    /// Inactivity long enough to implicitly count as a break.
    #[serde(default = "default_idle_reset_secs")]
    pub reset_secs: u64,
}

/// Break start/end sounds. Playback itself is an external collaborator; the
/// engine only broadcasts which sound to play at what volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_sound")]
    pub sound: String,
    #[serde(default = "default_volume")]
    pub volume: u32,
}

/// Message pool and rotation bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageSettings {
    #[serde(default)]
    pub selection: SelectionMode,
    #[serde(default)]
    pub pool: Vec<BreakMessage>,
    #[serde(default)]
    pub rotation: RotationState,
}

/// The whole settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub breaks: BreakSettings,
    #[serde(default)]
    pub idle: IdleSettings,
    #[serde(default)]
    pub sound: SoundSettings,
    #[serde(default)]
    pub messages: MessageSettings,
    #[serde(default)]
    pub working_hours: WorkingHours,
}

fn default_true() -> bool {
    true
}
fn default_frequency_secs() -> u64 {
    25 * 60
}
fn default_length_secs() -> u64 {
    2 * 60
}
fn default_postpone_length_secs() -> u64 {
    5 * 60
}
fn default_idle_reset_secs() -> u64 {
    5 * 60
}
fn default_sound() -> String {
    "crystal-glass".into()
}
fn default_volume() -> u32 {
    50
}

impl Default for BreakSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_secs: default_frequency_secs(),
            length_secs: default_length_secs(),
            postpone_length_secs: default_postpone_length_secs(),
            postpone_limit: 0,
            presentation: PresentationMode::Popup,
        }
    }
}

impl Default for IdleSettings {
    fn default() -> Self {
        Self {
            monitor_enabled: true,
            reset_secs: default_idle_reset_secs(),
        }
    }
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: default_sound(),
            volume: default_volume(),
        }
    }
}

impl Settings {
    /// Break frequency with the zero-value guard applied. A zero frequency
    /// would produce a tight infinite-reschedule loop, so it clamps to 1.
    pub fn break_frequency_secs(&self) -> u64 {
        self.breaks.frequency_secs.max(1)
    }

    pub fn break_length_secs(&self) -> u64 {
        self.breaks.length_secs.max(1)
    }

    pub fn postpone_length_secs(&self) -> u64 {
        self.breaks.postpone_length_secs.max(1)
    }

    pub fn idle_reset_secs(&self) -> u64 {
        self.idle.reset_secs.max(1)
    }

    /// Read a value as a string by dot-separated key, e.g.
    /// `breaks.frequency_secs`.
    pub fn get_path(&self, key: &str) -> Option<String> {
        let doc = serde_json::to_value(self).ok()?;
        let mut current = &doc;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value by dot-separated key, preserving the existing value's
    /// type. Unknown keys and unparseable values are rejected.
    pub fn set_path(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let unknown = || {
            CoreError::Validation(ValidationError::UnknownKey(key.to_string()))
        };
        let mut doc = serde_json::to_value(&*self)?;
        let mut current = &mut doc;
        let mut parts = key.split('.').peekable();
        loop {
            let part = parts.next().ok_or_else(unknown)?;
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;
                let parsed = parse_as(existing, value).map_err(|message| {
                    CoreError::Validation(ValidationError::InvalidValue {
                        field: key.to_string(),
                        message,
                    })
                })?;
                obj.insert(part.to_string(), parsed);
                break;
            }
            current = current.get_mut(part).ok_or_else(unknown)?;
        }
        *self = serde_json::from_value(doc)?;
        Ok(())
    }
}

fn parse_as(existing: &serde_json::Value, value: &str) -> Result<serde_json::Value, String> {
    match existing {
        serde_json::Value::Bool(_) => value
            .parse::<bool>()
            .map(serde_json::Value::Bool)
            .map_err(|_| format!("cannot parse '{value}' as bool")),
        serde_json::Value::Number(_) => {
            if let Ok(n) = value.parse::<u64>() {
                Ok(serde_json::Value::Number(n.into()))
            } else if let Ok(n) = value.parse::<i64>() {
                Ok(serde_json::Value::Number(n.into()))
            } else {
                Err(format!("cannot parse '{value}' as number"))
            }
        }
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            serde_json::from_str(value).map_err(|e| e.to_string())
        }
        _ => Ok(serde_json::Value::String(value.to_string())),
    }
}

/// Settings collaborator consumed by the engine.
///
/// `get` is a synchronous read of the current, already-defaulted document.
/// `set_rotation` is the in-memory commit of a selection decision; it must
/// never fail, because the selection it records already took effect.
/// `persist` flushes the current document to durable storage and is the only
/// fallible step; callers treat its errors as best-effort (log and swallow).
pub trait SettingsStore: Send + Sync {
    fn get(&self) -> Settings;

    /// Replace the whole document (in memory and durably).
    fn set(&self, settings: &Settings) -> Result<(), CoreError>;

    /// Non-resetting write of the rotation-state fields only.
    fn set_rotation(&self, rotation: &RotationState);

    /// Flush the current document to durable storage.
    fn persist(&self) -> Result<(), CoreError>;
}

/// In-memory store for tests and embedded hosts.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: Mutex<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(settings),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Settings> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self) -> Settings {
        self.lock().clone()
    }

    fn set(&self, settings: &Settings) -> Result<(), CoreError> {
        *self.lock() = settings.clone();
        Ok(())
    }

    fn set_rotation(&self, rotation: &RotationState) {
        self.lock().messages.rotation = rotation.clone();
    }

    fn persist(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
