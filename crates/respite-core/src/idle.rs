//! Idle/lock monitor adapter.
//!
//! The engine never queries the OS directly; it consumes an injected
//! [`IdleMonitor`] capability. Hosts wrap whatever platform facility they
//! have (X11 screensaver extension, Wayland idle-notify, session lock
//! signals) behind this trait; headless hosts inject [`NullIdleMonitor`].

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Classification of current user activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdleState {
    Active,
    Idle,
    Locked,
    Unknown,
}

impl IdleState {
    /// The user is not at the machine (idle or locked).
    pub fn is_away(self) -> bool {
        matches!(self, IdleState::Idle | IdleState::Locked)
    }
}

/// OS idle-time query capability.
pub trait IdleMonitor: Send + Sync {
    /// Classify current activity given the configured idle threshold.
    fn idle_state(&self, threshold_secs: u64) -> IdleState;

    /// Seconds since last user input, as reported by the OS.
    fn idle_secs(&self) -> u64;
}

/// Monitor for hosts with no idle facility. Reports `Unknown` and zero idle
/// time, which the engine treats as "not away".
#[derive(Debug, Default, Clone, Copy)]
pub struct NullIdleMonitor;

impl IdleMonitor for NullIdleMonitor {
    fn idle_state(&self, _threshold_secs: u64) -> IdleState {
        IdleState::Unknown
    }

    fn idle_secs(&self) -> u64 {
        0
    }
}

/// Settable monitor for tests.
#[derive(Debug)]
pub struct ManualIdleMonitor {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: IdleState,
    idle_secs: u64,
}

impl Default for ManualIdleMonitor {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: IdleState::Active,
                idle_secs: 0,
            }),
        }
    }
}

impl ManualIdleMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_state(&self, state: IdleState) {
        self.lock().state = state;
    }

    pub fn set_idle_secs(&self, secs: u64) {
        self.lock().idle_secs = secs;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl IdleMonitor for ManualIdleMonitor {
    fn idle_state(&self, threshold_secs: u64) -> IdleState {
        let inner = self.lock();
        match inner.state {
            // A forced state wins; otherwise derive from the reported idle time.
            IdleState::Active if inner.idle_secs >= threshold_secs.max(1) => IdleState::Idle,
            other => other,
        }
    }

    fn idle_secs(&self) -> u64 {
        self.lock().idle_secs
    }
}
