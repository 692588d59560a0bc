//! In-memory, process-wide break session state.
//!
//! Owned exclusively by [`super::BreakScheduler`]; mutated only through its
//! operations. Never persisted: it is reset at process start and whenever a
//! break ends or is discarded.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::messages::BreakMessage;

/// Coarse engine phase, reported in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerPhase {
    /// No break scheduled.
    Idle,
    /// A future break time is set.
    Scheduled,
    /// A break has begun but its presentation has not started counting yet.
    CountingDown,
    /// Break in progress (countdown running or paused).
    Active,
}

/// One slot of the within-break message history. Rewinding replays existing
/// entries; advancing creates a new entry only past the end.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub message: BreakMessage,
    pub duration_ms: u64,
}

/// Countdown bookkeeping for the one break that may be in progress.
#[derive(Debug, Clone)]
pub struct ActiveBreak {
    /// Liveness token: async completions check it before applying.
    pub id: Uuid,
    pub total_duration_ms: u64,
    /// Authoritative only while paused; recomputed from `end_at` otherwise.
    pub remaining_ms: u64,
    pub paused: bool,
    /// Absolute countdown deadline. Cleared while paused so wall-clock drift
    /// during the paused interval has no effect.
    pub end_at: Option<DateTime<Utc>>,
    pub started_at: DateTime<Utc>,
    /// Set until the presentation reports its countdown has started.
    pub counting_down: bool,
    pub history: Vec<HistoryEntry>,
    pub cursor: usize,
}

impl ActiveBreak {
    pub fn current_entry(&self) -> &HistoryEntry {
        &self.history[self.cursor]
    }

    pub fn current_message(&self) -> &BreakMessage {
        &self.current_entry().message
    }

    /// Live remaining time, clamped into `[0, total]`.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> u64 {
        if self.paused {
            return self.remaining_ms.min(self.total_duration_ms);
        }
        match self.end_at {
            Some(end) => {
                let left = (end - now).num_milliseconds().max(0) as u64;
                left.min(self.total_duration_ms)
            }
            None => self.remaining_ms.min(self.total_duration_ms),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }
}

/// Process-wide scheduling state.
#[derive(Debug, Default)]
pub struct BreakSession {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub postponed_count: u32,
    pub idle_started_at: Option<DateTime<Utc>>,
    pub lock_started_at: Option<DateTime<Utc>>,
    pub last_tick_at: Option<DateTime<Utc>>,
    pub started_from_manual_trigger: bool,
    pub last_break_completed_at: Option<DateTime<Utc>>,
    pub breaks_completed: u32,
    pub total_rested_ms: u64,
    pub active: Option<ActiveBreak>,
}

impl BreakSession {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn phase(&self) -> SchedulerPhase {
        match (&self.active, self.scheduled_at) {
            (Some(active), _) if active.counting_down => SchedulerPhase::CountingDown,
            (Some(_), _) => SchedulerPhase::Active,
            (None, Some(_)) => SchedulerPhase::Scheduled,
            (None, None) => SchedulerPhase::Idle,
        }
    }

    /// Milliseconds since the last completed (or implicitly completed) break.
    pub fn time_since_last_break_ms(&self, now: DateTime<Utc>) -> Option<u64> {
        self.last_break_completed_at
            .map(|t| (now - t).num_milliseconds().max(0) as u64)
    }

    /// Seconds elapsed since the previous tick; 0 on the first tick.
    pub fn secs_since_last_tick(&self, now: DateTime<Utc>) -> u64 {
        self.last_tick_at
            .map(|t| (now - t).num_seconds().max(0) as u64)
            .unwrap_or(0)
    }

    /// Discard everything; used at process start and on settings resets.
    pub fn reset(&mut self) {
        *self = BreakSession::default();
    }
}

pub(super) fn millis(ms: u64) -> Duration {
    Duration::milliseconds(ms as i64)
}
