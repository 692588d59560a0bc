use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::messages::BreakMessage;
use crate::timer::SchedulerPhase;

/// Every externally visible state change produces an Event.
/// Hosts subscribe through [`crate::BreakService::subscribe`]; the broadcast
/// channel is the only way engine state changes leave the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    BreakScheduled {
        scheduled_at: DateTime<Utc>,
        postponed: bool,
        at: DateTime<Utc>,
    },
    BreakStarted {
        /// Absent in simple-notification mode, where no countdown runs.
        end_timestamp: Option<DateTime<Utc>>,
        total_duration_ms: u64,
        at: DateTime<Utc>,
    },
    BreakPaused {
        remaining_ms: u64,
        total_duration_ms: u64,
        at: DateTime<Utc>,
    },
    BreakResumed {
        end_timestamp: DateTime<Utc>,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    BreakEnded {
        at: DateTime<Utc>,
    },
    MessageUpdated {
        message: BreakMessage,
        has_previous: bool,
        has_next: bool,
        at: DateTime<Utc>,
    },
    SoundStart {
        sound: String,
        volume: u32,
        at: DateTime<Utc>,
    },
    SoundEnd {
        sound: String,
        volume: u32,
        at: DateTime<Utc>,
    },
    /// An idle period long enough to count as an implicit break was closed.
    IdleReset {
        away_secs: u64,
        at: DateTime<Utc>,
    },
    /// Point-in-time state for hosts that render without replaying the stream.
    StateSnapshot {
        phase: SchedulerPhase,
        scheduled_at: Option<DateTime<Utc>>,
        remaining_ms: Option<u64>,
        total_duration_ms: Option<u64>,
        paused: bool,
        postponed_count: u32,
        at: DateTime<Utc>,
    },
}
