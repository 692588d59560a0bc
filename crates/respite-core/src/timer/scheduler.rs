//! The break scheduling state machine.
//!
//! A wall-clock-based engine with no internal threads: the host invokes
//! [`BreakScheduler::tick`] on a fixed period (one second in practice) and
//! calls the operation methods from its request boundary. The host is
//! responsible for serializing tick and operations onto one logical execution
//! context; the scheduler itself is a plain `&mut self` state machine.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Scheduled -> CountingDown -> Active -> Idle
//!           ^    |                       |
//!           |    +-- (idle/lock/sleep) --+-- (postpone/skip/end)
//! ```
//!
//! Timing anomalies are always recomputed from absolute timestamps, never
//! from accumulated deltas, so overlapping or delayed tick callbacks cannot
//! compound errors.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::session::{millis, ActiveBreak, BreakSession, HistoryEntry};
use crate::clock::Clock;
use crate::collaborators::Notifier;
use crate::events::Event;
use crate::hours::is_within_working_hours;
use crate::idle::{IdleMonitor, IdleState};
use crate::messages::{select_next, BreakMessage};
use crate::settings::{PresentationMode, Settings, SettingsStore};

/// How a break is being deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostponeKind {
    /// Defer by the shorter postpone interval.
    Snoozed,
    /// Defer by the normal full frequency interval.
    Skipped,
}

/// A break that began in-memory but still has follow-up work the host must
/// drive: flushing rotation state and, for popup breaks, creating windows
/// after re-validating liveness.
#[derive(Debug, Clone, Copy)]
pub struct PendingBreak {
    /// Present for popup breaks; checked against the active break after the
    /// awaited persistence so a stale start is discarded, not applied.
    pub break_id: Option<Uuid>,
    /// The selection advanced the rotation state; flush it best-effort.
    pub persist_rotation: bool,
}

/// Result of one tick.
#[derive(Debug, Default)]
pub struct TickOutcome {
    pub events: Vec<Event>,
    pub begin: Option<PendingBreak>,
}

/// The engine. Owns the one process-wide [`BreakSession`]; every mutation
/// funnels through these methods.
pub struct BreakScheduler {
    store: Arc<dyn SettingsStore>,
    idle: Arc<dyn IdleMonitor>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    session: BreakSession,
}

impl BreakScheduler {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        idle: Arc<dyn IdleMonitor>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            idle,
            clock,
            notifier,
            session: BreakSession::default(),
        }
    }

    pub fn session(&self) -> &BreakSession {
        &self.session
    }

    /// Point-in-time state for hosts.
    pub fn snapshot(&self) -> Event {
        let now = self.clock.now();
        let active = self.session.active.as_ref();
        Event::StateSnapshot {
            phase: self.session.phase(),
            scheduled_at: self.session.scheduled_at,
            remaining_ms: active.map(|a| a.remaining_at(now)),
            total_duration_ms: active.map(|a| a.total_duration_ms),
            paused: active.map(|a| a.paused).unwrap_or(false),
            postponed_count: self.session.postponed_count,
            at: now,
        }
    }

    // ── Scheduling ───────────────────────────────────────────────────

    /// Set the next break time: `postpone_length` from now when postponing,
    /// the full frequency otherwise. Both intervals are guarded to >= 1s.
    ///
    /// A pending idle window resolves here: it counts as an implicit
    /// completed break, announced through the notifier.
    pub fn schedule_next_break(&mut self, postpone: bool) -> Vec<Event> {
        let now = self.clock.now();
        let settings = self.store.get();
        let mut events = Vec::new();

        if let Some(idle_start) = self.session.idle_started_at.take() {
            let away_secs = (now - idle_start).num_seconds().max(0) as u64;
            self.notifier.notify(
                "Welcome back",
                &format!("You were away for about {}.", humanize_secs(away_secs)),
            );
            self.session.postponed_count = 0;
            self.session.last_break_completed_at = Some(now);
            events.push(Event::IdleReset {
                away_secs,
                at: now,
            });
        }

        let interval_secs = if postpone {
            settings.postpone_length_secs()
        } else {
            settings.break_frequency_secs()
        };
        let scheduled_at = now + Duration::seconds(interval_secs as i64);
        self.session.scheduled_at = Some(scheduled_at);
        events.push(Event::BreakScheduled {
            scheduled_at,
            postponed: postpone,
            at: now,
        });
        events
    }

    /// Periodic drive entry point.
    ///
    /// `last_tick_at` is stamped unconditionally after the body runs, so gap
    /// detection always measures real elapsed wall-clock time. The body has
    /// no panicking paths; every failure mode is normalized or logged.
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.now();
        let (events, begin) = self.tick_inner(now);
        self.session.last_tick_at = Some(now);
        TickOutcome { events, begin }
    }

    fn tick_inner(&mut self, now: DateTime<Utc>) -> (Vec<Event>, Option<PendingBreak>) {
        let settings = self.store.get();
        let mut events = Vec::new();
        let gap_secs = self.session.secs_since_last_tick(now);
        let freq_secs = settings.break_frequency_secs();

        let idle_state = if settings.idle.monitor_enabled {
            self.idle.idle_state(settings.idle_reset_secs())
        } else {
            IdleState::Unknown
        };

        // Lock bookkeeping. Leaving a lock folds the span into the idle
        // window: a locked machine is an away machine.
        match idle_state {
            IdleState::Locked => {
                if self.session.lock_started_at.is_none() {
                    self.session.lock_started_at = Some(now);
                }
            }
            _ => {
                if let Some(lock_start) = self.session.lock_started_at.take() {
                    if self.session.idle_started_at.is_none() {
                        self.session.idle_started_at = Some(lock_start);
                    }
                }
            }
        }

        // Anomaly detection, in priority order.
        if self
            .session
            .lock_started_at
            .is_some_and(|t| (now - t).num_seconds().max(0) as u64 > freq_secs)
        {
            // Locked through an entire break cycle: the system was not
            // "away", nothing meaningful to report.
            self.session.lock_started_at = None;
            self.session.idle_started_at = None;
        } else if gap_secs > freq_secs {
            // The tick driver was unresponsive for longer than a full cycle;
            // treat as system sleep. A pre-sleep deadline is meaningless
            // after waking.
            self.session.lock_started_at = None;
            self.session.scheduled_at = None;
        } else if gap_secs > settings.idle_reset_secs()
            && self.session.idle_started_at.is_none()
        {
            // The gap happened between ticks: anchor at the previous tick.
            self.session.idle_started_at = self.session.last_tick_at;
            self.session.scheduled_at = None;
        }

        // Natural countdown completion.
        let countdown_done = self
            .session
            .active
            .as_ref()
            .is_some_and(|a| !a.paused && a.end_at.is_some_and(|end| now >= end));
        if countdown_done {
            events.extend(self.complete_active_break(now));
            return (events, None);
        }
        if self.session.is_active() {
            return (events, None);
        }

        let should_have_break = settings.breaks.enabled
            && is_within_working_hours(&self.clock.now_local(), &settings.working_hours)
            && !idle_state.is_away();

        if !should_have_break && self.session.scheduled_at.is_some() {
            if idle_state == IdleState::Idle {
                // Back-calculate from the OS-reported duration; idle
                // detection is not continuous, so this attributes the window
                // accurately.
                let idle_secs = self.idle.idle_secs();
                self.session.idle_started_at = Some(now - Duration::seconds(idle_secs as i64));
            }
            // No break while away, disabled, or outside working hours.
            self.session.scheduled_at = None;
        }

        if should_have_break {
            match self.session.scheduled_at {
                None => {
                    // Scheduling takes priority over firing within one tick,
                    // so a fresh schedule always gets its full interval.
                    events.extend(self.schedule_next_break(false));
                }
                Some(at) if now > at => {
                    let (begin_events, pending) = self.begin_break(false);
                    events.extend(begin_events);
                    return (events, pending);
                }
                Some(_) => {}
            }
        }

        (events, None)
    }

    // ── Break lifecycle ──────────────────────────────────────────────

    /// Begin a break immediately, outside the normal schedule.
    pub fn start_break_now(&mut self) -> (Vec<Event>, Option<PendingBreak>) {
        if self.session.is_active() {
            debug!("start ignored: break already active");
            return (Vec::new(), None);
        }
        self.begin_break(true)
    }

    fn begin_break(&mut self, manual: bool) -> (Vec<Event>, Option<PendingBreak>) {
        let now = self.clock.now();
        let settings = self.store.get();
        let mut events = Vec::new();

        let selection = {
            let mut rng = rand::thread_rng();
            select_next(
                &mut rng,
                &settings.messages.pool,
                settings.messages.selection,
                &settings.messages.rotation,
            )
        };
        let persist_rotation = selection.rotation.is_some();
        if let Some(rotation) = &selection.rotation {
            // In-memory commit. The durable flush is the host's best-effort
            // follow-up and must not re-trigger a schedule reset.
            self.store.set_rotation(rotation);
        }

        let duration_ms = effective_duration_ms(&selection.message, &settings);
        self.session.scheduled_at = None;
        self.session.started_from_manual_trigger = manual;

        if settings.breaks.presentation == PresentationMode::Notification {
            // Simple notification mode: announce, complete synchronously,
            // resume scheduling. No countdown state persists.
            self.notifier.notify("Time for a break", &selection.message.text);
            events.push(Event::BreakStarted {
                end_timestamp: None,
                total_duration_ms: duration_ms,
                at: now,
            });
            if settings.sound.enabled {
                events.push(Event::SoundStart {
                    sound: settings.sound.sound.clone(),
                    volume: settings.sound.volume,
                    at: now,
                });
            }
            self.session.breaks_completed += 1;
            self.session.last_break_completed_at = Some(now);
            self.session.postponed_count = 0;
            self.session.started_from_manual_trigger = false;
            events.extend(self.schedule_next_break(false));
            let pending = persist_rotation.then_some(PendingBreak {
                break_id: None,
                persist_rotation: true,
            });
            return (events, pending);
        }

        let id = Uuid::new_v4();
        let end_at = now + millis(duration_ms);
        self.session.active = Some(ActiveBreak {
            id,
            total_duration_ms: duration_ms,
            remaining_ms: duration_ms,
            paused: false,
            end_at: Some(end_at),
            started_at: now,
            counting_down: true,
            history: vec![HistoryEntry {
                message: selection.message.clone(),
                duration_ms,
            }],
            cursor: 0,
        });
        events.push(Event::BreakStarted {
            end_timestamp: Some(end_at),
            total_duration_ms: duration_ms,
            at: now,
        });
        events.push(Event::MessageUpdated {
            message: selection.message,
            has_previous: false,
            has_next: true,
            at: now,
        });
        if settings.sound.enabled {
            events.push(Event::SoundStart {
                sound: settings.sound.sound.clone(),
                volume: settings.sound.volume,
                at: now,
            });
        }
        (
            events,
            Some(PendingBreak {
                break_id: Some(id),
                persist_rotation,
            }),
        )
    }

    /// True iff the given break is still the active one. Hosts call this
    /// after awaiting persistence: a postpone/skip/end that arrived in the
    /// meantime invalidates the in-progress start.
    pub fn confirm_break(&self, id: Uuid) -> bool {
        self.session.active.as_ref().is_some_and(|a| a.id == id)
    }

    /// The presentation reports its countdown has started. Restarts the
    /// deadline from the full duration so window-creation latency never
    /// shaves seconds off the break.
    pub fn start_countdown(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let Some(active) = self.session.active.as_mut() else {
            debug!("start-countdown ignored: no active break");
            return Vec::new();
        };
        if !active.counting_down {
            return Vec::new();
        }
        active.counting_down = false;
        active.remaining_ms = active.total_duration_ms;
        if active.paused {
            // Paused before the window came up: stay paused at the full
            // duration; resume will arm the deadline.
            return Vec::new();
        }
        let end = now + millis(active.total_duration_ms);
        active.end_at = Some(end);
        vec![Event::BreakStarted {
            end_timestamp: Some(end),
            total_duration_ms: active.total_duration_ms,
            at: now,
        }]
    }

    /// Idempotent: clears all active-break bookkeeping, resets the postpone
    /// counter, and schedules the next normal break unless one is already
    /// scheduled (e.g. from a postpone issued while the break was closing).
    pub fn end_break(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let settings = self.store.get();
        let mut events = Vec::new();
        if self.session.active.take().is_some() {
            if settings.sound.enabled {
                events.push(Event::SoundEnd {
                    sound: settings.sound.sound.clone(),
                    volume: settings.sound.volume,
                    at: now,
                });
            }
            events.push(Event::BreakEnded { at: now });
        }
        self.session.postponed_count = 0;
        self.session.started_from_manual_trigger = false;
        if self.session.scheduled_at.is_none() {
            events.extend(self.schedule_next_break(false));
        }
        events
    }

    /// The countdown reached zero (or was adjusted to zero): record the
    /// honored break and close it.
    fn complete_active_break(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let rested = self
            .session
            .active
            .as_ref()
            .map(|a| (now - a.started_at).num_milliseconds().max(0) as u64)
            .unwrap_or(0);
        self.session.breaks_completed += 1;
        self.session.total_rested_ms += rested;
        self.session.last_break_completed_at = Some(now);
        self.end_break()
    }

    /// Defer the current break. Rejected as a logged no-op once the
    /// configured limit is reached; `allow_postpone` surfaces that state.
    pub fn postpone(&mut self, kind: PostponeKind) -> Vec<Event> {
        let now = self.clock.now();
        let limit = self.store.get().breaks.postpone_limit;
        if limit > 0 && self.session.postponed_count >= limit {
            debug!(?kind, limit, "postpone rejected: limit reached");
            return Vec::new();
        }
        self.session.postponed_count += 1;
        let mut events = Vec::new();
        if self.session.active.take().is_some() {
            events.push(Event::BreakEnded { at: now });
        }
        self.session.started_from_manual_trigger = false;
        events.extend(self.schedule_next_break(kind == PostponeKind::Snoozed));
        events
    }

    pub fn allow_postpone(&self) -> bool {
        let limit = self.store.get().breaks.postpone_limit;
        limit == 0 || self.session.postponed_count < limit
    }

    // ── Countdown control ────────────────────────────────────────────

    /// Capture the live remaining time and stop the clock. Calling pause
    /// while already paused returns the current remaining time unchanged.
    pub fn pause(&mut self) -> (Option<u64>, Vec<Event>) {
        let now = self.clock.now();
        let Some(active) = self.session.active.as_mut() else {
            debug!("pause ignored: no active break");
            return (None, Vec::new());
        };
        if active.paused {
            return (Some(active.remaining_ms), Vec::new());
        }
        active.remaining_ms = active.remaining_at(now);
        active.paused = true;
        active.end_at = None;
        let event = Event::BreakPaused {
            remaining_ms: active.remaining_ms,
            total_duration_ms: active.total_duration_ms,
            at: now,
        };
        (Some(active.remaining_ms), vec![event])
    }

    /// Recompute a fresh deadline from the captured remaining time.
    pub fn resume(&mut self) -> (Option<u64>, Vec<Event>) {
        let now = self.clock.now();
        let Some(active) = self.session.active.as_mut() else {
            debug!("resume ignored: no active break");
            return (None, Vec::new());
        };
        if !active.paused {
            return (Some(active.remaining_at(now)), Vec::new());
        }
        active.paused = false;
        let end = now + millis(active.remaining_ms);
        active.end_at = Some(end);
        let event = Event::BreakResumed {
            end_timestamp: end,
            remaining_ms: active.remaining_ms,
            at: now,
        };
        (Some(active.remaining_ms), vec![event])
    }

    /// Apply a signed delta to the active break's duration. Total duration
    /// floors at 1s; remaining clamps into `[0, total]`. Driving remaining
    /// to 0 is an immediate natural completion, not an error.
    pub fn adjust_duration(&mut self, delta_ms: i64) -> (Option<u64>, Vec<Event>) {
        let now = self.clock.now();
        let Some(active) = self.session.active.as_mut() else {
            debug!("adjust-duration ignored: no active break");
            return (None, Vec::new());
        };
        let live = active.remaining_at(now) as i64;
        let total = (active.total_duration_ms as i64)
            .saturating_add(delta_ms)
            .max(1000) as u64;
        let remaining = live.saturating_add(delta_ms).clamp(0, total as i64) as u64;
        active.total_duration_ms = total;
        active.remaining_ms = remaining;
        if !active.paused {
            active.end_at = Some(now + millis(remaining));
        }
        if remaining == 0 {
            let events = self.complete_active_break(now);
            return (Some(0), events);
        }
        (Some(remaining), Vec::new())
    }

    // ── Message navigation ───────────────────────────────────────────

    /// Move forward: replay history if the user had rewound, otherwise pull
    /// a genuinely new message from the selection pipeline and append it.
    /// Returns whether the rotation state changed and needs flushing.
    pub fn advance_message(&mut self) -> (Vec<Event>, bool) {
        let now = self.clock.now();
        let settings = self.store.get();
        let Some(active) = self.session.active.as_mut() else {
            debug!("next-message ignored: no active break");
            return (Vec::new(), false);
        };
        let mut persist_rotation = false;
        if active.cursor + 1 < active.history.len() {
            active.cursor += 1;
        } else {
            let selection = {
                let mut rng = rand::thread_rng();
                select_next(
                    &mut rng,
                    &settings.messages.pool,
                    settings.messages.selection,
                    &settings.messages.rotation,
                )
            };
            if let Some(rotation) = &selection.rotation {
                self.store.set_rotation(rotation);
                persist_rotation = true;
            }
            let duration_ms = effective_duration_ms(&selection.message, &settings);
            active.history.push(HistoryEntry {
                message: selection.message,
                duration_ms,
            });
            active.cursor += 1;
        }
        (vec![Self::show_current_entry(active, now)], persist_rotation)
    }

    /// Move the history cursor back one slot. No-op at the first entry.
    pub fn rewind_message(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let Some(active) = self.session.active.as_mut() else {
            debug!("previous-message ignored: no active break");
            return Vec::new();
        };
        if active.cursor == 0 {
            debug!("previous-message ignored: already at first message");
            return Vec::new();
        }
        active.cursor -= 1;
        vec![Self::show_current_entry(active, now)]
    }

    fn show_current_entry(active: &mut ActiveBreak, now: DateTime<Utc>) -> Event {
        let duration_ms = active.current_entry().duration_ms;
        let message = active.current_message().clone();
        // Navigation restarts the countdown with the entry's effective
        // duration, honoring per-message overrides.
        active.total_duration_ms = duration_ms;
        active.remaining_ms = duration_ms;
        if !active.paused {
            active.end_at = Some(now + millis(duration_ms));
        }
        Event::MessageUpdated {
            message,
            has_previous: active.has_previous(),
            has_next: true,
            at: now,
        }
    }

    // ── Queries and tracking ─────────────────────────────────────────

    pub fn current_message(&self) -> Option<(BreakMessage, bool, bool)> {
        self.session
            .active
            .as_ref()
            .map(|a| (a.current_message().clone(), a.has_previous(), true))
    }

    pub fn time_since_last_break_ms(&self) -> Option<u64> {
        self.session.time_since_last_break_ms(self.clock.now())
    }

    pub fn was_started_from_manual_trigger(&self) -> bool {
        self.session.started_from_manual_trigger
    }

    pub fn break_length_secs(&self) -> u64 {
        self.store.get().break_length_secs()
    }

    /// A presentation surface reports how long the user actually rested.
    pub fn complete_break_tracking(&mut self, duration_ms: u64) {
        let now = self.clock.now();
        self.session.breaks_completed += 1;
        self.session.total_rested_ms += duration_ms;
        self.session.last_break_completed_at = Some(now);
    }

    // ── Reconfiguration ──────────────────────────────────────────────

    pub fn on_settings_changed(&mut self, settings: &Settings) {
        if settings.breaks.postpone_limit == 0 {
            // Reconfiguring the limit to unlimited clears the counter.
            self.session.postponed_count = 0;
        }
    }

    /// Discard any active break and pending schedule, then start a fresh
    /// cycle. Used when settings are written with `reset_breaks`.
    pub fn reset_breaks(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let mut events = Vec::new();
        if self.session.active.take().is_some() {
            events.push(Event::BreakEnded { at: now });
        }
        self.session.reset();
        events.extend(self.schedule_next_break(false));
        events
    }
}

fn effective_duration_ms(message: &BreakMessage, settings: &Settings) -> u64 {
    let secs = message
        .duration_secs
        .filter(|&d| d > 0)
        .unwrap_or_else(|| settings.break_length_secs());
    secs.max(1).saturating_mul(1000)
}

fn humanize_secs(secs: u64) -> String {
    match secs {
        s if s >= 120 => format!("{} minutes", s / 60),
        s if s >= 60 => "a minute".to_string(),
        s => format!("{s} seconds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::collaborators::NullNotifier;
    use crate::idle::ManualIdleMonitor;
    use crate::settings::MemorySettingsStore;
    use chrono::TimeZone;

    fn start_instant() -> DateTime<Utc> {
        // A Monday morning.
        Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
    }

    fn scheduler(settings: Settings) -> (BreakScheduler, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start_instant()));
        let engine = BreakScheduler::new(
            Arc::new(MemorySettingsStore::new(settings)),
            Arc::new(ManualIdleMonitor::new()),
            clock.clone(),
            Arc::new(NullNotifier),
        );
        (engine, clock)
    }

    #[test]
    fn zero_frequency_clamps_to_one_second() {
        let mut settings = Settings::default();
        settings.breaks.frequency_secs = 0;
        let (mut engine, _clock) = scheduler(settings);
        engine.schedule_next_break(false);
        let at = engine.session().scheduled_at.unwrap();
        assert_eq!(at, start_instant() + Duration::seconds(1));
    }

    #[test]
    fn first_tick_schedules_without_firing() {
        let (mut engine, _clock) = scheduler(Settings::default());
        let outcome = engine.tick();
        assert!(engine.session().scheduled_at.is_some());
        assert!(outcome.begin.is_none());
        assert!(!engine.session().is_active());
    }

    #[test]
    fn postpone_limit_rejects_excess() {
        let mut settings = Settings::default();
        settings.breaks.postpone_limit = 2;
        let (mut engine, _clock) = scheduler(settings);
        assert!(engine.allow_postpone());
        engine.postpone(PostponeKind::Snoozed);
        engine.postpone(PostponeKind::Snoozed);
        assert!(!engine.allow_postpone());
        let events = engine.postpone(PostponeKind::Snoozed);
        assert!(events.is_empty());
        assert_eq!(engine.session().postponed_count, 2);
    }

    #[test]
    fn snooze_uses_postpone_interval_skip_uses_frequency() {
        let mut settings = Settings::default();
        settings.breaks.frequency_secs = 1500;
        settings.breaks.postpone_length_secs = 300;
        let (mut engine, _clock) = scheduler(settings);
        engine.postpone(PostponeKind::Snoozed);
        assert_eq!(
            engine.session().scheduled_at.unwrap(),
            start_instant() + Duration::seconds(300)
        );
        engine.postpone(PostponeKind::Skipped);
        assert_eq!(
            engine.session().scheduled_at.unwrap(),
            start_instant() + Duration::seconds(1500)
        );
    }

    #[test]
    fn unlimited_limit_clears_counter() {
        let mut settings = Settings::default();
        settings.breaks.postpone_limit = 3;
        let (mut engine, _clock) = scheduler(settings.clone());
        engine.postpone(PostponeKind::Snoozed);
        assert_eq!(engine.session().postponed_count, 1);
        settings.breaks.postpone_limit = 0;
        engine.on_settings_changed(&settings);
        assert_eq!(engine.session().postponed_count, 0);
    }

    #[test]
    fn operations_without_active_break_are_noops() {
        let (mut engine, _clock) = scheduler(Settings::default());
        let (remaining, events) = engine.pause();
        assert_eq!(remaining, None);
        assert!(events.is_empty());
        assert_eq!(engine.resume().0, None);
        assert_eq!(engine.adjust_duration(5_000).0, None);
        assert!(engine.advance_message().0.is_empty());
        assert!(engine.rewind_message().is_empty());
        assert!(engine.current_message().is_none());
    }
}
