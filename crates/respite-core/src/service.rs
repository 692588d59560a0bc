//! Async service facade over the scheduler.
//!
//! This is the only way engine state changes become visible outside the
//! process: inbound operations are methods here, outbound changes flow over
//! one broadcast channel. All mutations are serialized through a single
//! mutex, so the tick callback and externally triggered operations are
//! mutually exclusive critical sections over the session state.
//!
//! The one asynchronous step is flushing rotation state after a break
//! starts. The in-memory selection has already taken effect when the flush
//! runs; a flush failure is logged and swallowed, and the break is
//! re-validated for liveness after the await before its windows are created.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::collaborators::{BreakPresenter, Notifier};
use crate::error::CoreError;
use crate::events::Event;
use crate::idle::IdleMonitor;
use crate::messages::BreakMessage;
use crate::settings::{Settings, SettingsStore};
use crate::timer::{BreakScheduler, PendingBreak, PostponeKind};

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct BreakService {
    scheduler: Mutex<BreakScheduler>,
    store: Arc<dyn SettingsStore>,
    presenter: Arc<dyn BreakPresenter>,
    events: broadcast::Sender<Event>,
}

impl BreakService {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        idle: Arc<dyn IdleMonitor>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        presenter: Arc<dyn BreakPresenter>,
    ) -> Self {
        let scheduler = BreakScheduler::new(store.clone(), idle, clock, notifier);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            scheduler: Mutex::new(scheduler),
            store,
            presenter,
            events,
        }
    }

    /// Subscribe to the outbound event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, BreakScheduler> {
        self.scheduler.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, events: Vec<Event>) {
        for event in events {
            // Send only fails with zero receivers, which is fine.
            let _ = self.events.send(event);
        }
    }

    // ── Drive ────────────────────────────────────────────────────────

    /// Periodic tick entry point. The lock is held only for the synchronous
    /// state transition; a break start's persistence and window creation
    /// happen after it is released.
    pub async fn tick(&self) {
        let outcome = self.lock().tick();
        self.publish(outcome.events);
        if let Some(pending) = outcome.begin {
            self.finish_break_start(pending).await;
        }
    }

    async fn finish_break_start(&self, pending: PendingBreak) {
        if pending.persist_rotation {
            self.persist_settings().await;
        }
        if let Some(id) = pending.break_id {
            // A postpone/skip/end may have arrived while we were persisting;
            // a stale start must be discarded, not applied.
            if self.lock().confirm_break(id) {
                self.presenter.create_break_windows();
            } else {
                debug!("break start superseded during persistence; skipping windows");
            }
        }
    }

    async fn persist_settings(&self) {
        let store = self.store.clone();
        match tokio::task::spawn_blocking(move || store.persist()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(error = %e, "failed to persist settings; in-memory state stays authoritative")
            }
            Err(e) => warn!(error = %e, "settings persistence task failed"),
        }
    }

    // ── Inbound operations ───────────────────────────────────────────

    /// Begin a break immediately (manual trigger).
    pub async fn start_break_now(&self) {
        let (events, pending) = self.lock().start_break_now();
        self.publish(events);
        if let Some(pending) = pending {
            self.finish_break_start(pending).await;
        }
    }

    pub fn start_countdown(&self) {
        let events = self.lock().start_countdown();
        self.publish(events);
    }

    pub fn pause(&self) -> Option<u64> {
        let (remaining, events) = self.lock().pause();
        self.publish(events);
        remaining
    }

    pub fn resume(&self) -> Option<u64> {
        let (remaining, events) = self.lock().resume();
        self.publish(events);
        remaining
    }

    /// Apply a signed duration delta. Hosts normalize malformed input to 0
    /// (a no-op) before calling.
    pub fn adjust_duration(&self, delta_ms: i64) -> Option<u64> {
        let (remaining, events) = self.lock().adjust_duration(delta_ms);
        self.publish(events);
        remaining
    }

    pub fn postpone(&self, kind: PostponeKind) {
        let events = self.lock().postpone(kind);
        self.publish(events);
    }

    pub fn allow_postpone(&self) -> bool {
        self.lock().allow_postpone()
    }

    pub fn end_break(&self) {
        let events = self.lock().end_break();
        self.publish(events);
    }

    pub async fn next_message(&self) {
        let (events, persist) = self.lock().advance_message();
        self.publish(events);
        if persist {
            self.persist_settings().await;
        }
    }

    pub fn previous_message(&self) {
        let events = self.lock().rewind_message();
        self.publish(events);
    }

    pub fn current_message(&self) -> Option<(BreakMessage, bool, bool)> {
        self.lock().current_message()
    }

    pub fn time_since_last_break_ms(&self) -> Option<u64> {
        self.lock().time_since_last_break_ms()
    }

    pub fn complete_break_tracking(&self, duration_ms: u64) {
        self.lock().complete_break_tracking(duration_ms);
    }

    pub fn was_started_from_manual_trigger(&self) -> bool {
        self.lock().was_started_from_manual_trigger()
    }

    pub fn break_length_secs(&self) -> u64 {
        self.lock().break_length_secs()
    }

    pub fn snapshot(&self) -> Event {
        self.lock().snapshot()
    }

    pub fn settings(&self) -> Settings {
        self.store.get()
    }

    /// Replace the settings document. With `reset_breaks` the engine also
    /// discards its current schedule and starts a fresh cycle.
    pub async fn set_settings(
        &self,
        settings: Settings,
        reset_breaks: bool,
    ) -> Result<(), CoreError> {
        let store = self.store.clone();
        let to_write = settings.clone();
        tokio::task::spawn_blocking(move || store.set(&to_write))
            .await
            .map_err(|e| CoreError::Custom(e.to_string()))??;
        let events = {
            let mut engine = self.lock();
            engine.on_settings_changed(&settings);
            if reset_breaks {
                engine.reset_breaks()
            } else {
                Vec::new()
            }
        };
        self.publish(events);
        Ok(())
    }
}
