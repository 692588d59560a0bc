//! Integration tests for the break scheduling state machine.
//!
//! Everything runs on a synthetic clock and a settable idle monitor; no test
//! sleeps or touches the real system.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use respite_core::collaborators::Notifier;
use respite_core::{
    BreakMessage, BreakScheduler, Clock, Event, IdleState, ManualClock, ManualIdleMonitor,
    MemorySettingsStore, PostponeKind, PresentationMode, SelectionMode, Settings, SettingsStore,
};

#[derive(Default)]
struct RecordingNotifier {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.calls
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}

struct Harness {
    engine: BreakScheduler,
    clock: Arc<ManualClock>,
    idle: Arc<ManualIdleMonitor>,
    store: Arc<MemorySettingsStore>,
    notifier: Arc<RecordingNotifier>,
}

fn start_instant() -> DateTime<Utc> {
    // A Monday morning, inside the default working-hours ranges.
    Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
}

fn harness(settings: Settings) -> Harness {
    let clock = Arc::new(ManualClock::new(start_instant()));
    let idle = Arc::new(ManualIdleMonitor::new());
    let store = Arc::new(MemorySettingsStore::new(settings));
    let notifier = Arc::new(RecordingNotifier::default());
    let engine = BreakScheduler::new(
        store.clone(),
        idle.clone(),
        clock.clone(),
        notifier.clone(),
    );
    Harness {
        engine,
        clock,
        idle,
        store,
        notifier,
    }
}

fn base_settings() -> Settings {
    let mut settings = Settings::default();
    settings.breaks.frequency_secs = 1500;
    settings.breaks.length_secs = 120;
    settings.breaks.postpone_limit = 2;
    settings
}

#[test]
fn break_fires_exactly_once_when_due() {
    let mut h = harness(base_settings());

    let outcome = h.engine.tick();
    assert!(outcome.begin.is_none());
    let scheduled_at = h.engine.session().scheduled_at.expect("scheduled");
    assert_eq!(scheduled_at, start_instant() + Duration::seconds(1500));

    let mut begins = 0;
    for _ in 0..1510 {
        h.clock.advance_secs(1);
        if h.engine.tick().begin.is_some() {
            begins += 1;
        }
    }
    assert_eq!(begins, 1);
    assert!(h.engine.session().is_active());

    // Further ticks while active must not re-trigger.
    for _ in 0..5 {
        h.clock.advance_secs(1);
        assert!(h.engine.tick().begin.is_none());
    }
}

#[test]
fn countdown_completes_and_reschedules() {
    let mut h = harness(base_settings());
    let (events, pending) = h.engine.start_break_now();
    assert!(pending.is_some());
    assert!(matches!(events[0], Event::BreakStarted { .. }));
    assert!(h.engine.was_started_from_manual_trigger());

    h.clock.advance_secs(121);
    let outcome = h.engine.tick();
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e, Event::BreakEnded { .. })));
    assert!(!h.engine.session().is_active());
    assert_eq!(h.engine.session().breaks_completed, 1);
    assert_eq!(h.engine.session().postponed_count, 0);
    assert!(h.engine.session().scheduled_at.is_some());
}

#[test]
fn pause_resume_roundtrip_preserves_remaining() {
    let mut h = harness(base_settings());
    h.engine.start_break_now();

    let (paused, _) = h.engine.pause();
    let remaining = paused.expect("active break");
    // Pausing again without time elapsing mutates nothing.
    assert_eq!(h.engine.pause().0, Some(remaining));
    assert_eq!(h.engine.resume().0, Some(remaining));
    assert_eq!(h.engine.pause().0, Some(remaining));
}

#[test]
fn paused_break_ignores_wall_clock_drift() {
    let mut h = harness(base_settings());
    h.engine.start_break_now();
    let remaining = h.engine.pause().0.unwrap();

    h.clock.advance_secs(3600);
    let resumed = h.engine.resume().0.unwrap();
    assert_eq!(resumed, remaining);

    // The fresh deadline runs from now.
    h.clock.advance_secs(1);
    let snapshot_remaining = match h.engine.snapshot() {
        Event::StateSnapshot { remaining_ms, .. } => remaining_ms.unwrap(),
        other => panic!("expected StateSnapshot, got {other:?}"),
    };
    assert_eq!(snapshot_remaining, remaining - 1000);
}

#[test]
fn adjust_duration_clamps_and_completes_at_zero() {
    let mut h = harness(base_settings());
    h.engine.start_break_now();

    // Growing is clamped against nothing; shrinking floors total at 1s.
    let grown = h.engine.adjust_duration(30_000).0.unwrap();
    assert_eq!(grown, 150_000);

    let (remaining, events) = h.engine.adjust_duration(-1_000_000);
    assert_eq!(remaining, Some(0));
    assert!(events.iter().any(|e| matches!(e, Event::BreakEnded { .. })));
    assert!(!h.engine.session().is_active());
    assert_eq!(h.engine.session().breaks_completed, 1);
    assert!(h.engine.session().scheduled_at.is_some());
}

#[test]
fn postpone_limit_is_enforced_and_snooze_uses_short_interval() {
    let mut h = harness(base_settings());
    h.engine.start_break_now();
    h.engine.postpone(PostponeKind::Snoozed);
    assert!(!h.engine.session().is_active());
    assert_eq!(
        h.engine.session().scheduled_at.unwrap(),
        start_instant() + Duration::seconds(300)
    );
    assert_eq!(h.engine.session().postponed_count, 1);

    h.engine.postpone(PostponeKind::Skipped);
    assert_eq!(h.engine.session().postponed_count, 2);
    assert!(!h.engine.allow_postpone());

    let rejected = h.engine.postpone(PostponeKind::Snoozed);
    assert!(rejected.is_empty());
    assert_eq!(h.engine.session().postponed_count, 2);
}

#[test]
fn idle_gap_between_ticks_counts_as_implicit_break() {
    let mut settings = base_settings();
    settings.idle.reset_secs = 300;
    let mut h = harness(settings);

    h.engine.tick();

    // The driver goes quiet for 400s (shorter than the 1500s frequency).
    // The same tick that detects the gap opens the idle window, forces a
    // reschedule, and the scheduling step resolves the window: the idle
    // time counts as an implicit completed break, announced once.
    h.clock.advance_secs(400);
    let outcome = h.engine.tick();
    let away = outcome.events.iter().find_map(|e| match e {
        Event::IdleReset { away_secs, .. } => Some(*away_secs),
        _ => None,
    });
    assert_eq!(away, Some(400));
    assert_eq!(h.notifier.count(), 1);
    assert!(h.engine.session().idle_started_at.is_none());
    assert_eq!(h.engine.session().postponed_count, 0);
    assert!(h.engine.session().last_break_completed_at.is_some());
    assert_eq!(
        h.engine.session().scheduled_at.unwrap(),
        h.clock.now() + Duration::seconds(1500)
    );
}

#[test]
fn os_reported_idle_clears_schedule_and_backdates_window() {
    let mut h = harness(base_settings());
    h.engine.tick();
    assert!(h.engine.session().scheduled_at.is_some());

    h.clock.advance_secs(10);
    h.idle.set_idle_secs(400);
    h.engine.tick();
    assert!(h.engine.session().scheduled_at.is_none());
    assert_eq!(
        h.engine.session().idle_started_at,
        Some(h.clock.now() - Duration::seconds(400))
    );
}

#[test]
fn prolonged_lock_clears_silently() {
    let mut settings = base_settings();
    settings.breaks.frequency_secs = 350;
    settings.idle.reset_secs = 300;
    let mut h = harness(settings);

    h.idle.set_state(IdleState::Locked);
    h.engine.tick();
    assert!(h.engine.session().lock_started_at.is_some());

    // Locked through more than an entire break cycle.
    h.clock.advance_secs(400);
    h.engine.tick();
    assert!(h.engine.session().lock_started_at.is_none());
    assert!(h.engine.session().idle_started_at.is_none());

    // Unlocking afterwards raises no idle notification: the lock path is
    // distinct from the idle path.
    h.idle.set_state(IdleState::Active);
    h.clock.advance_secs(1);
    let outcome = h.engine.tick();
    assert!(!outcome
        .events
        .iter()
        .any(|e| matches!(e, Event::IdleReset { .. })));
    assert_eq!(h.notifier.count(), 0);
}

#[test]
fn short_lock_folds_into_idle_window() {
    let mut h = harness(base_settings());
    h.engine.tick();

    h.idle.set_state(IdleState::Locked);
    h.clock.advance_secs(1);
    h.engine.tick();
    assert!(h.engine.session().lock_started_at.is_some());

    // Unlock well before the frequency elapses.
    h.clock.advance_secs(60);
    h.idle.set_state(IdleState::Active);
    let outcome = h.engine.tick();
    assert!(h.engine.session().lock_started_at.is_none());
    // The lock span resolved as an implicit break when scheduling resumed.
    let away = outcome.events.iter().find_map(|e| match e {
        Event::IdleReset { away_secs, .. } => Some(*away_secs),
        _ => None,
    });
    assert_eq!(away, Some(60));
}

#[test]
fn sleep_gap_discards_stale_deadline() {
    let mut h = harness(base_settings());
    h.engine.tick();
    let old_deadline = h.engine.session().scheduled_at.unwrap();

    // Wake up well past the whole cycle; the pre-sleep deadline has passed
    // but must not fire.
    h.clock.advance_secs(1600);
    let outcome = h.engine.tick();
    assert!(outcome.begin.is_none());
    let new_deadline = h.engine.session().scheduled_at.unwrap();
    assert!(new_deadline > old_deadline);
    assert_eq!(new_deadline, h.clock.now() + Duration::seconds(1500));
}

#[test]
fn breaks_do_not_fire_outside_working_hours() {
    let mut settings = base_settings();
    settings.working_hours.enabled = true;
    let mut h = harness(settings);

    // Move to Sunday (disabled by default).
    h.clock
        .set(Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap());
    h.engine.tick();
    assert!(h.engine.session().scheduled_at.is_none());

    // Back inside working hours the schedule appears.
    h.clock
        .set(Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap());
    h.engine.tick();
    assert!(h.engine.session().scheduled_at.is_some());
}

#[test]
fn existing_schedule_is_cleared_when_leaving_working_hours() {
    let mut settings = base_settings();
    settings.working_hours.enabled = true;
    let mut h = harness(settings);

    // Late Monday afternoon, still inside the default range.
    h.clock
        .set(Utc.with_ymd_and_hms(2026, 3, 2, 16, 59, 0).unwrap());
    h.engine.tick();
    assert!(h.engine.session().scheduled_at.is_some());

    // 17:01 is past the inclusive 17:00 end of the default range.
    h.clock
        .set(Utc.with_ymd_and_hms(2026, 3, 2, 17, 1, 0).unwrap());
    h.engine.tick();
    assert!(h.engine.session().scheduled_at.is_none());
}

#[test]
fn notification_mode_completes_immediately() {
    let mut settings = base_settings();
    settings.breaks.presentation = PresentationMode::Notification;
    settings.breaks.frequency_secs = 10;
    let mut h = harness(settings);

    h.engine.tick();
    for _ in 0..12 {
        h.clock.advance_secs(1);
        h.engine.tick();
    }
    assert!(!h.engine.session().is_active());
    assert_eq!(h.notifier.count(), 1);
    assert_eq!(h.engine.session().breaks_completed, 1);
    assert!(h.engine.session().scheduled_at.is_some());
}

#[test]
fn message_navigation_replays_history_with_undo_semantics() {
    let mut settings = base_settings();
    settings.messages.selection = SelectionMode::Sequential;
    settings.messages.pool = vec![
        BreakMessage::new("look far away"),
        BreakMessage::new("roll your shoulders"),
        BreakMessage::new("stand up"),
    ];
    let mut h = harness(settings);
    h.engine.start_break_now();

    let (first, has_prev, _) = h.engine.current_message().unwrap();
    assert!(!has_prev);

    // Advance twice: two new history entries.
    h.engine.advance_message();
    let (second, has_prev, _) = h.engine.current_message().unwrap();
    assert!(has_prev);
    h.engine.advance_message();
    let (third, _, _) = h.engine.current_message().unwrap();

    // Rewind replays the existing entries in reverse.
    h.engine.rewind_message();
    assert_eq!(h.engine.current_message().unwrap().0, second);
    h.engine.rewind_message();
    assert_eq!(h.engine.current_message().unwrap().0, first);

    // Rewinding past the first entry is a no-op.
    assert!(h.engine.rewind_message().is_empty());
    assert_eq!(h.engine.current_message().unwrap().0, first);

    // Advancing replays forward through history, not the pipeline.
    h.engine.advance_message();
    assert_eq!(h.engine.current_message().unwrap().0, second);
    h.engine.advance_message();
    assert_eq!(h.engine.current_message().unwrap().0, third);
}

#[test]
fn sequential_selection_advances_rotation_in_store() {
    let mut settings = base_settings();
    settings.messages.selection = SelectionMode::Sequential;
    settings.messages.pool = vec![
        BreakMessage::new("a"),
        BreakMessage::new("b"),
        BreakMessage::new("c"),
    ];
    let mut h = harness(settings);

    h.engine.start_break_now();
    let rotation = h.store.get().messages.rotation;
    assert_eq!(rotation.next_index, 1);
    let mut order = rotation.order.clone();
    order.sort_unstable();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn per_message_duration_overrides_global_length() {
    let mut settings = base_settings();
    settings.messages.pool = vec![BreakMessage {
        text: "long stretch".into(),
        attachments: Vec::new(),
        duration_secs: Some(300),
    }];
    let mut h = harness(settings);

    let (events, _) = h.engine.start_break_now();
    let total = events.iter().find_map(|e| match e {
        Event::BreakStarted {
            total_duration_ms, ..
        } => Some(*total_duration_ms),
        _ => None,
    });
    assert_eq!(total, Some(300_000));
}

#[test]
fn stale_break_start_is_not_confirmed_after_postpone() {
    let mut h = harness(base_settings());
    let (_, pending) = h.engine.start_break_now();
    let id = pending.unwrap().break_id.unwrap();
    assert!(h.engine.confirm_break(id));

    // A postpone arrives while the host is persisting rotation state.
    h.engine.postpone(PostponeKind::Snoozed);
    assert!(!h.engine.confirm_break(id));
}

#[test]
fn start_countdown_rearms_full_duration() {
    let mut h = harness(base_settings());
    h.engine.start_break_now();

    // Window creation took a moment; the countdown restarts from the top.
    h.clock.advance_secs(3);
    let events = h.engine.start_countdown();
    match &events[0] {
        Event::BreakStarted {
            end_timestamp,
            total_duration_ms,
            ..
        } => {
            assert_eq!(*total_duration_ms, 120_000);
            assert_eq!(
                end_timestamp.unwrap(),
                h.clock.now() + Duration::seconds(120)
            );
        }
        other => panic!("expected BreakStarted, got {other:?}"),
    }
    // A second call is a no-op.
    assert!(h.engine.start_countdown().is_empty());
}
