//! Foreground scheduler daemon.
//!
//! Drives the engine tick, prints every broadcast event as one JSON line on
//! stdout, and accepts inbound operations as line-delimited commands on
//! stdin. Logs go to stderr so the event stream stays machine-readable.

use std::sync::Arc;

use respite_core::collaborators::{BreakPresenter, Notifier};
use respite_core::{
    BreakService, FileSettingsStore, NullIdleMonitor, PostponeKind, SystemClock,
};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

/// Desktop notifier backed by notify-rust.
struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        let result = notify_rust::Notification::new()
            .appname("respite")
            .summary(title)
            .body(body)
            .show();
        if let Err(e) = result {
            warn!(error = %e, "failed to show desktop notification");
        }
    }
}

/// The popup surface is an external process; the daemon only records that
/// windows were requested.
struct LogPresenter;

impl BreakPresenter for LogPresenter {
    fn create_break_windows(&self) {
        info!("break windows requested");
    }
}

pub fn run(tick_ms: u64) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(FileSettingsStore::open_default()?);
    info!(path = %store.path().display(), "settings loaded");

    let service = Arc::new(BreakService::new(
        store,
        Arc::new(NullIdleMonitor),
        Arc::new(SystemClock),
        Arc::new(DesktopNotifier),
        Arc::new(LogPresenter),
    ));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(drive(service, tick_ms.max(100)))
}

async fn drive(
    service: Arc<BreakService>,
    tick_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = service.subscribe();
    let mut interval = tokio::time::interval(std::time::Duration::from_millis(tick_ms));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = interval.tick() => service.tick().await,
            event = events.recv() => match event {
                Ok(event) => println!("{}", serde_json::to_string(&event)?),
                Err(RecvError::Lagged(missed)) => warn!(missed, "event stream lagged"),
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => handle_command(&service, line.trim()).await,
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    stdin_open = false;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }
    Ok(())
}

async fn handle_command(service: &BreakService, line: &str) {
    let mut parts = line.split_whitespace();
    let Some(op) = parts.next() else { return };
    match op {
        "start" => service.start_break_now().await,
        "countdown" => service.start_countdown(),
        "pause" => respond(json!({ "remaining_ms": service.pause() })),
        "resume" => respond(json!({ "remaining_ms": service.resume() })),
        "adjust" => {
            // Malformed deltas normalize to 0, a no-op.
            let delta: i64 = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
            respond(json!({ "remaining_ms": service.adjust_duration(delta) }));
        }
        "postpone" | "snooze" => service.postpone(PostponeKind::Snoozed),
        "skip" => service.postpone(PostponeKind::Skipped),
        "end" => service.end_break(),
        "next" => service.next_message().await,
        "prev" => service.previous_message(),
        "message" => match service.current_message() {
            Some((message, has_previous, has_next)) => respond(json!({
                "message": message,
                "has_previous": has_previous,
                "has_next": has_next,
            })),
            None => respond(json!({ "message": null })),
        },
        "allow-postpone" => respond(json!({ "allow_postpone": service.allow_postpone() })),
        "since" => respond(json!({
            "time_since_last_break_ms": service.time_since_last_break_ms(),
        })),
        "length" => respond(json!({ "break_length_secs": service.break_length_secs() })),
        "manual" => respond(json!({
            "started_from_manual_trigger": service.was_started_from_manual_trigger(),
        })),
        "complete" => {
            let duration_ms: u64 = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
            service.complete_break_tracking(duration_ms);
        }
        "status" => match serde_json::to_string(&service.snapshot()) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "failed to serialize snapshot"),
        },
        other => warn!(op = other, "unknown command"),
    }
}

fn respond(value: serde_json::Value) {
    println!("{value}");
}
