use chrono::Local;
use respite_core::{is_within_working_hours, FileSettingsStore, SettingsStore};
use serde::Serialize;

#[derive(Serialize)]
struct StatusReport {
    settings_path: String,
    breaks_enabled: bool,
    frequency_secs: u64,
    length_secs: u64,
    postpone_length_secs: u64,
    postpone_limit: u32,
    presentation: respite_core::PresentationMode,
    selection: respite_core::SelectionMode,
    pool_size: usize,
    idle_monitor_enabled: bool,
    idle_reset_secs: u64,
    working_hours_enabled: bool,
    within_working_hours_now: bool,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = FileSettingsStore::open_default()?;
    let settings = store.get();
    let report = StatusReport {
        settings_path: store.path().display().to_string(),
        breaks_enabled: settings.breaks.enabled,
        frequency_secs: settings.break_frequency_secs(),
        length_secs: settings.break_length_secs(),
        postpone_length_secs: settings.postpone_length_secs(),
        postpone_limit: settings.breaks.postpone_limit,
        presentation: settings.breaks.presentation,
        selection: settings.messages.selection,
        pool_size: settings.messages.pool.len(),
        idle_monitor_enabled: settings.idle.monitor_enabled,
        idle_reset_secs: settings.idle_reset_secs(),
        working_hours_enabled: settings.working_hours.enabled,
        within_working_hours_now: is_within_working_hours(
            &Local::now().naive_local(),
            &settings.working_hours,
        ),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
