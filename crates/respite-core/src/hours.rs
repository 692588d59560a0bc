//! Working-hours evaluation.
//!
//! A weekly schedule of enabled days and minute-of-day ranges. The evaluator
//! is a pure function: it answers whether a given local time falls inside an
//! allowed window and has no side effects.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Inclusive minute-of-day range within a single day.
///
/// Ranges for a day must not overlap; that is validated before settings are
/// accepted, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from_minutes: u16,
    pub to_minutes: u16,
}

/// Allowed windows for one weekday.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub ranges: Vec<TimeRange>,
}

/// Weekly working-hours schedule. `days` is Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_week")]
    pub days: [DayHours; 7],
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            enabled: false,
            days: default_week(),
        }
    }
}

fn default_week() -> [DayHours; 7] {
    let workday = DayHours {
        enabled: true,
        ranges: vec![TimeRange {
            from_minutes: 9 * 60,
            to_minutes: 17 * 60,
        }],
    };
    [
        workday.clone(),
        workday.clone(),
        workday.clone(),
        workday.clone(),
        workday,
        DayHours::default(),
        DayHours::default(),
    ]
}

/// True iff `local_now` falls inside an allowed window.
///
/// When the feature is globally disabled this always returns true. A disabled
/// day matches nothing, regardless of its ranges. Range bounds are inclusive
/// on both ends.
pub fn is_within_working_hours(local_now: &NaiveDateTime, hours: &WorkingHours) -> bool {
    if !hours.enabled {
        return true;
    }
    let day = &hours.days[local_now.weekday().num_days_from_monday() as usize];
    if !day.enabled {
        return false;
    }
    let minute = (local_now.hour() * 60 + local_now.minute()) as u16;
    day.ranges
        .iter()
        .any(|r| minute >= r.from_minutes && minute <= r.to_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn schedule() -> WorkingHours {
        WorkingHours {
            enabled: true,
            ..WorkingHours::default()
        }
    }

    #[test]
    fn disabled_feature_always_allows() {
        let hours = WorkingHours::default();
        // 2026-03-01 is a Sunday, outside every default range
        assert!(is_within_working_hours(&at(2026, 3, 1, 3, 0), &hours));
    }

    #[test]
    fn disabled_day_matches_nothing() {
        let hours = schedule();
        // Sunday is disabled even at a time that matches Friday's range
        assert!(!is_within_working_hours(&at(2026, 3, 1, 10, 0), &hours));
    }

    #[test]
    fn enabled_day_inclusive_bounds() {
        let hours = schedule();
        // 2026-03-02 is a Monday
        assert!(is_within_working_hours(&at(2026, 3, 2, 9, 0), &hours));
        assert!(is_within_working_hours(&at(2026, 3, 2, 17, 0), &hours));
        assert!(!is_within_working_hours(&at(2026, 3, 2, 8, 59), &hours));
        assert!(!is_within_working_hours(&at(2026, 3, 2, 17, 1), &hours));
    }

    #[test]
    fn multiple_ranges_any_match() {
        let mut hours = schedule();
        hours.days[0].ranges = vec![
            TimeRange {
                from_minutes: 9 * 60,
                to_minutes: 12 * 60,
            },
            TimeRange {
                from_minutes: 13 * 60,
                to_minutes: 17 * 60,
            },
        ];
        assert!(is_within_working_hours(&at(2026, 3, 2, 10, 0), &hours));
        assert!(!is_within_working_hours(&at(2026, 3, 2, 12, 30), &hours));
        assert!(is_within_working_hours(&at(2026, 3, 2, 14, 0), &hours));
    }
}
