//! Preferred-time parsing and free-slot computation

use chrono::{Datelike, Duration, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::domain::Slot;

/// Weekday numbers 0=Mon .. 6=Sun
pub const WEEKDAYS: [u32; 5] = [0, 1, 2, 3, 4];
pub const WEEKENDS: [u32; 2] = [5, 6];

/// Parsed viewing-time preference: eligible weekdays plus an hour window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferredTimes {
    /// Weekday numbers, 0=Mon .. 6=Sun
    pub days: Vec<u32>,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for PreferredTimes {
    fn default() -> Self {
        Self {
            days: (0..7).collect(),
            start_hour: 9,
            end_hour: 17,
        }
    }
}

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\s*(?:-|–|—|to)\s*(\d{1,2})(?::(\d{2}))?\s*(am|pm)?")
            .unwrap()
    })
}

fn apply_meridiem(hour: u32, meridiem: Option<&str>) -> u32 {
    match meridiem {
        Some(m) if m.eq_ignore_ascii_case("pm") && hour < 12 => hour + 12,
        Some(m) if m.eq_ignore_ascii_case("am") && hour == 12 => 0,
        _ => hour,
    }
}

const WEEKDAY_NAMES: [&str; 5] = ["mon", "tue", "wed", "thu", "fri"];
const WEEKEND_NAMES: [&str; 2] = ["sat", "sun"];

/// Parse free-form preferred-times text into a day set and hour window
///
/// Recognizes `weekday`/`weekend` keywords and day-name abbreviations
/// (`mon`..`fri`, `sat`/`sun`), explicit ranges (`6-8pm`, `10am-2pm`,
/// `18:00-20:15`, `9-17`) and the `morning`/`afternoon`/`evening`
/// keywords. A backwards range keeps its start and runs two hours.
/// Anything unparseable falls back to all days, 9-17.
pub fn parse_preferred_times(text: Option<&str>) -> PreferredTimes {
    debug!(?text, "parse_preferred_times: called");
    let text = match text {
        Some(t) if !t.trim().is_empty() => t.to_lowercase(),
        _ => return PreferredTimes::default(),
    };

    let days: Vec<u32> = if text.contains("weekday") || WEEKDAY_NAMES.iter().any(|d| text.contains(d)) {
        WEEKDAYS.to_vec()
    } else if text.contains("weekend") || WEEKEND_NAMES.iter().any(|d| text.contains(d)) {
        WEEKENDS.to_vec()
    } else {
        (0..7).collect()
    };

    let (start_hour, end_hour) = if let Some(caps) = range_re().captures(&text) {
        let raw_start: u32 = caps[1].parse().unwrap_or(9);
        let raw_end: u32 = caps[4].parse().unwrap_or(17);
        let start_mer = caps.get(3).map(|m| m.as_str());
        let end_mer = caps.get(6).map(|m| m.as_str());

        let mut end = apply_meridiem(raw_end, end_mer);
        let mut start = apply_meridiem(raw_start, start_mer);
        // "6-8pm" means 18-20: a bare start inherits the end's pm when
        // that keeps the range forward
        if start_mer.is_none()
            && end_mer.is_some_and(|m| m.eq_ignore_ascii_case("pm"))
            && start < 12
            && start + 12 <= end
        {
            start += 12;
        }
        // A backwards range keeps the start and runs two hours
        if end <= start {
            end = (start + 2).min(24);
        }

        if start < end && end <= 24 {
            (start, end)
        } else {
            (9, 17)
        }
    } else if text.contains("evening") {
        (18, 20)
    } else if text.contains("morning") {
        (9, 12)
    } else if text.contains("afternoon") {
        (13, 17)
    } else {
        (9, 17)
    };

    PreferredTimes {
        days,
        start_hour,
        end_hour,
    }
}

fn overlaps(start: NaiveDateTime, end: NaiveDateTime, busy: &[(NaiveDateTime, NaiveDateTime)]) -> bool {
    busy.iter().any(|&(b_start, b_end)| start < b_end && b_start < end)
}

/// Derive free slots from the preference window and busy intervals
///
/// Candidates are hour-aligned starts of the requested duration whose whole
/// interval fits inside the preferred hour window, the `[time_min,
/// time_max]` range, and no busy interval.
pub fn compute_slots(
    time_min: NaiveDateTime,
    time_max: NaiveDateTime,
    slot_duration_minutes: i64,
    preferred: &PreferredTimes,
    busy: &[(NaiveDateTime, NaiveDateTime)],
) -> Vec<Slot> {
    debug!(
        %time_min,
        %time_max,
        slot_duration_minutes,
        busy_count = busy.len(),
        "compute_slots: called"
    );
    let duration = Duration::minutes(slot_duration_minutes);
    let mut slots = Vec::new();

    let mut date = time_min.date();
    while date <= time_max.date() {
        if preferred.days.contains(&date.weekday().num_days_from_monday()) {
            for hour in preferred.start_hour..preferred.end_hour {
                let start = match date.and_hms_opt(hour, 0, 0) {
                    Some(s) => s,
                    None => continue,
                };
                let end = start + duration;
                if end > date.and_hms_opt(preferred.end_hour, 0, 0).unwrap_or(end) {
                    continue;
                }
                if start < time_min || end > time_max {
                    continue;
                }
                if overlaps(start, end, busy) {
                    continue;
                }
                slots.push(Slot::new(start, end));
            }
        }
        date = date.succ_opt().expect("date overflow");
    }

    slots
}
