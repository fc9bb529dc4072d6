use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};
use tracing::warn;

use crate::model::{DayHours, HourRange, Minutes, TimeSlot, WeekSchedule, minute_of_day};

/// Build the per-hour grid rows for the visible range: label, working-hours
/// shading for `date`'s weekday, and the current-hour highlight.
///
/// A missing, disabled, or inconsistent day config shades every hour as
/// outside working hours — never an error.
pub fn time_slots<Tz: TimeZone>(
    range: &HourRange,
    schedule: Option<&WeekSchedule>,
    date: NaiveDate,
    now: &DateTime<Tz>,
) -> Vec<TimeSlot> {
    let day = effective_day(schedule, date);

    let local_now = now.naive_local();
    let now_hour = (local_now.date() == date).then(|| local_now.hour());

    range
        .hours()
        .map(|hour| TimeSlot {
            hour,
            label: format!("{hour:02}:00"),
            is_current_hour: now_hour == Some(hour),
            is_within_working_hours: day.is_some_and(|d| hour_within(d, hour)),
        })
        .collect()
}

/// The day's config if it is enabled and structurally valid; inconsistent
/// config degrades to "day disabled" with a warning.
fn effective_day(schedule: Option<&WeekSchedule>, date: NaiveDate) -> Option<&DayHours> {
    let day = schedule?.day(date.weekday())?;
    if !day.enabled {
        return None;
    }
    if !day.is_consistent() {
        warn!(weekday = ?date.weekday(), "inconsistent working-hours config, shading day as disabled");
        return None;
    }
    Some(day)
}

/// An hour is inside working hours when its start lies in `[start, end)` and
/// the hour is not swallowed whole by a break. A break covering only part of
/// the hour leaves the flag set — sub-hour shading is the renderer's call.
fn hour_within(day: &DayHours, hour: u32) -> bool {
    let slot_start = hour as Minutes * 60;
    let slot_end = slot_start + 60;
    if slot_start < minute_of_day(day.start) || slot_start >= minute_of_day(day.end) {
        return false;
    }
    !day.breaks
        .iter()
        .any(|b| minute_of_day(b.start) <= slot_start && slot_end <= minute_of_day(b.end))
}
