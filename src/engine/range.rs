use chrono::{Datelike, NaiveDate, Timelike};

use crate::model::{HourRange, LayoutOptions, MinuteSpan, Minutes, WeekSchedule, minute_of_day};

/// Derive the visible hour range for `date`: the padded working-hours window
/// for that weekday, widened so every appointment's busy span fits, clamped
/// to the configured floor/ceiling.
///
/// Deterministic and order-independent in `spans` — widening is pure min/max.
pub fn resolve(
    schedule: Option<&WeekSchedule>,
    date: NaiveDate,
    spans: &[MinuteSpan],
    opts: &LayoutOptions,
) -> HourRange {
    let mut floor = opts.floor_hour.min(23) as Minutes;
    let mut ceiling = opts.ceiling_hour.min(23) as Minutes;
    if floor > ceiling {
        (floor, ceiling) = (0, 23);
    }
    let pad = opts.padding_hours as Minutes;

    let day = schedule
        .and_then(|s| s.day(date.weekday()))
        .filter(|d| d.enabled && d.is_consistent());

    let (mut start_hour, mut end_hour) = match day {
        Some(d) => (
            d.start.hour() as Minutes - pad,
            ceil_hour(minute_of_day(d.end)) + pad,
        ),
        // Disabled day or no config: default full window, padding is a no-op
        // after clamping.
        None => (floor, ceiling),
    };

    start_hour = start_hour.clamp(floor, ceiling);
    end_hour = end_hour.clamp(floor, ceiling);
    if end_hour < start_hour {
        (start_hour, end_hour) = (floor, ceiling);
    }

    for span in spans {
        let span_start = span.start.div_euclid(60);
        let span_end = ceil_hour(span.end);
        if span_start < start_hour {
            start_hour = span_start.max(floor);
        }
        if span_end > end_hour {
            end_hour = span_end.min(ceiling);
        }
    }

    HourRange::new(start_hour as u32, end_hour as u32)
}

/// Hour containing `m`, rounded up: 18:00 → 18, 18:01 → 19.
fn ceil_hour(m: Minutes) -> Minutes {
    m.div_euclid(60) + if m.rem_euclid(60) > 0 { 1 } else { 0 }
}
