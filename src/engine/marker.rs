use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike};

use crate::model::{CurrentTimeMarker, HourRange, LayoutOptions, Minutes};

/// Recommended refresh interval for tick drivers. Re-running
/// [`current_time_marker`] with identical inputs is idempotent, so ticking
/// more often only costs the call.
pub const MARKER_TICK: Duration = Duration::from_secs(60);

/// Position the "now" line for the displayed date.
///
/// Hidden unless `date` is the current calendar date in `now`'s zone — plain
/// `NaiveDate` equality after projection, so midnight boundaries behave.
/// Hidden (with the offset preserved) when the current time falls outside
/// the visible range.
pub fn current_time_marker<Tz: TimeZone>(
    date: NaiveDate,
    range: &HourRange,
    opts: &LayoutOptions,
    now: &DateTime<Tz>,
) -> CurrentTimeMarker {
    let local = now.naive_local();
    if local.date() != date {
        return CurrentTimeMarker::hidden();
    }

    let minute = (local.hour() * 60 + local.minute()) as Minutes;
    let offset = ((minute - range.start_minutes()) as f64 / 60.0) * opts.row_height_px;
    let visible = offset >= 0.0 && offset <= range.height_px(opts.row_height_px);

    CurrentTimeMarker { offset_from_range_start: offset, visible }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(offset_hours: i32, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
    }

    #[test]
    fn visible_with_offset_on_the_current_date() {
        // 10:30 against a range starting at 08:00: 2.5 h * 80 px.
        let now = at(0, 2026, 8, 31, 10, 30);
        let marker =
            current_time_marker(date(2026, 8, 31), &HourRange::new(8, 19), &LayoutOptions::default(), &now);
        assert!(marker.visible);
        assert_eq!(marker.offset_from_range_start, 200.0);
    }

    #[test]
    fn hidden_on_other_dates_regardless_of_time() {
        let now = at(0, 2026, 8, 31, 10, 30);
        let marker =
            current_time_marker(date(2026, 9, 1), &HourRange::new(8, 19), &LayoutOptions::default(), &now);
        assert_eq!(marker, CurrentTimeMarker::hidden());
    }

    #[test]
    fn hidden_when_now_is_outside_the_range() {
        // 22:00 against a range ending at hour 19.
        let now = at(0, 2026, 8, 31, 22, 0);
        let marker =
            current_time_marker(date(2026, 8, 31), &HourRange::new(8, 19), &LayoutOptions::default(), &now);
        assert!(!marker.visible);
        // 14 h past range start, beyond the 11-row extent.
        assert_eq!(marker.offset_from_range_start, 1120.0);
    }

    #[test]
    fn hidden_before_range_start() {
        let now = at(0, 2026, 8, 31, 6, 0);
        let marker =
            current_time_marker(date(2026, 8, 31), &HourRange::new(8, 19), &LayoutOptions::default(), &now);
        assert!(!marker.visible);
        assert!(marker.offset_from_range_start < 0.0);
    }

    #[test]
    fn range_edges_are_inclusive() {
        let opts = LayoutOptions::default();
        let start_edge = current_time_marker(
            date(2026, 8, 31),
            &HourRange::new(8, 19),
            &opts,
            &at(0, 2026, 8, 31, 8, 0),
        );
        assert!(start_edge.visible);
        assert_eq!(start_edge.offset_from_range_start, 0.0);

        let end_edge = current_time_marker(
            date(2026, 8, 31),
            &HourRange::new(8, 19),
            &opts,
            &at(0, 2026, 8, 31, 19, 0),
        );
        assert!(end_edge.visible);
        assert_eq!(end_edge.offset_from_range_start, 880.0);
    }

    #[test]
    fn date_equality_uses_the_viewers_zone() {
        // 23:30 on the 31st in UTC+2 is 21:30Z; the instant's UTC date is
        // still the 31st, but a UTC-viewer at 01:30 on the 1st must not
        // show the marker on the 31st.
        let utc_plus_2 = at(2, 2026, 8, 31, 23, 30);
        let marker = current_time_marker(
            date(2026, 8, 31),
            &HourRange::new(0, 23),
            &LayoutOptions::default(),
            &utc_plus_2,
        );
        assert!(marker.visible);

        // Same instant viewed from UTC-1: locally it is 20:30 on the 31st.
        let utc_minus_1 = utc_plus_2.with_timezone(&FixedOffset::west_opt(3600).unwrap());
        let marker = current_time_marker(
            date(2026, 8, 31),
            &HourRange::new(0, 23),
            &LayoutOptions::default(),
            &utc_minus_1,
        );
        assert!(marker.visible);
        assert_eq!(marker.offset_from_range_start, (20.0 * 60.0 + 30.0) / 60.0 * 80.0);

        // And from UTC+3 the local date has already rolled to Sep 1.
        let utc_plus_3 = utc_plus_2.with_timezone(&FixedOffset::east_opt(3 * 3600).unwrap());
        let marker = current_time_marker(
            date(2026, 8, 31),
            &HourRange::new(0, 23),
            &LayoutOptions::default(),
            &utc_plus_3,
        );
        assert!(!marker.visible);
    }
}
