pub mod marker;
pub mod overlap;
pub mod position;
pub mod range;
pub mod shading;

pub use marker::{MARKER_TICK, current_time_marker};
pub use overlap::{ColumnSlot, assign_columns};

use chrono::{DateTime, TimeZone};

use crate::model::{DayLayout, DaySnapshot, LayoutOptions, MinuteSpan};

/// Run one full layout pass: resolve the visible range, pack overlapping
/// appointments into columns, compute pixel geometry, shade working hours,
/// and place the "now" marker.
///
/// Pure in all inputs including `now` — the same snapshot, options, and
/// instant always produce the identical `DayLayout`. The zone of `now` is
/// the viewer's zone; every appointment instant is projected into it.
pub fn layout_day<Tz: TimeZone>(
    snapshot: &DaySnapshot,
    opts: &LayoutOptions,
    now: &DateTime<Tz>,
) -> DayLayout {
    let tz = now.timezone();
    let date = snapshot.selected_date;

    let spans: Vec<MinuteSpan> =
        snapshot.appointments.iter().map(|a| a.busy_span(date, &tz)).collect();

    let visible_range = range::resolve(snapshot.working_hours.as_ref(), date, &spans, opts);
    let slots = overlap::assign_columns(&spans);

    let layout_blocks = snapshot
        .appointments
        .iter()
        .zip(spans.iter().zip(slots))
        .map(|(appt, (&span, slot))| position::place(appt.id, span, slot, &visible_range, opts))
        .collect();

    let time_slots = shading::time_slots(&visible_range, snapshot.working_hours.as_ref(), date, now);
    let current_time_marker = marker::current_time_marker(date, &visible_range, opts, now);

    DayLayout { visible_range, time_slots, layout_blocks, current_time_marker }
}
