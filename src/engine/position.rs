use ulid::Ulid;

use super::overlap::ColumnSlot;
use crate::model::{HourRange, LayoutBlock, LayoutOptions, MinuteSpan};

/// Convert one appointment's busy span and column placement into pixel
/// geometry within the visible range.
///
/// All arithmetic is floating point; rounding to device pixels is the
/// renderer's job. A start before the range (should not survive range
/// resolution, but tolerated) clamps `top` to 0; a degenerate duration is
/// floored at `min_block_height_px`.
pub fn place(
    appointment_id: Ulid,
    span: MinuteSpan,
    slot: ColumnSlot,
    range: &HourRange,
    opts: &LayoutOptions,
) -> LayoutBlock {
    let minutes_from_range_start = span.start - range.start_minutes();
    let top = (minutes_from_range_start.max(0) as f64 / 60.0) * opts.row_height_px;
    let height =
        ((span.duration_min() as f64 / 60.0) * opts.row_height_px).max(opts.min_block_height_px);
    let width_fraction = 1.0 / slot.column_count.max(1) as f64;
    let left_fraction = slot.column as f64 * width_fraction;

    LayoutBlock { appointment_id, top, height, left_fraction, width_fraction }
}
