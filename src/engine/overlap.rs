use crate::model::{MinuteSpan, Minutes};

/// Column placement for one appointment within its overlap cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot {
    /// 0-based horizontal slot.
    pub column: u32,
    /// Width of the whole cluster — every member of a cluster carries the
    /// same value, even when its own interval touches fewer columns.
    pub column_count: u32,
}

impl ColumnSlot {
    pub fn solo() -> Self {
        Self { column: 0, column_count: 1 }
    }
}

/// Partition busy spans into transitive-overlap clusters and assign each a
/// column by greedy interval-graph coloring.
///
/// Returns one slot per input span, parallel to `spans`. Processing order is
/// start ascending, shorter duration first, so shorter blocks land leftmost
/// and the result is deterministic for equal inputs.
///
/// Zero-length spans are widened to one minute, so two appointments with
/// identical start and end still collide and get distinct columns.
pub fn assign_columns(spans: &[MinuteSpan]) -> Vec<ColumnSlot> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by_key(|&i| (spans[i].start, spans[i].duration_min()));

    let mut slots = vec![ColumnSlot::solo(); spans.len()];
    let mut cluster: Vec<usize> = Vec::new();
    // End time per active column within the current cluster.
    let mut column_ends: Vec<Minutes> = Vec::new();
    let mut cluster_end = Minutes::MIN;

    for &i in &order {
        let span = padded(spans[i]);

        // A gap in coverage closes the cluster: nothing later can overlap
        // it even transitively.
        if span.start >= cluster_end && !cluster.is_empty() {
            seal_cluster(&mut slots, &mut cluster, &mut column_ends);
        }

        let column = match column_ends.iter().position(|&end| end <= span.start) {
            Some(free) => {
                column_ends[free] = span.end;
                free
            }
            None => {
                column_ends.push(span.end);
                column_ends.len() - 1
            }
        };
        slots[i].column = column as u32;
        cluster.push(i);
        cluster_end = cluster_end.max(span.end);
    }

    if !cluster.is_empty() {
        seal_cluster(&mut slots, &mut cluster, &mut column_ends);
    }

    slots
}

/// Stamp the cluster-wide column count on every member and reset for the
/// next cluster.
fn seal_cluster(slots: &mut [ColumnSlot], cluster: &mut Vec<usize>, column_ends: &mut Vec<Minutes>) {
    let count = column_ends.len() as u32;
    for &member in cluster.iter() {
        slots[member].column_count = count;
    }
    cluster.clear();
    column_ends.clear();
}

/// Widen degenerate spans so identical-instant appointments still collide.
fn padded(span: MinuteSpan) -> MinuteSpan {
    if span.duration_min() < 1 {
        MinuteSpan::new(span.start, span.start + 1)
    } else {
        span
    }
}
