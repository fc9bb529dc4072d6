//! End-to-end: JSON snapshot in, geometry out, through the public surface.

use chrono::{FixedOffset, TimeZone};
use daygrid::{ingest, layout_day};

const SNAPSHOT: &str = r#"{
    "selectedDate": "2026-08-31",
    "appointments": [
        {"id": "01J7V0Z9G70000000000000001",
         "scheduledAt": "2026-08-31T09:00:00Z",
         "durationMinutes": 60,
         "status": "confirmed",
         "clientRef": "client-17"},
        {"id": "01J7V0Z9G70000000000000002",
         "scheduledAt": "2026-08-31T09:30:00Z",
         "durationMinutes": 90,
         "status": "pending"},
        {"id": "01J7V0Z9G70000000000000003",
         "scheduledAt": "not-a-timestamp",
         "durationMinutes": 60,
         "status": "confirmed"}
    ],
    "workingHours": {
        "monday": {"enabled": true, "start": "09:00", "end": "18:00",
                   "breaks": [{"start": "12:00", "end": "13:00", "label": "lunch"}]}
    }
}"#;

#[test]
fn snapshot_to_layout() {
    let file = ingest::from_json(SNAPSHOT).unwrap();
    // The malformed third record was dropped at the boundary.
    assert_eq!(file.snapshot.appointments.len(), 2);

    let now = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 8, 31, 10, 0, 0)
        .unwrap();
    let layout = layout_day(&file.snapshot, &file.options, &now);

    // Working hours 09:00–18:00 padded by an hour on each side.
    assert_eq!(layout.visible_range.start_hour, 8);
    assert_eq!(layout.visible_range.end_hour, 19);

    // The two surviving appointments overlap 09:30–10:00 and share the row.
    assert_eq!(layout.layout_blocks.len(), 2);
    for block in &layout.layout_blocks {
        assert_eq!(block.width_fraction, 0.5);
    }

    // Lunch hour is unshaded, surrounding working hours are not.
    let slot = |h: u32| layout.time_slots.iter().find(|s| s.hour == h).unwrap();
    assert!(slot(11).is_within_working_hours);
    assert!(!slot(12).is_within_working_hours);
    assert!(slot(13).is_within_working_hours);

    // 10:00 against the 08:00 range start, default 80 px rows.
    assert!(layout.current_time_marker.visible);
    assert_eq!(layout.current_time_marker.offset_from_range_start, 160.0);
}

#[test]
fn layout_is_serializable_and_stable() {
    let file = ingest::from_json(SNAPSHOT).unwrap();
    let now = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 8, 31, 10, 0, 0)
        .unwrap();

    let a = serde_json::to_string(&layout_day(&file.snapshot, &file.options, &now)).unwrap();
    let b = serde_json::to_string(&layout_day(&file.snapshot, &file.options, &now)).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("\"visibleRange\""));
    assert!(a.contains("\"currentTimeMarker\""));
}
