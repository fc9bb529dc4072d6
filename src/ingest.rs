//! Boundary between the external data layer and the engine's domain types.
//!
//! The engine trusts its inputs; this module is where that trust is earned.
//! A snapshot that cannot be read at all is an error; a single bad
//! appointment inside an otherwise good snapshot is skipped with a warning
//! and never fails the layout pass.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;
use ulid::Ulid;

use crate::model::{Appointment, AppointmentStatus, DaySnapshot, LayoutOptions, WeekSchedule};

/// Snapshot-level failures. Per-appointment problems are not errors — they
/// are skips (see [`SkipReason`]).
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Json(e) => write!(f, "unreadable snapshot: {e}"),
            SnapshotError::Io(e) => write!(f, "cannot read snapshot: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

/// Why one appointment record was dropped from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    BadId,
    BadInstant,
    NonPositiveDuration(i64),
    UnknownStatus(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::BadId => write!(f, "unparsable id"),
            SkipReason::BadInstant => write!(f, "unparsable scheduledAt instant"),
            SkipReason::NonPositiveDuration(d) => write!(f, "non-positive duration: {d}"),
            SkipReason::UnknownStatus(s) => write!(f, "unknown status: {s}"),
        }
    }
}

/// Appointment as the data layer hands it over: everything stringly enough
/// that one bad field cannot poison the whole snapshot parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAppointment {
    id: String,
    scheduled_at: String,
    duration_minutes: i64,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default)]
    client_ref: Option<String>,
    #[serde(default)]
    service_refs: Vec<String>,
}

fn default_status() -> String {
    "confirmed".into()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    selected_date: chrono::NaiveDate,
    #[serde(default)]
    appointments: Vec<RawAppointment>,
    #[serde(default)]
    working_hours: Option<WeekSchedule>,
    #[serde(default)]
    options: LayoutOptions,
}

/// A parsed snapshot plus the rendering options it carried.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotFile {
    pub snapshot: DaySnapshot,
    pub options: LayoutOptions,
}

pub fn from_json(json: &str) -> Result<SnapshotFile, SnapshotError> {
    let raw: RawSnapshot = serde_json::from_str(json)?;

    let mut appointments = Vec::with_capacity(raw.appointments.len());
    for record in raw.appointments {
        match validate(&record) {
            Ok(appt) => appointments.push(appt),
            Err(reason) => {
                warn!(id = %record.id, %reason, "skipping malformed appointment");
            }
        }
    }

    Ok(SnapshotFile {
        snapshot: DaySnapshot {
            selected_date: raw.selected_date,
            appointments,
            working_hours: raw.working_hours,
        },
        options: raw.options,
    })
}

pub fn from_path(path: &Path) -> Result<SnapshotFile, SnapshotError> {
    from_json(&std::fs::read_to_string(path)?)
}

fn validate(raw: &RawAppointment) -> Result<Appointment, SkipReason> {
    let id = Ulid::from_string(&raw.id).map_err(|_| SkipReason::BadId)?;
    let scheduled_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&raw.scheduled_at)
        .map_err(|_| SkipReason::BadInstant)?
        .with_timezone(&Utc);
    if raw.duration_minutes <= 0 || raw.duration_minutes > u32::MAX as i64 {
        return Err(SkipReason::NonPositiveDuration(raw.duration_minutes));
    }
    let status = match raw.status.as_str() {
        "confirmed" => AppointmentStatus::Confirmed,
        "pending" => AppointmentStatus::Pending,
        "cancelled" => AppointmentStatus::Cancelled,
        "expired" => AppointmentStatus::Expired,
        other => return Err(SkipReason::UnknownStatus(other.into())),
    };

    Ok(Appointment {
        id,
        scheduled_at,
        duration_minutes: raw.duration_minutes as u32,
        status,
        client_ref: raw.client_ref.clone(),
        service_refs: raw.service_refs.clone(),
    })
}
