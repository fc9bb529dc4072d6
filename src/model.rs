use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Minutes — the layout grid's only time unit for within-day arithmetic.
pub type Minutes = i64;

/// Minutes from local midnight of a time-of-day.
pub fn minute_of_day(t: NaiveTime) -> Minutes {
    (t.hour() * 60 + t.minute()) as Minutes
}

/// Half-open interval `[start, end)` in minutes relative to a local midnight.
///
/// Values outside `[0, 1440)` are legal: an appointment projected into the
/// viewer's timezone may start before the displayed date's midnight or run
/// past it. The range resolver clamps, this type does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteSpan {
    pub start: Minutes,
    pub end: Minutes,
}

impl MinuteSpan {
    pub fn new(start: Minutes, end: Minutes) -> Self {
        debug_assert!(start <= end, "MinuteSpan start must not exceed end");
        Self { start, end }
    }

    pub fn duration_min(&self) -> Minutes {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &MinuteSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_minute(&self, m: Minutes) -> bool {
        self.start <= m && m < self.end
    }
}

/// Booking lifecycle state. Carried for display and caller-side filtering;
/// layout geometry never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
    Expired,
}

impl AppointmentStatus {
    /// Whether the appointment still claims its slot on screen.
    pub fn occupies_slot(&self) -> bool {
        matches!(self, AppointmentStatus::Confirmed | AppointmentStatus::Pending)
    }
}

/// One validated appointment — an immutable snapshot for a single layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Ulid,
    /// Absolute instant; projected into the viewer's zone per pass.
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    /// Opaque display references — never consulted by layout logic.
    #[serde(default)]
    pub client_ref: Option<String>,
    #[serde(default)]
    pub service_refs: Vec<String>,
}

impl Appointment {
    /// Start of this appointment in minutes from `date`'s local midnight in
    /// zone `tz`. Negative (or past 1440) when the appointment falls on a
    /// neighboring local date.
    pub fn start_minute<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Minutes {
        let local = self.scheduled_at.with_timezone(tz).naive_local();
        let midnight = date.and_time(NaiveTime::MIN);
        (local - midnight).num_minutes()
    }

    /// The busy interval this appointment occupies on `date`'s timeline.
    pub fn busy_span<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> MinuteSpan {
        let start = self.start_minute(date, tz);
        MinuteSpan::new(start, start + self.duration_minutes as Minutes)
    }
}

// ── Working hours ────────────────────────────────────────────────

/// A provider's pause within a working day, e.g. lunch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default)]
    pub label: Option<String>,
}

/// Configured availability window for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub enabled: bool,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
}

impl DayHours {
    /// Structural validity: `start < end`, breaks in order, non-overlapping,
    /// and contained in `[start, end]`. An inconsistent day is shaded as
    /// disabled rather than rejected.
    pub fn is_consistent(&self) -> bool {
        if self.start >= self.end {
            return false;
        }
        let mut cursor = self.start;
        for b in &self.breaks {
            if b.start >= b.end || b.start < cursor || b.end > self.end {
                return false;
            }
            cursor = b.end;
        }
        true
    }
}

/// Per-weekday working-hours configuration, Sunday through Saturday.
/// A missing day means no configured hours for that weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekSchedule {
    pub sunday: Option<DayHours>,
    pub monday: Option<DayHours>,
    pub tuesday: Option<DayHours>,
    pub wednesday: Option<DayHours>,
    pub thursday: Option<DayHours>,
    pub friday: Option<DayHours>,
    pub saturday: Option<DayHours>,
}

impl WeekSchedule {
    pub fn day(&self, weekday: Weekday) -> Option<&DayHours> {
        match weekday {
            Weekday::Sun => self.sunday.as_ref(),
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
        }
    }
}

// ── Layout configuration ─────────────────────────────────────────

/// Rendering-side knobs. Geometry only; none of these affect which
/// appointments appear, only where.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Pixel height of one hour row.
    pub row_height_px: f64,
    /// Floor for very short appointments so they stay visible.
    pub min_block_height_px: f64,
    /// Absolute bounds for the visible range, inclusive hours.
    pub floor_hour: u32,
    pub ceiling_hour: u32,
    /// Hours of breathing room around the working-hours window.
    pub padding_hours: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            row_height_px: 80.0,
            min_block_height_px: 40.0,
            floor_hour: 0,
            ceiling_hour: 23,
            padding_hours: 1,
        }
    }
}

// ── Engine input ─────────────────────────────────────────────────

/// Everything one layout pass reads, minus the clock. Replaced wholesale on
/// every data change — never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySnapshot {
    pub selected_date: NaiveDate,
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub working_hours: Option<WeekSchedule>,
}

// ── Engine output ────────────────────────────────────────────────

/// Contiguous hour span rendered for a day, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourRange {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl HourRange {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        debug_assert!(start_hour <= end_hour, "HourRange start must not exceed end");
        Self { start_hour, end_hour }
    }

    pub fn hours(&self) -> std::ops::RangeInclusive<u32> {
        self.start_hour..=self.end_hour
    }

    pub fn start_minutes(&self) -> Minutes {
        self.start_hour as Minutes * 60
    }

    pub fn span_hours(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    /// Vertical extent of the range in pixels.
    pub fn height_px(&self, row_height_px: f64) -> f64 {
        self.span_hours() as f64 * row_height_px
    }
}

/// Pixel geometry for one appointment. `top`/`height` in pixels,
/// `left_fraction`/`width_fraction` as fractions of the row width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBlock {
    pub appointment_id: Ulid,
    pub top: f64,
    pub height: f64,
    pub left_fraction: f64,
    pub width_fraction: f64,
}

/// One hour row of the rendered grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub hour: u32,
    pub label: String,
    pub is_current_hour: bool,
    pub is_within_working_hours: bool,
}

/// Position of the "now" line within the visible range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTimeMarker {
    pub offset_from_range_start: f64,
    pub visible: bool,
}

impl CurrentTimeMarker {
    pub fn hidden() -> Self {
        Self { offset_from_range_start: 0.0, visible: false }
    }
}

/// Full result of one layout pass. Block order is not guaranteed — consumers
/// join on `appointment_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub visible_range: HourRange,
    pub time_slots: Vec<TimeSlot>,
    pub layout_blocks: Vec<LayoutBlock>,
    pub current_time_marker: CurrentTimeMarker,
}

/// Serde helper for `"HH:MM"` times in working-hours config.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }
}
