//! Appointment timeline layout engine.
//!
//! Turns one day's appointments plus a working-hours configuration into a
//! pixel-accurate schedule: a resolved visible hour range, per-hour slots
//! with working-hours shading, side-by-side blocks for overlapping
//! appointments, and a current-time marker.
//!
//! The engine is a pure function of its inputs plus an injected clock
//! reading — no I/O, no global state, outputs rebuilt from scratch on every
//! pass. Callers re-invoke [`engine::layout_day`] on data changes and on a
//! periodic tick ([`engine::MARKER_TICK`]) for the marker.

pub mod engine;
pub mod ingest;
pub mod model;

pub use engine::layout_day;
pub use model::{DayLayout, DaySnapshot, LayoutOptions};
