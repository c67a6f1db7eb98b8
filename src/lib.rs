#![forbid(unsafe_code)]
//! Shift scheduler — génération déterministe d'un planning de gardes
//! (hôpital, ODC, lane, week-end) et export iCalendar.
//!
//! - Rotation modulaire à 3 rôles ou rotation à titulaire unique.
//! - Heures flottantes (pas de fuseau) ; dépassements "25:99" reportés.
//! - Export .ics / JSON / CSV, écriture atomique.

pub mod config;
pub mod generator;
pub mod ical;
pub mod io;
pub mod model;
pub mod rotation;
pub mod time;

pub use config::{load_params, read_params, save_params, ConfigError, Flags, ScheduleParams, TimeWindow, Windows};
pub use generator::{generate, Span};
pub use ical::{parse_ics, to_ics, to_ics_with, Clock, ParsedEvent, SystemClock, UidSource, UuidSource};
pub use model::{DutyKind, Event, PersonId, Schedule};
pub use rotation::{is_lane_week, is_lane_weekend, Rotation, RotationPolicy, WeekRoles};
