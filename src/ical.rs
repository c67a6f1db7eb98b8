//! Sérialisation iCalendar (RFC 5545) du planning.
//!
//! Heures flottantes, pas de VTIMEZONE, pas d'échappement des SUMMARY.
//! L'horloge et la source d'UID sont injectées pour rendre le rendu
//! déterministe en test.

use crate::model::Schedule;
use crate::time::{format_floating, parse_floating};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::debug;
use uuid::Uuid;

pub const PRODID: &str = "-//ShiftScheduler//EN";
pub const CRLF: &str = "\r\n";

/// Heure murale utilisée pour DTSTAMP.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Fournit un identifiant unique par VEVENT.
pub trait UidSource {
    fn next_uid(&mut self) -> String;
}

/// Heure locale du système.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// UUID v4 aléatoires.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl UidSource for UuidSource {
    fn next_uid(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Rendu avec l'horloge système et des UUID v4 frais à chaque appel.
pub fn to_ics(schedule: &Schedule) -> String {
    to_ics_with(schedule, &SystemClock, &mut UuidSource)
}

/// Rendu en ordre d'entrée (pas de re-tri). Un seul DTSTAMP par appel.
pub fn to_ics_with(schedule: &Schedule, clock: &dyn Clock, uids: &mut dyn UidSource) -> String {
    let stamp = format_floating(clock.now());
    let mut lines: Vec<String> = Vec::with_capacity(4 + schedule.len() * 7);
    lines.push("BEGIN:VCALENDAR".into());
    lines.push("VERSION:2.0".into());
    lines.push(format!("PRODID:{PRODID}"));

    for event in schedule {
        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:{}", uids.next_uid()));
        lines.push(format!("DTSTAMP:{stamp}"));
        lines.push(format!("SUMMARY:{}", event.title()));
        lines.push(format!("DTSTART:{}", format_floating(event.start())));
        lines.push(format!("DTEND:{}", format_floating(event.end())));
        lines.push("END:VEVENT".into());
    }

    lines.push("END:VCALENDAR".into());
    debug!(events = schedule.len(), "calendar serialized");
    lines.join(CRLF)
}

/// VEVENT relu depuis un document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub uid: String,
    pub summary: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Default)]
struct Partial {
    uid: Option<String>,
    summary: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

/// Lecture structurelle : UID / SUMMARY / DTSTART / DTEND de chaque VEVENT.
///
/// Accepte CRLF ou LF ; ignore les propriétés inconnues et les paramètres
/// (`DTSTART;VALUE=...`).
pub fn parse_ics(text: &str) -> Result<Vec<ParsedEvent>> {
    let mut out = Vec::new();
    let mut current: Option<Partial> = None;
    let mut in_calendar = false;

    for (n, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let (name, value) = line
            .split_once(':')
            .with_context(|| format!("line {}: missing ':'", n + 1))?;
        let name = name.split(';').next().unwrap_or(name);

        match (name, value) {
            ("BEGIN", "VCALENDAR") => in_calendar = true,
            ("END", "VCALENDAR") => in_calendar = false,
            ("BEGIN", "VEVENT") => {
                if !in_calendar {
                    bail!("line {}: VEVENT outside VCALENDAR", n + 1);
                }
                if current.is_some() {
                    bail!("line {}: nested VEVENT", n + 1);
                }
                current = Some(Partial::default());
            }
            ("END", "VEVENT") => {
                let p = current
                    .take()
                    .with_context(|| format!("line {}: END:VEVENT without BEGIN", n + 1))?;
                out.push(ParsedEvent {
                    uid: p.uid.unwrap_or_default(),
                    summary: p.summary.unwrap_or_default(),
                    start: p.start.with_context(|| format!("line {}: VEVENT without DTSTART", n + 1))?,
                    end: p.end.with_context(|| format!("line {}: VEVENT without DTEND", n + 1))?,
                });
            }
            (prop, value) => {
                let Some(p) = current.as_mut() else { continue };
                match prop {
                    "UID" => p.uid = Some(value.to_string()),
                    "SUMMARY" => p.summary = Some(value.to_string()),
                    "DTSTART" => {
                        p.start = Some(
                            parse_floating(value)
                                .with_context(|| format!("line {}: bad DTSTART {value}", n + 1))?,
                        )
                    }
                    "DTEND" => {
                        p.end = Some(
                            parse_floating(value)
                                .with_context(|| format!("line {}: bad DTEND {value}", n + 1))?,
                        )
                    }
                    _ => {}
                }
            }
        }
    }

    if current.is_some() {
        bail!("unterminated VEVENT");
    }
    Ok(out)
}
