//! Générateur de planning : boucle semaine / jour, rotation, tri final.

mod weekday;
mod weekend;

use crate::config::{ConfigError, ScheduleParams, Validated, Window};
use crate::model::{DutyKind, Event, PersonId, Schedule};
use crate::rotation::{is_lane_week, WeekRoles};
use crate::time::add_days_to_date;
use chrono::NaiveDate;
use tracing::{debug, trace};

/// Jours moyens par an (approximation assumée, pas un calcul exact).
const DAYS_PER_YEAR: f64 = 365.25;

/// Période couverte : `[start, end]` et nombre de semaines à parcourir.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub total_days: i64,
    pub end: NaiveDate,
    pub weeks: usize,
}

impl Span {
    /// `total_days = floor(years * 365.25)`, `weeks = ceil(total_days / 7)`.
    pub fn new(start: NaiveDate, years: f64) -> Option<Self> {
        let total_days = (years * DAYS_PER_YEAR).floor() as i64;
        let end = add_days_to_date(start, total_days)?;
        let weeks = usize::try_from((total_days.max(0) + 6) / 7).ok()?;
        Some(Self {
            total_days,
            end,
            weeks,
        })
    }
}

/// Contexte d'une semaine de la boucle.
pub(crate) struct Week<'a> {
    pub index: usize,
    pub start: NaiveDate,
    pub roles: WeekRoles<'a>,
    pub lane: bool,
}

impl Week<'_> {
    fn day(&self, offset: i64) -> Result<NaiveDate, ConfigError> {
        add_days_to_date(self.start, offset).ok_or(ConfigError::DateOutOfRange { week: self.index })
    }
}

/// Valide les paramètres puis génère le planning complet.
///
/// Échoue sans résultat partiel si l'ordre de rotation est trop court.
pub fn generate(params: &ScheduleParams) -> Result<Schedule, ConfigError> {
    let cfg = params.validate()?;
    generate_validated(&cfg)
}

pub fn generate_validated(cfg: &Validated) -> Result<Schedule, ConfigError> {
    let span = Span::new(cfg.start, cfg.years).ok_or(ConfigError::DateOutOfRange { week: 0 })?;
    let mut events = Vec::new();
    let mut weekdays_open = true;

    for index in 0..span.weeks {
        let offset = i64::try_from(index)
            .ok()
            .and_then(|w| w.checked_mul(7))
            .ok_or(ConfigError::DateOutOfRange { week: index })?;
        let week = Week {
            index,
            start: add_days_to_date(cfg.start, offset)
                .ok_or(ConfigError::DateOutOfRange { week: index })?,
            roles: cfg.rotation.resolve_roles(index),
            lane: is_lane_week(index, cfg.lane_every_weeks),
        };
        if week.lane {
            trace!(week = index, start = %week.start, "lane week");
        }

        if weekdays_open {
            weekdays_open = weekday::emit_weekdays(cfg, &week, span.end, &mut events)?;
        }
        weekend::emit_weekend(cfg, &week, span.end, &mut events)?;
    }

    let schedule = Schedule::new(events);
    debug!(
        policy = cfg.rotation.policy().name(),
        weeks = span.weeks,
        events = schedule.len(),
        "schedule generated"
    );
    Ok(schedule)
}

/// Construit un événement sur une fenêtre, fin placée sur `end_date`.
fn event_between(
    kind: DutyKind,
    person: Option<&PersonId>,
    window: Window,
    start_date: NaiveDate,
    end_date: NaiveDate,
    week: &Week<'_>,
) -> Result<Event, ConfigError> {
    let out_of_range = || ConfigError::DateOutOfRange { week: week.index };
    let start = window.start.on(start_date).ok_or_else(out_of_range)?;
    let end = window.end.on(end_date).ok_or_else(out_of_range)?;
    Ok(Event::new(kind, person, start, end))
}
