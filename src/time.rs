//! Utilitaires de temps « flottant » (sans fuseau).
//!
//! Les heures "HH:MM" ne sont pas bornées : `25:99` déborde sur le jour
//! suivant au moment du placement sur une date, comme un setter date/heure
//! classique.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Heure de la journée telle que saisie, sans normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: i64,
    pub minute: i64,
}

impl ClockTime {
    pub fn new(hour: i64, minute: i64) -> Self {
        Self { hour, minute }
    }

    /// Place l'heure sur `date`. Les composantes hors plage roulent sur les
    /// heures / jours adjacents ; `None` seulement si le résultat sort du
    /// calendrier représentable.
    pub fn on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        date.and_time(NaiveTime::MIN)
            .checked_add_signed(Duration::try_hours(self.hour)?)?
            .checked_add_signed(Duration::try_minutes(self.minute)?)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Découpe "HH:MM" sur ':' et convertit les deux parties en entiers.
///
/// Aucune validation de plage ; une troisième partie ("08:30:00") est
/// ignorée. Retourne `None` si l'heure ou les minutes ne sont pas des
/// entiers (ou si le ':' manque).
pub fn parse_clock_time(text: &str) -> Option<ClockTime> {
    let mut parts = text.trim().splitn(3, ':');
    let hour = parts.next()?.trim().parse::<i64>().ok()?;
    let minute = parts.next()?.trim().parse::<i64>().ok()?;
    Some(ClockTime { hour, minute })
}

/// `n` jours calendaires après `at`, heure conservée.
pub fn add_days(at: NaiveDateTime, n: i64) -> Option<NaiveDateTime> {
    at.checked_add_signed(Duration::try_days(n)?)
}

/// Variante date seule ; `None` au-delà des bornes de `NaiveDate`.
pub fn add_days_to_date(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(n)?)
}

/// Rendu `YYYYMMDDTHHMM00` sans suffixe de fuseau.
pub fn format_floating(at: NaiveDateTime) -> String {
    at.format("%Y%m%dT%H%M00").to_string()
}

/// Inverse de [`format_floating`] (accepte aussi des secondes non nulles).
pub fn parse_floating(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), "%Y%m%dT%H%M%S").ok()
}
