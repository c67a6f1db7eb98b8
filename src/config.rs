use crate::model::PersonId;
use crate::rotation::{Rotation, RotationPolicy};
use crate::time::{parse_clock_time, ClockTime};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rotation order too short: {policy} policy needs at least {required} people, got {actual}")]
    RotationTooShort {
        policy: &'static str,
        required: usize,
        actual: usize,
    },
    #[error("invalid cycle length {cycle}: must be between 1 and {people}")]
    InvalidCycleLength { cycle: usize, people: usize },
    #[error("{0} must be >= 1")]
    ZeroCadence(&'static str),
    #[error("invalid time of day for {field}: {value:?} (expected HH:MM)")]
    InvalidClockTime { field: &'static str, value: String },
    #[error("date out of range while generating week {week}")]
    DateOutOfRange { week: usize },
}

/// Fenêtre horaire "HH:MM" -> "HH:MM", telle que saisie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new<S: Into<String>, E: Into<String>>(start: S, end: E) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    fn resolve(&self, field: &'static str) -> Result<Window, ConfigError> {
        let parse = |value: &str| {
            parse_clock_time(value).ok_or_else(|| ConfigError::InvalidClockTime {
                field,
                value: value.to_string(),
            })
        };
        Ok(Window {
            start: parse(&self.start)?,
            end: parse(&self.end)?,
        })
    }
}

/// Fenêtres des quatre rôles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Windows {
    pub hospital: TimeWindow,
    pub on_call: TimeWindow,
    pub lane: TimeWindow,
    /// Début le samedi, fin le dimanche.
    pub weekend: TimeWindow,
}

impl Default for Windows {
    fn default() -> Self {
        Self {
            hospital: TimeWindow::new("08:00", "17:00"),
            on_call: TimeWindow::new("17:00", "23:00"),
            lane: TimeWindow::new("17:00", "23:00"),
            weekend: TimeWindow::new("08:00", "20:00"),
        }
    }
}

/// Drapeaux d'affichage des repos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    /// Émet les événements "OFF" (rotation modulaire). En rotation à
    /// titulaire unique, masque l'ODC des semaines lane.
    #[serde(default)]
    pub show_off: bool,
    /// Semaine lane : repos aussi pour la personne normalement off.
    #[serde(default)]
    pub double_off: bool,
}

/// Paramètres d'entrée (immuables) de la génération.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleParams {
    pub start: NaiveDate,
    pub years: f64,
    pub rotation: Vec<PersonId>,
    #[serde(default = "default_policy")]
    pub policy: RotationPolicy,
    #[serde(default)]
    pub windows: Windows,
    #[serde(default = "default_every")]
    pub lane_every_weeks: usize,
    #[serde(default = "default_every")]
    pub weekend_lane_every_weeks: usize,
    #[serde(default)]
    pub flags: Flags,
}

fn default_policy() -> RotationPolicy {
    RotationPolicy::Modular
}

fn default_every() -> usize {
    4
}

impl Default for ScheduleParams {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default(),
            years: 1.0,
            rotation: ["A", "B", "C"].iter().map(PersonId::new).collect(),
            policy: default_policy(),
            windows: Windows::default(),
            lane_every_weeks: default_every(),
            weekend_lane_every_weeks: default_every(),
            flags: Flags::default(),
        }
    }
}

/// Fenêtre résolue en heures entières.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: ClockTime,
    pub end: ClockTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindows {
    pub hospital: Window,
    pub on_call: Window,
    pub lane: Window,
    pub weekend: Window,
}

/// Paramètres validés, prêts pour le générateur.
#[derive(Debug, Clone)]
pub struct Validated {
    pub start: NaiveDate,
    pub years: f64,
    pub rotation: Rotation,
    pub windows: ResolvedWindows,
    pub lane_every_weeks: usize,
    pub weekend_lane_every_weeks: usize,
    pub flags: Flags,
}

impl ScheduleParams {
    /// Échoue avant toute génération si l'ordre de rotation est trop court
    /// pour la politique, si une cadence vaut 0 ou si une heure n'est pas
    /// numérique. Les heures hors plage sont acceptées.
    pub fn validate(&self) -> Result<Validated, ConfigError> {
        let actual = self.rotation.len();
        let required = self.policy.min_people();
        if actual < required {
            return Err(ConfigError::RotationTooShort {
                policy: self.policy.name(),
                required,
                actual,
            });
        }
        if let RotationPolicy::Single {
            cycle_len: Some(cycle),
            ..
        } = self.policy
        {
            if cycle == 0 || cycle > actual {
                return Err(ConfigError::InvalidCycleLength {
                    cycle,
                    people: actual,
                });
            }
        }
        if self.lane_every_weeks == 0 {
            return Err(ConfigError::ZeroCadence("lane_every_weeks"));
        }
        if self.weekend_lane_every_weeks == 0 {
            return Err(ConfigError::ZeroCadence("weekend_lane_every_weeks"));
        }

        let windows = ResolvedWindows {
            hospital: self.windows.hospital.resolve("hospital")?,
            on_call: self.windows.on_call.resolve("on_call")?,
            lane: self.windows.lane.resolve("lane")?,
            weekend: self.windows.weekend.resolve("weekend")?,
        };

        Ok(Validated {
            start: self.start,
            years: self.years,
            rotation: Rotation::new(self.rotation.clone(), self.policy),
            windows,
            lane_every_weeks: self.lane_every_weeks,
            weekend_lane_every_weeks: self.weekend_lane_every_weeks,
            flags: self.flags,
        })
    }
}

/// Lit des paramètres JSON sans les valider (surcharges à appliquer).
pub fn read_params<P: AsRef<Path>>(path: P) -> anyhow::Result<ScheduleParams> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading params {}", path.display()))?;
    let params: ScheduleParams = serde_json::from_slice(&data)
        .with_context(|| format!("parsing params {}", path.display()))?;
    Ok(params)
}

/// Charge des paramètres JSON et les valide.
pub fn load_params<P: AsRef<Path>>(path: P) -> anyhow::Result<ScheduleParams> {
    let params = read_params(path)?;
    params.validate()?;
    Ok(params)
}

pub fn save_params<P: AsRef<Path>>(path: P, params: &ScheduleParams) -> anyhow::Result<()> {
    params.validate()?;
    let json = serde_json::to_vec_pretty(params)?;
    crate::io::write_atomic(path.as_ref(), &json)
}
