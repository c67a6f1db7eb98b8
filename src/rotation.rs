//! Moteur de rotation : semaine -> titulaires des rôles.

use crate::model::PersonId;
use serde::{Deserialize, Serialize};

/// Politique de rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Hôpital / ODC / repos décalés de 0, 1, 2 dans l'ordre (n >= 3).
    Modular,
    /// Une seule personne tient hôpital, ODC et week-end ; cycle de
    /// `cycle_len` semaines (`None` = longueur de l'ordre).
    Single {
        #[serde(default)]
        cycle_len: Option<usize>,
    },
}

impl RotationPolicy {
    /// Taille minimale de l'ordre de rotation.
    pub fn min_people(&self) -> usize {
        match self {
            RotationPolicy::Modular => 3,
            RotationPolicy::Single { .. } => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RotationPolicy::Modular => "modular",
            RotationPolicy::Single { .. } => "single",
        }
    }
}

/// Titulaires pour une semaine donnée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRoles<'a> {
    pub hospital: &'a PersonId,
    pub on_call: &'a PersonId,
    /// Absent en politique `Single`.
    pub off: Option<&'a PersonId>,
}

/// Ordre de rotation validé + politique.
#[derive(Debug, Clone)]
pub struct Rotation {
    order: Vec<PersonId>,
    policy: RotationPolicy,
}

impl Rotation {
    /// L'appelant garantit `order.len() >= policy.min_people()` (voir
    /// `ScheduleParams::validate`).
    pub(crate) fn new(order: Vec<PersonId>, policy: RotationPolicy) -> Self {
        Self { order, policy }
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    pub fn order(&self) -> &[PersonId] {
        &self.order
    }

    fn at(&self, idx: usize) -> &PersonId {
        &self.order[idx % self.order.len()]
    }

    pub fn resolve_roles(&self, week: usize) -> WeekRoles<'_> {
        match self.policy {
            RotationPolicy::Modular => WeekRoles {
                hospital: self.at(week),
                on_call: self.at(week + 1),
                off: Some(self.at(week + 2)),
            },
            RotationPolicy::Single { cycle_len, .. } => {
                let k = cycle_len.unwrap_or(self.order.len()).max(1);
                let duty = self.at(week % k);
                WeekRoles {
                    hospital: duty,
                    on_call: duty,
                    off: None,
                }
            }
        }
    }
}

/// Semaine lane : `week mod every == 0` (every >= 1).
pub fn is_lane_week(week: usize, every: usize) -> bool {
    every > 0 && week % every == 0
}

/// Même test pour le week-end lane, avec sa propre cadence.
pub fn is_lane_weekend(week: usize, every: usize) -> bool {
    is_lane_week(week, every)
}
