use super::{event_between, Week};
use crate::config::{ConfigError, Validated, Window};
use crate::model::{DutyKind, Event, PersonId};
use crate::rotation::RotationPolicy;
use chrono::NaiveDate;

/// Lundi..vendredi relatifs au début de semaine.
const WEEKDAYS: i64 = 5;

/// Émet les jours ouvrés de la semaine.
///
/// Retourne `false` dès qu'un jour dépasse `end` : la boucle s'arrête et
/// plus aucun jour ouvré n'est émis pour les semaines suivantes.
pub(super) fn emit_weekdays(
    cfg: &Validated,
    week: &Week<'_>,
    end: NaiveDate,
    out: &mut Vec<Event>,
) -> Result<bool, ConfigError> {
    for offset in 0..WEEKDAYS {
        let date = week.day(offset)?;
        if date > end {
            return Ok(false);
        }
        let mut push = |kind: DutyKind,
                        person: Option<&PersonId>,
                        window: Window|
         -> Result<(), ConfigError> {
            out.push(event_between(kind, person, window, date, date, week)?);
            Ok(())
        };
        let w = &cfg.windows;

        push(DutyKind::Hospital, Some(week.roles.hospital), w.hospital)?;

        match cfg.rotation.policy() {
            RotationPolicy::Modular => {
                if week.lane {
                    push(DutyKind::Lane, None, w.lane)?;
                    if cfg.flags.show_off {
                        push(DutyKind::Off, Some(week.roles.on_call), w.on_call)?;
                        if cfg.flags.double_off {
                            if let Some(off) = week.roles.off {
                                push(DutyKind::Off, Some(off), w.on_call)?;
                            }
                        }
                    }
                } else {
                    push(DutyKind::OnCall, Some(week.roles.on_call), w.on_call)?;
                    if cfg.flags.show_off {
                        if let Some(off) = week.roles.off {
                            push(DutyKind::Off, Some(off), w.on_call)?;
                        }
                    }
                }
            }
            RotationPolicy::Single { .. } => {
                // semaine lane + repos visibles : l'ODC du titulaire est masqué
                if !(week.lane && cfg.flags.show_off) {
                    push(DutyKind::OnCall, Some(week.roles.on_call), w.on_call)?;
                }
                if week.lane {
                    push(DutyKind::Lane, None, w.lane)?;
                }
            }
        }
    }
    Ok(true)
}
