use super::{event_between, Week};
use crate::config::{ConfigError, Validated};
use crate::model::{DutyKind, Event};
use crate::rotation::is_lane_weekend;
use chrono::NaiveDate;

/// Un seul événement samedi (début) -> dimanche (fin), ou rien si le
/// samedi dépasse `end`.
pub(super) fn emit_weekend(
    cfg: &Validated,
    week: &Week<'_>,
    end: NaiveDate,
    out: &mut Vec<Event>,
) -> Result<(), ConfigError> {
    let sat = week.day(5)?;
    if sat > end {
        return Ok(());
    }
    let sun = week.day(6)?;
    let window = cfg.windows.weekend;

    let event = if is_lane_weekend(week.index, cfg.weekend_lane_every_weeks) {
        event_between(DutyKind::WeekendLane, None, window, sat, sun, week)?
    } else {
        event_between(DutyKind::Weekend, Some(week.roles.hospital), window, sat, sun, week)?
    };
    out.push(event);
    Ok(())
}
