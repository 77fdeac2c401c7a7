use chrono::NaiveDate;

use crate::dates::{add_days, checked_add_days};
use crate::models::{CycleParameters, CycleProjection};
use crate::normalize::{GESTATION_DAYS, LUTEAL_PHASE_DAYS};

/// Days of the fertile window before ovulation.
pub const FERTILE_DAYS_BEFORE: i64 = 5;
/// Days of the fertile window after ovulation.
pub const FERTILE_DAYS_AFTER: i64 = 1;

/// Project ovulation, fertile window and due date from a normalized LMP.
/// Ovulation sits 14 days before the next period; the fertile window runs
/// from 5 days before to 1 day after it.
pub fn project(lmp: NaiveDate, cycle: &CycleParameters) -> CycleProjection {
    let ovulation_date = add_days(lmp, cycle.cycle_length_days - LUTEAL_PHASE_DAYS);

    CycleProjection {
        cycle_start: lmp,
        ovulation_date,
        fertile_window_start: add_days(ovulation_date, -FERTILE_DAYS_BEFORE),
        fertile_window_end: add_days(ovulation_date, FERTILE_DAYS_AFTER),
        estimated_due_date: add_days(lmp, GESTATION_DAYS),
        next_period_date: add_days(lmp, cycle.cycle_length_days),
    }
}

/// Projections for `count` consecutive cycles starting at `lmp`.
///
/// Each cycle's due date is the one that would apply if conception happened
/// in that cycle. The list ends early once a cycle's dates would fall outside
/// the representable calendar.
pub fn upcoming_cycles(
    lmp: NaiveDate,
    cycle: &CycleParameters,
    count: usize,
) -> Vec<CycleProjection> {
    let len = cycle.cycle_length_days;
    let reach = GESTATION_DAYS.max(len).max(LUTEAL_PHASE_DAYS);

    (0..count)
        .map_while(|k| {
            let start = checked_add_days(lmp, i64::try_from(k).ok()?.checked_mul(len)?)?;
            checked_add_days(start, reach)?;
            checked_add_days(start, len - LUTEAL_PHASE_DAYS - FERTILE_DAYS_BEFORE)?;
            Some(project(start, cycle))
        })
        .collect()
}
