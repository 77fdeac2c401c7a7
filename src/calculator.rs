use chrono::NaiveDate;

use crate::dates::days_between;
use crate::error::CalcError;
use crate::models::{CycleParameters, GestationalInput, GestationalResult};
use crate::normalize::normalize_lmp;
use crate::progress;
use crate::projection;

/// Source of "today" for the application layer.
///
/// The engine never asks a clock itself; callers resolve a date and pass it
/// to [`calculate`].
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Run a full calculation for one input.
///
/// Fails only when the active mode's date is missing, in which case nothing
/// else is computed.
pub fn calculate(
    input: &GestationalInput,
    cycle: &CycleParameters,
    now: NaiveDate,
) -> Result<GestationalResult, CalcError> {
    let lmp = normalize_lmp(input, cycle)?;
    tracing::trace!(mode = ?input.mode(), %lmp, "normalized input");

    let projection = projection::project(lmp, cycle);
    let progress = progress::report(lmp, now);

    Ok(GestationalResult {
        normalized_lmp: lmp,
        estimated_due_date: projection.estimated_due_date,
        ovulation_date: projection.ovulation_date,
        fertile_window_start: projection.fertile_window_start,
        fertile_window_end: projection.fertile_window_end,
        next_period_date: projection.next_period_date,
        days_pregnant: progress.days_pregnant,
        current_week: progress.current_week,
        progress_percentage: progress.progress_percentage,
        gestational_age: progress.gestational_age,
        trimester: progress.trimester,
        days_until_due: days_between(now, projection.estimated_due_date),
    })
}
