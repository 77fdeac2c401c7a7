use chrono::NaiveDate;

use crate::dates::days_between;
use crate::models::{GestationalAge, ProgressReport, Trimester};

const FULL_TERM_WEEKS: f64 = 40.0;
const SECOND_TRIMESTER_WEEK: i64 = 14;
const THIRD_TRIMESTER_WEEK: i64 = 28;

/// How far along a pregnancy is on `now`, counted from the normalized LMP.
///
/// Nothing is clamped below zero: an LMP after `now` yields negative days,
/// weeks and percentage so the caller can flag the input. The percentage is
/// capped at 100, the week count is not.
pub fn report(lmp: NaiveDate, now: NaiveDate) -> ProgressReport {
    let days_pregnant = days_between(lmp, now);
    let current_week = days_pregnant.div_euclid(7);
    let progress_percentage = (current_week as f64 / FULL_TERM_WEEKS * 100.0).min(100.0);

    ProgressReport {
        days_pregnant,
        current_week,
        progress_percentage,
        gestational_age: GestationalAge {
            weeks: current_week,
            days: days_pregnant.rem_euclid(7),
        },
        trimester: trimester(days_pregnant),
    }
}

fn trimester(days_pregnant: i64) -> Option<Trimester> {
    if days_pregnant < 0 {
        return None;
    }
    let week = days_pregnant / 7;
    Some(if week < SECOND_TRIMESTER_WEEK {
        Trimester::First
    } else if week < THIRD_TRIMESTER_WEEK {
        Trimester::Second
    } else {
        Trimester::Third
    })
}
