//! Plausibility checks applied to form input before it reaches the engine.

use crate::error::CalcError;
use crate::models::{CycleParameters, GestationalInput};

pub const CYCLE_LENGTH_RANGE: std::ops::RangeInclusive<i64> = 21..=35;
pub const GA_WEEKS_RANGE: std::ops::RangeInclusive<u32> = 4..=20;
pub const GA_DAYS_RANGE: std::ops::RangeInclusive<u32> = 0..=6;
pub const EMBRYO_DAYS: [u8; 2] = [3, 5];

/// Check the cycle length against the supported range.
pub fn validate_cycle(cycle: &CycleParameters) -> Result<(), CalcError> {
    if !CYCLE_LENGTH_RANGE.contains(&cycle.cycle_length_days) {
        return Err(CalcError::InvalidRange {
            field: "cycleLengthDays",
            value: cycle.cycle_length_days,
            expected: "21..=35",
        });
    }
    Ok(())
}

/// Check an input and its cycle parameters, reporting the first violation.
///
/// Missing dates are left for the normalizer to report.
pub fn validate(input: &GestationalInput, cycle: &CycleParameters) -> Result<(), CalcError> {
    validate_cycle(cycle)?;

    match *input {
        GestationalInput::Ultrasound {
            ga_weeks, ga_days, ..
        } => {
            if !GA_WEEKS_RANGE.contains(&ga_weeks) {
                return Err(CalcError::InvalidRange {
                    field: "gaWeeks",
                    value: i64::from(ga_weeks),
                    expected: "4..=20",
                });
            }
            if !GA_DAYS_RANGE.contains(&ga_days) {
                return Err(CalcError::InvalidRange {
                    field: "gaDays",
                    value: i64::from(ga_days),
                    expected: "0..=6",
                });
            }
        }
        GestationalInput::IvfTransfer { embryo_day, .. } => {
            if !EMBRYO_DAYS.contains(&embryo_day) {
                return Err(CalcError::InvalidRange {
                    field: "embryoDay",
                    value: i64::from(embryo_day),
                    expected: "3 or 5",
                });
            }
        }
        GestationalInput::Lmp { .. }
        | GestationalInput::Conception { .. }
        | GestationalInput::KnownDueDate { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scan(ga_weeks: u32, ga_days: u32) -> GestationalInput {
        GestationalInput::Ultrasound {
            scan_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            ga_weeks,
            ga_days,
        }
    }

    #[test]
    fn accepts_sane_input() {
        assert!(validate(&scan(8, 0), &CycleParameters::default()).is_ok());
        assert!(validate(&scan(20, 6), &CycleParameters::default()).is_ok());
    }

    #[test]
    fn rejects_cycle_length() {
        let short = CycleParameters {
            cycle_length_days: 20,
        };
        let err = validate(&scan(8, 0), &short).unwrap_err();
        assert_eq!(
            err,
            CalcError::InvalidRange {
                field: "cycleLengthDays",
                value: 20,
                expected: "21..=35",
            }
        );
    }

    #[test]
    fn rejects_gestational_age() {
        let cycle = CycleParameters::default();
        assert!(matches!(
            validate(&scan(3, 0), &cycle),
            Err(CalcError::InvalidRange { field: "gaWeeks", .. })
        ));
        assert!(matches!(
            validate(&scan(8, 7), &cycle),
            Err(CalcError::InvalidRange { field: "gaDays", .. })
        ));
    }

    #[test]
    fn rejects_embryo_day() {
        let input = GestationalInput::IvfTransfer {
            transfer_date: None,
            embryo_day: 4,
        };
        assert!(matches!(
            validate(&input, &CycleParameters::default()),
            Err(CalcError::InvalidRange {
                field: "embryoDay",
                value: 4,
                ..
            })
        ));
    }

    #[test]
    fn missing_date_is_not_a_range_error() {
        let input = GestationalInput::Lmp {
            last_period_date: None,
        };
        assert!(validate(&input, &CycleParameters::default()).is_ok());
    }
}
