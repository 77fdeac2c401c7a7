use chrono::NaiveDate;

use crate::dates::add_days;
use crate::error::CalcError;
use crate::models::{CycleParameters, GestationalInput};

/// Standard gestation from LMP to due date.
pub const GESTATION_DAYS: i64 = 280;
/// Days from ovulation to the next period, independent of cycle length.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// Days from fertilization to due date, before subtracting embryo age.
pub const IVF_TRANSFER_TO_DUE_DAYS: i64 = 266;

/// Reduce any input mode to the equivalent last-menstrual-period date.
///
/// No plausibility checks happen here: ranges are the input boundary's job.
pub fn normalize_lmp(
    input: &GestationalInput,
    cycle: &CycleParameters,
) -> Result<NaiveDate, CalcError> {
    let lmp = match *input {
        GestationalInput::Lmp { last_period_date } => {
            last_period_date.ok_or(CalcError::MissingInput {
                field: "lastPeriodDate",
            })?
        }
        GestationalInput::Conception { conception_date } => {
            let conception = conception_date.ok_or(CalcError::MissingInput {
                field: "conceptionDate",
            })?;
            add_days(conception, -(cycle.cycle_length_days - LUTEAL_PHASE_DAYS))
        }
        GestationalInput::KnownDueDate { due_date } => {
            let due = due_date.ok_or(CalcError::MissingInput { field: "dueDate" })?;
            add_days(due, -GESTATION_DAYS)
        }
        GestationalInput::Ultrasound {
            scan_date,
            ga_weeks,
            ga_days,
        } => {
            let scan = scan_date.ok_or(CalcError::MissingInput { field: "scanDate" })?;
            let ga_total = i64::from(ga_weeks) * 7 + i64::from(ga_days);
            // Go through the due date rather than subtracting GA directly so
            // every mode shares the same EDD arithmetic.
            let edd = add_days(scan, GESTATION_DAYS - ga_total);
            add_days(edd, -GESTATION_DAYS)
        }
        GestationalInput::IvfTransfer {
            transfer_date,
            embryo_day,
        } => {
            let transfer = transfer_date.ok_or(CalcError::MissingInput {
                field: "transferDate",
            })?;
            let edd = add_days(transfer, IVF_TRANSFER_TO_DUE_DAYS - i64::from(embryo_day));
            add_days(edd, -GESTATION_DAYS)
        }
    };

    Ok(lmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn lmp_is_identity() {
        let input = GestationalInput::Lmp {
            last_period_date: Some(d(2024, 1, 1)),
        };
        assert_eq!(
            normalize_lmp(&input, &CycleParameters::default()).unwrap(),
            d(2024, 1, 1)
        );
    }

    #[test]
    fn conception_backs_off_follicular_phase() {
        let input = GestationalInput::Conception {
            conception_date: Some(d(2024, 1, 15)),
        };
        assert_eq!(
            normalize_lmp(&input, &CycleParameters::default()).unwrap(),
            d(2024, 1, 1)
        );
        let long = CycleParameters {
            cycle_length_days: 35,
        };
        assert_eq!(normalize_lmp(&input, &long).unwrap(), d(2023, 12, 25));
    }

    #[test]
    fn known_due_date_subtracts_gestation() {
        let input = GestationalInput::KnownDueDate {
            due_date: Some(d(2024, 12, 25)),
        };
        assert_eq!(
            normalize_lmp(&input, &CycleParameters::default()).unwrap(),
            d(2024, 3, 20)
        );
    }

    #[test]
    fn ultrasound_via_due_date() {
        let input = GestationalInput::Ultrasound {
            scan_date: Some(d(2024, 3, 1)),
            ga_weeks: 8,
            ga_days: 0,
        };
        assert_eq!(
            normalize_lmp(&input, &CycleParameters::default()).unwrap(),
            d(2024, 1, 5)
        );
    }

    #[test]
    fn ultrasound_ignores_cycle_length() {
        let input = GestationalInput::Ultrasound {
            scan_date: Some(d(2024, 3, 1)),
            ga_weeks: 10,
            ga_days: 3,
        };
        let short = CycleParameters {
            cycle_length_days: 21,
        };
        assert_eq!(
            normalize_lmp(&input, &short).unwrap(),
            normalize_lmp(&input, &CycleParameters::default()).unwrap()
        );
    }

    #[test]
    fn ivf_day3_and_day5_differ_by_two_days() {
        let day3 = GestationalInput::IvfTransfer {
            transfer_date: Some(d(2024, 1, 1)),
            embryo_day: 3,
        };
        let day5 = GestationalInput::IvfTransfer {
            transfer_date: Some(d(2024, 1, 1)),
            embryo_day: 5,
        };
        let cycle = CycleParameters::default();
        assert_eq!(normalize_lmp(&day3, &cycle).unwrap(), d(2023, 12, 15));
        assert_eq!(normalize_lmp(&day5, &cycle).unwrap(), d(2023, 12, 13));
    }

    #[test]
    fn missing_fields_are_named() {
        let cycle = CycleParameters::default();
        let cases = [
            (
                GestationalInput::Lmp {
                    last_period_date: None,
                },
                "lastPeriodDate",
            ),
            (
                GestationalInput::Conception {
                    conception_date: None,
                },
                "conceptionDate",
            ),
            (GestationalInput::KnownDueDate { due_date: None }, "dueDate"),
            (
                GestationalInput::Ultrasound {
                    scan_date: None,
                    ga_weeks: 8,
                    ga_days: 0,
                },
                "scanDate",
            ),
            (
                GestationalInput::IvfTransfer {
                    transfer_date: None,
                    embryo_day: 5,
                },
                "transferDate",
            ),
        ];
        for (input, field) in cases {
            assert_eq!(
                normalize_lmp(&input, &cycle),
                Err(CalcError::MissingInput { field }),
                "wrong error for {:?}",
                input.mode()
            );
        }
    }
}
