use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 28;

/// The known reference point a calculation starts from.
///
/// Date fields are optional because they come straight from an input form;
/// a missing date is reported by the normalizer, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GestationalInput {
    #[serde(rename_all = "camelCase")]
    Lmp {
        #[serde(default)]
        last_period_date: Option<NaiveDate>,
    },
    #[serde(rename_all = "camelCase")]
    Conception {
        #[serde(default)]
        conception_date: Option<NaiveDate>,
    },
    #[serde(rename_all = "camelCase")]
    KnownDueDate {
        #[serde(default)]
        due_date: Option<NaiveDate>,
    },
    #[serde(rename_all = "camelCase")]
    Ultrasound {
        #[serde(default)]
        scan_date: Option<NaiveDate>,
        ga_weeks: u32,
        ga_days: u32,
    },
    #[serde(rename_all = "camelCase")]
    IvfTransfer {
        #[serde(default)]
        transfer_date: Option<NaiveDate>,
        embryo_day: u8,
    },
}

impl GestationalInput {
    pub fn mode(&self) -> InputMode {
        match self {
            GestationalInput::Lmp { .. } => InputMode::Lmp,
            GestationalInput::Conception { .. } => InputMode::Conception,
            GestationalInput::KnownDueDate { .. } => InputMode::KnownDueDate,
            GestationalInput::Ultrasound { .. } => InputMode::Ultrasound,
            GestationalInput::IvfTransfer { .. } => InputMode::IvfTransfer,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    Lmp,
    Conception,
    KnownDueDate,
    Ultrasound,
    IvfTransfer,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InputMode::Lmp => "last menstrual period",
            InputMode::Conception => "conception date",
            InputMode::KnownDueDate => "known due date",
            InputMode::Ultrasound => "ultrasound",
            InputMode::IvfTransfer => "IVF transfer",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CycleParameters {
    pub cycle_length_days: i64,
}

impl Default for CycleParameters {
    fn default() -> Self {
        Self {
            cycle_length_days: DEFAULT_CYCLE_LENGTH_DAYS,
        }
    }
}

/// Ovulation, fertile window and due date derived from a normalized LMP.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CycleProjection {
    pub cycle_start: NaiveDate,
    pub ovulation_date: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub estimated_due_date: NaiveDate,
    pub next_period_date: NaiveDate,
}

/// Completed weeks plus leftover days, e.g. 12w 3d.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GestationalAge {
    pub weeks: i64,
    pub days: i64,
}

impl std::fmt::Display for GestationalAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}w {}d", self.weeks, self.days)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trimester {
    First,
    Second,
    Third,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub days_pregnant: i64,
    pub current_week: i64,
    pub progress_percentage: f64,
    pub gestational_age: GestationalAge,
    pub trimester: Option<Trimester>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GestationalResult {
    pub normalized_lmp: NaiveDate,
    pub estimated_due_date: NaiveDate,
    pub ovulation_date: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub next_period_date: NaiveDate,
    pub days_pregnant: i64,
    pub current_week: i64,
    pub progress_percentage: f64,
    pub gestational_age: GestationalAge,
    pub trimester: Option<Trimester>,
    pub days_until_due: i64,
}

/// One saved calculation in the on-device history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    pub id: Uuid,
    pub calculated_on: NaiveDate,
    pub mode: InputMode,
    pub input: GestationalInput,
    pub cycle: CycleParameters,
    pub result: GestationalResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HistoryData {
    #[serde(default)]
    pub records: Vec<CycleRecord>,
}
