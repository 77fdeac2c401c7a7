//! Pregnancy and ovulation date calculator.
//!
//! Any of five reference points (last period, conception, known due date,
//! ultrasound dating, IVF transfer) is reduced to an equivalent last
//! menstrual period, from which due date, ovulation, fertile window and
//! progress are derived. The engine is pure: "today" is always passed in.

pub mod calculator;
pub mod config;
pub mod crypto;
pub mod dates;
pub mod error;
pub mod history;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod projection;
pub mod storage;
pub mod validation;

pub use calculator::{calculate, Clock, FixedClock, SystemClock};
pub use error::CalcError;
pub use models::{CycleParameters, GestationalInput, GestationalResult};
