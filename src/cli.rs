use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use gestdate::dates::parse_iso_date;
use gestdate::models::GestationalInput;

/// Upper bound for `cycles --count`.
pub const MAX_PROJECTED_CYCLES: i64 = 120;

/// On-device pregnancy and ovulation date calculator.
#[derive(Parser)]
#[command(name = "gestdate", version, about = "Pregnancy and ovulation date calculator")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true, default_value = "gestdate.toml")]
    pub config: PathBuf,

    /// Override the history file location from config.
    #[arg(long, global = true)]
    pub history_path: Option<PathBuf>,

    /// Passphrase protecting the history file.
    #[arg(long, global = true, env = "GESTDATE_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Calculate due date, ovulation and progress from one reference point.
    Calc(CalcArgs),
    /// Show ovulation and fertile windows for upcoming cycles.
    Cycles(CyclesArgs),
    /// Inspect or manage saved calculations.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

/// Arguments for the `calc` subcommand.
#[derive(clap::Args)]
pub struct CalcArgs {
    /// Cycle length in days (overrides config).
    #[arg(long, global = true)]
    pub cycle_length: Option<i64>,

    /// Date to measure progress against (defaults to today).
    #[arg(long, global = true, value_parser = parse_iso_date)]
    pub today: Option<NaiveDate>,

    /// Append the result to the encrypted history.
    #[arg(long, global = true)]
    pub save: bool,

    /// Print the result as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Reference point the calculation starts from.
    #[command(subcommand)]
    pub mode: ModeArgs,
}

/// The five supported input modes.
#[derive(Subcommand)]
pub enum ModeArgs {
    /// First day of the last menstrual period.
    Lmp {
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<NaiveDate>,
    },
    /// Date of conception.
    Conception {
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<NaiveDate>,
    },
    /// A due date already known, e.g. from a clinician.
    DueDate {
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<NaiveDate>,
    },
    /// Gestational age measured on an ultrasound scan.
    Ultrasound {
        #[arg(long, value_parser = parse_iso_date)]
        scan_date: Option<NaiveDate>,
        /// Completed weeks at the scan.
        #[arg(long)]
        weeks: u32,
        /// Extra days at the scan.
        #[arg(long, default_value_t = 0)]
        days: u32,
    },
    /// IVF embryo transfer.
    Ivf {
        #[arg(long, value_parser = parse_iso_date)]
        transfer_date: Option<NaiveDate>,
        /// Embryo age at transfer (3 or 5).
        #[arg(long, default_value_t = 5)]
        embryo_day: u8,
    },
}

impl ModeArgs {
    pub fn to_input(&self) -> GestationalInput {
        match *self {
            ModeArgs::Lmp { date } => GestationalInput::Lmp {
                last_period_date: date,
            },
            ModeArgs::Conception { date } => GestationalInput::Conception {
                conception_date: date,
            },
            ModeArgs::DueDate { date } => GestationalInput::KnownDueDate { due_date: date },
            ModeArgs::Ultrasound {
                scan_date,
                weeks,
                days,
            } => GestationalInput::Ultrasound {
                scan_date,
                ga_weeks: weeks,
                ga_days: days,
            },
            ModeArgs::Ivf {
                transfer_date,
                embryo_day,
            } => GestationalInput::IvfTransfer {
                transfer_date,
                embryo_day,
            },
        }
    }
}

/// Arguments for the `cycles` subcommand.
#[derive(clap::Args)]
pub struct CyclesArgs {
    /// First day of the last menstrual period.
    #[arg(long, value_parser = parse_iso_date)]
    pub lmp: NaiveDate,

    /// Cycle length in days (overrides config).
    #[arg(long)]
    pub cycle_length: Option<i64>,

    /// Number of cycles to project (1 to 120).
    #[arg(
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u16).range(1..=MAX_PROJECTED_CYCLES)
    )]
    pub count: u16,

    /// Print the projections as JSON.
    #[arg(long)]
    pub json: bool,
}

/// `history` actions.
#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved calculations, oldest first.
    List,
    /// Print the decrypted history as JSON.
    Export,
    /// Delete the history file.
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ultrasound() {
        let cli = Cli::try_parse_from([
            "gestdate",
            "calc",
            "--today",
            "2024-04-01",
            "ultrasound",
            "--scan-date",
            "2024-03-01",
            "--weeks",
            "8",
        ])
        .unwrap();
        let Command::Calc(args) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(
            args.mode.to_input(),
            GestationalInput::Ultrasound {
                scan_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                ga_weeks: 8,
                ga_days: 0,
            }
        );
    }

    #[test]
    fn date_may_be_omitted() {
        let cli = Cli::try_parse_from(["gestdate", "calc", "ivf"]).unwrap();
        let Command::Calc(args) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(
            args.mode.to_input(),
            GestationalInput::IvfTransfer {
                transfer_date: None,
                embryo_day: 5,
            }
        );
    }

    #[test]
    fn calc_flags_after_mode() {
        let cli = Cli::try_parse_from([
            "gestdate",
            "calc",
            "lmp",
            "--date",
            "2024-01-01",
            "--cycle-length",
            "30",
            "--today",
            "2024-02-01",
            "--save",
            "--json",
        ])
        .unwrap();
        let Command::Calc(args) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.cycle_length, Some(30));
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert!(args.save);
        assert!(args.json);
        assert_eq!(
            args.mode.to_input(),
            GestationalInput::Lmp {
                last_period_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            }
        );
    }

    #[test]
    fn cycles_count_is_bounded() {
        let parse = |count: &str| {
            Cli::try_parse_from(["gestdate", "cycles", "--lmp", "2024-01-01", "--count", count])
        };
        assert!(parse("120").is_ok());
        assert!(parse("121").is_err());
        assert!(parse("0").is_err());
        assert!(parse("4000000").is_err());
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["gestdate", "calc", "lmp", "--date", "01/02/2024"]).is_err());
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
