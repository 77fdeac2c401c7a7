use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use gestdate::calculator::{calculate, Clock, SystemClock};
use gestdate::config::Config;
use gestdate::dates::to_iso_date_string;
use gestdate::history::History;
use gestdate::models::{CycleParameters, CycleProjection, GestationalResult, Trimester};
use gestdate::projection::upcoming_cycles;
use gestdate::{storage, validation};

use crate::cli::{CalcArgs, Cli, Command, CyclesArgs, HistoryAction};

/// Everything a command needs besides its own arguments.
struct Session {
    config: Config,
    history_path: Option<PathBuf>,
    passphrase: Option<String>,
    clock: Box<dyn Clock>,
}

impl Session {
    fn history_path(&self) -> Result<PathBuf> {
        if let Some(path) = self.history_path.as_ref().or(self.config.history.path.as_ref()) {
            return Ok(path.clone());
        }
        storage::default_history_path().context("cannot locate history file")
    }

    fn passphrase(&self) -> Result<&str> {
        self.passphrase
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("no passphrase: use --passphrase or set GESTDATE_PASSPHRASE")
            })
    }

    fn load_history(&self) -> Result<(PathBuf, History)> {
        let path = self.history_path()?;
        let data = storage::load(&path, self.passphrase()?)
            .with_context(|| format!("failed to open history: {}", path.display()))?;
        Ok((path, History::from_data(data, self.config.history.max_records)))
    }

    fn cycle(&self, cycle_length: Option<i64>) -> CycleParameters {
        cycle_length
            .map(|cycle_length_days| CycleParameters { cycle_length_days })
            .unwrap_or_else(|| self.config.cycle_parameters())
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let session = Session {
        config,
        history_path: cli.history_path,
        passphrase: cli.passphrase,
        clock: Box::new(SystemClock),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Calc(args) => calc(&session, &args, &mut out),
        Command::Cycles(args) => cycles(&session, &args, &mut out),
        Command::History { action } => history(&session, action, &mut out),
    }
}

/// Validate, calculate and optionally save, without printing anything.
fn calc_result(session: &Session, args: &CalcArgs) -> Result<(NaiveDate, GestationalResult)> {
    let input = args.mode.to_input();
    let cycle = session.cycle(args.cycle_length);
    if let Err(e) = validation::validate(&input, &cycle) {
        warn!(mode = ?input.mode(), error = %e, "input rejected");
        return Err(e.into());
    }
    if args.save && !session.config.history.enabled {
        anyhow::bail!("cannot save: history is disabled in config");
    }

    let today = args.today.unwrap_or_else(|| session.clock.today());
    let result = calculate(&input, &cycle, today)?;
    info!(
        mode = ?input.mode(),
        lmp = %result.normalized_lmp,
        edd = %result.estimated_due_date,
        "calculation complete"
    );

    if args.save {
        let (path, mut history) = session.load_history()?;
        let id = history.append(today, input, cycle, result);
        storage::save(&path, session.passphrase()?, history.data())
            .with_context(|| format!("failed to save history: {}", path.display()))?;
        info!(%id, records = history.len(), "calculation saved");
    }

    Ok((today, result))
}

fn calc(session: &Session, args: &CalcArgs, out: &mut dyn Write) -> Result<()> {
    let (today, result) = calc_result(session, args)?;
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        write!(out, "{}", render_result(&result, today))?;
    }
    Ok(())
}

fn cycles(session: &Session, args: &CyclesArgs, out: &mut dyn Write) -> Result<()> {
    let cycle = session.cycle(args.cycle_length);
    validation::validate_cycle(&cycle)?;

    let projections = upcoming_cycles(args.lmp, &cycle, usize::from(args.count));
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&projections)?)?;
    } else {
        write!(out, "{}", render_cycles(&projections))?;
    }
    Ok(())
}

fn history(session: &Session, action: HistoryAction, out: &mut dyn Write) -> Result<()> {
    match action {
        HistoryAction::List => {
            let (_, history) = session.load_history()?;
            if history.is_empty() {
                writeln!(out, "No saved calculations.")?;
            }
            for record in history.records() {
                writeln!(
                    out,
                    "{}  {:<22} LMP {}  EDD {}",
                    to_iso_date_string(record.calculated_on),
                    record.mode.to_string(),
                    to_iso_date_string(record.result.normalized_lmp),
                    to_iso_date_string(record.result.estimated_due_date),
                )?;
            }
        }
        HistoryAction::Export => {
            let (_, history) = session.load_history()?;
            writeln!(out, "{}", serde_json::to_string_pretty(history.data())?)?;
        }
        HistoryAction::Clear => {
            let path = session.history_path()?;
            storage::wipe(&path)
                .with_context(|| format!("failed to delete history: {}", path.display()))?;
            writeln!(out, "History cleared.")?;
        }
    }
    Ok(())
}

fn trimester_label(trimester: Option<Trimester>) -> &'static str {
    match trimester {
        Some(Trimester::First) => "first",
        Some(Trimester::Second) => "second",
        Some(Trimester::Third) => "third",
        None => "not yet pregnant",
    }
}

/// Human-readable summary of one calculation.
pub fn render_result(result: &GestationalResult, today: NaiveDate) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: String| {
        out.push_str(&format!("{label:<22}{value}\n"));
    };
    line("Last menstrual period", to_iso_date_string(result.normalized_lmp));
    line("Ovulation", to_iso_date_string(result.ovulation_date));
    line(
        "Fertile window",
        format!(
            "{} to {}",
            to_iso_date_string(result.fertile_window_start),
            to_iso_date_string(result.fertile_window_end)
        ),
    );
    line("Estimated due date", to_iso_date_string(result.estimated_due_date));
    line(
        "Gestational age",
        format!("{} on {}", result.gestational_age, to_iso_date_string(today)),
    );
    line("Trimester", trimester_label(result.trimester).to_string());
    line("Progress", format!("{:.1}%", result.progress_percentage));
    line("Days until due", result.days_until_due.to_string());
    out
}

/// One line per projected cycle.
pub fn render_cycles(projections: &[CycleProjection]) -> String {
    projections
        .iter()
        .map(|p| {
            format!(
                "cycle {}  ovulation {}  fertile {} to {}  next period {}\n",
                to_iso_date_string(p.cycle_start),
                to_iso_date_string(p.ovulation_date),
                to_iso_date_string(p.fertile_window_start),
                to_iso_date_string(p.fertile_window_end),
                to_iso_date_string(p.next_period_date),
            )
        })
        .collect()
}
