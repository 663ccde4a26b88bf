use std::{fs, path::Path, process::ExitCode};

use api_types::worksheet::WorksheetFile;
use clap::Parser;
use engine::{Currency, DailyReconciliation, DayTotalsStore, EngineError};
use serde::Serialize;

use cli::{Cli, Command, MigrateArgs, WorksheetArgs};
use error::{AppError, Result};
use settings::Settings;
use store::JsonDayStore;

mod cli;
mod convert;
mod error;
mod report;
mod settings;
mod store;

/// Rows were rejected while loading a worksheet, or the command failed.
const EXIT_FAILURE: u8 = 1;
/// Both days hold data and no strategy was given.
const EXIT_AMBIGUOUS: u8 = 2;

/// How a command that ran to completion went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Success,
    /// Some worksheet rows were rejected.
    Rejected,
}

fn exit_code(result: &Result<Status>) -> u8 {
    match result {
        Ok(Status::Success) => 0,
        Ok(Status::Rejected) => EXIT_FAILURE,
        Err(AppError::Engine(EngineError::AmbiguousMigration { .. })) => EXIT_AMBIGUOUS,
        Err(_) => EXIT_FAILURE,
    }
}

fn error_message(err: &AppError) -> String {
    match err {
        AppError::Engine(EngineError::AmbiguousMigration {
            source_day,
            target_day,
        }) => format!(
            "both {source_day} and {target_day} hold data; rerun with --strategy merge|overwrite"
        ),
        err => err.to_string(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("cassa: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(level) = cli.log_level.clone() {
        settings.log_level = level;
    }
    if let Some(path) = cli.store.clone() {
        settings.store_path = path;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "cassa={level},engine={level}",
            level = settings.log_level
        ))
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli.command, &settings);
    if let Err(err) = &result {
        tracing::error!("{err}");
        eprintln!("cassa: {}", error_message(err));
    }
    ExitCode::from(exit_code(&result))
}

fn run(command: Command, settings: &Settings) -> Result<Status> {
    match command {
        Command::Reconcile(args) => reconcile(&args, settings),
        Command::Close(args) => close(&args, settings),
        Command::Migrate(args) => migrate(&args, settings),
        Command::Days(output) => {
            let db = JsonDayStore::open(&settings.store_path)?;
            let days: Vec<String> = db
                .days_with_data()?
                .into_iter()
                .map(convert::format_day)
                .collect();
            if output.json {
                print_json(&days)?;
            } else {
                for day in days {
                    println!("{day}");
                }
            }
            Ok(Status::Success)
        }
        Command::Denominations(args) => {
            let currency = match args.currency.as_deref() {
                Some(code) => Currency::try_from(code)?,
                None => settings.currency()?,
            };
            for value in settings.catalog(currency)?.values() {
                println!("{}", value.format(currency));
            }
            Ok(Status::Success)
        }
    }
}

fn read_worksheet(path: &Path, settings: &Settings) -> Result<convert::LoadedWorksheet> {
    let file: WorksheetFile = serde_json::from_str(&fs::read_to_string(path)?)?;
    let loaded = convert::load_worksheet(&file, |currency| settings.catalog(currency))?;
    for row in &loaded.rejected {
        tracing::warn!(
            "{} row {} ({}) rejected: {}",
            row.section,
            row.row,
            row.key,
            row.message
        );
    }
    Ok(loaded)
}

fn reconcile(args: &WorksheetArgs, settings: &Settings) -> Result<Status> {
    let loaded = read_worksheet(&args.path, settings)?;
    let day = DailyReconciliation::compute(loaded.worksheet.snapshot(), loaded.till.counts())?;
    let clean = loaded.rejected.is_empty();
    let view = report::reconciliation_view(&loaded.worksheet, &day, loaded.rejected);
    if args.output.json {
        print_json(&view)?;
    } else {
        print!("{}", report::render_reconciliation(&view));
    }
    Ok(if clean { Status::Success } else { Status::Rejected })
}

/// Records the day's totals, then rewrites the worksheet as closed.
///
/// Saving a day's totals twice is harmless, so the store goes first: if the
/// worksheet cannot be rewritten it still reads as open and `close` can be
/// rerun.
fn close(args: &WorksheetArgs, settings: &Settings) -> Result<Status> {
    let mut loaded = read_worksheet(&args.path, settings)?;
    if !loaded.rejected.is_empty() {
        eprintln!(
            "cassa: {} row(s) rejected; fix the worksheet before closing",
            loaded.rejected.len()
        );
        return Ok(Status::Rejected);
    }

    let closed = loaded.worksheet.close(&loaded.till)?;
    let mut db = JsonDayStore::open(&settings.store_path)?;
    db.save(closed.totals)?;
    tracing::info!(
        "closed {} and recorded totals in {}",
        loaded.worksheet.day_key(),
        db.path().display()
    );

    let file = convert::worksheet_file(&loaded.worksheet, &loaded.till);
    if let Err(err) = write_worksheet(&args.path, &file) {
        tracing::error!(
            "totals for {} are recorded but {} still reads as open: {err}; rerun close",
            loaded.worksheet.day_key(),
            args.path.display()
        );
        return Err(err);
    }

    let view = report::reconciliation_view(&loaded.worksheet, &closed.reconciliation, Vec::new());
    if args.output.json {
        print_json(&view)?;
    } else {
        print!("{}", report::render_reconciliation(&view));
    }
    Ok(Status::Success)
}

fn migrate(args: &MigrateArgs, settings: &Settings) -> Result<Status> {
    let source = convert::parse_day(&args.from)?;
    let target = convert::parse_day(&args.to)?;
    let mut db = JsonDayStore::open(&settings.store_path)?;
    let outcome = engine::store::migrate(&mut db, source, target, args.strategy.map(Into::into))?;
    let view = report::migration_view(source, target, &outcome);
    if args.output.json {
        print_json(&view)?;
    } else {
        print!("{}", report::render_migration(&view));
    }
    Ok(Status::Success)
}

fn write_worksheet(path: &Path, file: &WorksheetFile) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_string_pretty(file)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
