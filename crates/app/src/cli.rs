use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::MigrationStrategy;

#[derive(Parser, Debug)]
#[command(name = "cassa")]
#[command(about = "Daily cash reconciliation for the front desk (bills, till, day totals)")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the log level (e.g. `debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Override the day-totals store path.
    #[arg(long, global = true)]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate a worksheet and reconcile its till.
    Reconcile(WorksheetArgs),
    /// Reconcile, record the day's totals and close the register.
    Close(WorksheetArgs),
    /// Move a day's recorded totals onto another day.
    Migrate(MigrateArgs),
    /// List the days holding recorded totals.
    Days(OutputArgs),
    /// Print the denomination catalog.
    Denominations(DenominationsArgs),
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct WorksheetArgs {
    /// Worksheet JSON file.
    pub path: PathBuf,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Source day (YYYY-MM-DD).
    #[arg(long)]
    pub from: String,
    /// Target day (YYYY-MM-DD).
    #[arg(long)]
    pub to: String,
    /// Required when both days already hold data.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct DenominationsArgs {
    /// Currency code; defaults to the configured one.
    #[arg(long)]
    pub currency: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Merge,
    Overwrite,
}

impl From<StrategyArg> for MigrationStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Merge => MigrationStrategy::Merge,
            StrategyArg::Overwrite => MigrationStrategy::Overwrite,
        }
    }
}
