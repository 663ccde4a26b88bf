//! Daily cash reconciliation for a childcare front desk.
//!
//! The engine is a pure computation library:
//!
//! - [`ledger::aggregate`] folds a day's [`CashEntry`] list into cash, check
//!   and grand totals;
//! - [`till::reconcile`] sums a till by denomination and reports the
//!   over/short against the ledger;
//! - [`migration::plan`] decides how a day's totals move onto another day.
//!
//! Everything works on integer cents ([`Money`]). Fetching and persisting
//! data belongs to the caller; [`DayTotalsStore`] is the only seam.
pub use amount::Amount;
pub use currency::{Currency, DenominationCatalog};
pub use day_totals::DayTotals;
pub use entry::{CashEntry, EntityId};
pub use error::EngineError;
pub use ledger::{EntryTotal, LedgerSummary};
pub use migration::{
    MigrationDecision, MigrationPlan, MigrationStrategy, PendingMigration,
};
pub use money::Money;
pub use reconcile::DailyReconciliation;
pub use register::{DayClose, FieldAccess, RegisterStatus, Worksheet};
pub use store::{DayTotalsStore, MemoryStore, MigrationReport};
pub use till::{DenominationCount, Standing, TillCount, TillReconciliation};

mod amount;
mod currency;
mod day_totals;
mod entry;
mod error;
pub mod intake;
pub mod ledger;
pub mod migration;
mod money;
mod reconcile;
mod register;
pub mod store;
pub mod till;

type ResultEngine<T> = Result<T, EngineError>;
