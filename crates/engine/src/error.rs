//! The module contains the errors the engine can return.
//!
//! Every error is recoverable by the caller; none of them is fatal to the
//! process. The main ones are:
//!
//! - [`InvalidAmount`] when a cash or check amount is negative or not a number.
//! - [`InvalidCount`] / [`InvalidDenomination`] for malformed till input.
//! - [`AmbiguousMigration`] when both days hold data and no strategy was chosen.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCount`]: EngineError::InvalidCount
//!  [`InvalidDenomination`]: EngineError::InvalidDenomination
//!  [`AmbiguousMigration`]: EngineError::AmbiguousMigration
use chrono::NaiveDate;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid count: {0}")]
    InvalidCount(String),
    #[error("Invalid denomination: {0}")]
    InvalidDenomination(String),
    #[error("Both {source_day} and {target_day} hold data: choose merge or overwrite")]
    AmbiguousMigration {
        source_day: NaiveDate,
        target_day: NaiveDate,
    },
    #[error("Invalid migration: {0}")]
    InvalidMigration(String),
    #[error("\"{0}\" already present!")]
    DuplicateEntity(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Entity id is missing")]
    MissingEntityId,
    #[error("Entry \"{0}\" is locked")]
    EntryLocked(String),
    #[error("Register for {0} is closed")]
    RegisterClosed(NaiveDate),
    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),
    #[error("Amount overflow: {0}")]
    Overflow(String),
    #[error("Store error: {0}")]
    Store(String),
}
