//! Input boundary: turns loosely typed rows into validated engine values.
//!
//! Rows are validated one by one. A bad row is reported with its position
//! and key while the good rows are kept, so a UI can highlight exactly the
//! rows to fix without throwing away the batch.
use serde::Serialize;

use crate::{
    Amount, CashEntry, Currency, DenominationCatalog, EngineError, Money, ResultEngine, TillCount,
};

/// An entry row as decoded from an external source.
///
/// Amounts are text: `None`, `""` or whitespace mean "nothing entered".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCashEntry {
    pub entity_id: String,
    pub display_name: String,
    pub cash: Option<String>,
    pub check: Option<String>,
    pub locked: bool,
}

/// A till row as decoded from an external source.
///
/// A missing or blank count means none of that denomination was counted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawDenomination {
    pub value: String,
    pub count: Option<String>,
}

/// A rejected row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// Zero-based position in the input.
    pub row: usize,
    /// Entity id or denomination the row was about.
    pub key: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: EngineError,
}

fn serialize_error<S: serde::Serializer>(error: &EngineError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// What passed validation, plus what did not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intake<T> {
    pub accepted: T,
    pub rejected: Vec<RowError>,
}

impl<T> Intake<T> {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Parses one amount cell. Blank is `Unset`; negative is refused.
pub fn parse_amount(raw: Option<&str>, currency: Currency, field: &str) -> ResultEngine<Amount> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(Amount::Unset);
    };
    let value = Money::parse_major(text, currency)
        .map_err(|err| EngineError::InvalidAmount(format!("{field}: {err}")))?;
    if value.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "{field} amount must be >= 0, got {text}"
        )));
    }
    Ok(Amount::Set(value))
}

/// Parses one count cell. Blank is zero; only whole numbers are accepted.
pub fn parse_count(raw: Option<&str>) -> ResultEngine<i64> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(0);
    };
    text.parse::<i64>()
        .map_err(|_| EngineError::InvalidCount(format!("not a whole number: {text}")))
}

fn entry_from_raw(raw: RawCashEntry, currency: Currency) -> ResultEngine<CashEntry> {
    if raw.entity_id.trim().is_empty() {
        return Err(EngineError::MissingEntityId);
    }
    let cash = parse_amount(raw.cash.as_deref(), currency, "cash")?;
    let check = parse_amount(raw.check.as_deref(), currency, "check")?;
    CashEntry::new(raw.entity_id, raw.display_name, cash, check, raw.locked)
}

/// Validates entry rows. The first occurrence of an entity id wins; later
/// duplicates are rejected.
pub fn entries(
    rows: impl IntoIterator<Item = RawCashEntry>,
    currency: Currency,
) -> Intake<Vec<CashEntry>> {
    let mut intake = Intake {
        accepted: Vec::new(),
        rejected: Vec::new(),
    };
    for (row, raw) in rows.into_iter().enumerate() {
        let key = raw.entity_id.trim().to_string();
        let result = entry_from_raw(raw, currency).and_then(|entry| {
            if intake
                .accepted
                .iter()
                .any(|e: &CashEntry| e.entity_id == entry.entity_id)
            {
                Err(EngineError::DuplicateEntity(entry.entity_id.to_string()))
            } else {
                Ok(entry)
            }
        });
        match result {
            Ok(entry) => intake.accepted.push(entry),
            Err(error) => intake.rejected.push(RowError { row, key, error }),
        }
    }
    intake
}

/// Validates till rows against `catalog` and fills a [`TillCount`].
///
/// Catalog denominations missing from `rows` stay at zero. A denomination
/// listed twice is rejected on its second row.
pub fn till(
    rows: impl IntoIterator<Item = RawDenomination>,
    catalog: &DenominationCatalog,
) -> Intake<TillCount> {
    let mut till = TillCount::new(catalog);
    let mut seen: Vec<Money> = Vec::new();
    let mut rejected = Vec::new();
    for (row, raw) in rows.into_iter().enumerate() {
        let key = raw.value.trim().to_string();
        let result = Money::parse_major(&raw.value, catalog.currency())
            .map_err(|_| EngineError::InvalidDenomination(format!("invalid denomination: {key}")))
            .and_then(|value| {
                if seen.contains(&value) {
                    return Err(EngineError::InvalidDenomination(format!(
                        "{value} listed twice"
                    )));
                }
                till.set(value, parse_count(raw.count.as_deref())?)?;
                seen.push(value);
                Ok(())
            });
        if let Err(error) = result {
            rejected.push(RowError { row, key, error });
        }
    }
    Intake {
        accepted: till,
        rejected,
    }
}
