//! Ledger aggregation: folds a day's cash entries into cash/check totals.
//!
//! The fold is pure. It reads a snapshot of entries (locked ones included)
//! and never mutates it; per-entry totals are recomputed on every pass.
use serde::Serialize;

use crate::{Amount, CashEntry, EntityId, Money, ResultEngine};

/// Per-entry line of a ledger pass, as displayed or exported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryTotal {
    pub entity_id: EntityId,
    pub display_name: String,
    pub cash: Amount,
    pub check: Amount,
    /// Empty while neither amount is entered.
    pub total: Amount,
    pub exportable: bool,
}

/// Result of aggregating a day's entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub sum_cash: Money,
    pub sum_check: Money,
    pub sum_total: Money,
    /// Entries with `cash > 0` or `check > 0`.
    pub exportable_count: usize,
    pub rows: Vec<EntryTotal>,
}

impl LedgerSummary {
    /// Rows eligible for a receipt, in worksheet order.
    pub fn exportable(&self) -> impl Iterator<Item = &EntryTotal> {
        self.rows.iter().filter(|row| row.exportable)
    }
}

/// Aggregates `entries` into ledger totals.
///
/// Unset amounts count as zero. Inputs are assumed to be validated already
/// (non-negative); an `i64` overflow of a sum is reported as
/// [`EngineError::Overflow`](crate::EngineError::Overflow).
pub fn aggregate(entries: &[CashEntry]) -> ResultEngine<LedgerSummary> {
    let mut summary = LedgerSummary {
        rows: Vec::with_capacity(entries.len()),
        ..LedgerSummary::default()
    };

    for entry in entries {
        let cash = entry.cash_amount();
        let check = entry.check_amount();
        summary.sum_cash = summary.sum_cash.try_add(cash.value_or_zero(), "cash total")?;
        summary.sum_check = summary
            .sum_check
            .try_add(check.value_or_zero(), "check total")?;

        let exportable = entry.is_exportable();
        if exportable {
            summary.exportable_count += 1;
        }
        let total = match entry.display_total() {
            Amount::Unset => Amount::Unset,
            Amount::Set(_) => Amount::Set(
                cash.value_or_zero()
                    .try_add(check.value_or_zero(), "entry total")?,
            ),
        };
        summary.rows.push(EntryTotal {
            entity_id: entry.entity_id.clone(),
            display_name: entry.display_name.clone(),
            cash,
            check,
            total,
            exportable,
        });
    }

    summary.sum_total = summary.sum_cash.try_add(summary.sum_check, "grand total")?;
    Ok(summary)
}
