//! Till reconciliation: counts bills and coins by denomination and compares
//! the physical till with the ledger grand total.
//!
//! Amounts are integer cents, so `till_total` is the same for any ordering of
//! the counts and a zero difference is exactly zero.
use serde::Serialize;

use crate::{Currency, DenominationCatalog, EngineError, Money, ResultEngine};

/// One denomination's tally in a till.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DenominationCount {
    denomination_value: Money,
    count: u32,
}

impl DenominationCount {
    /// Validates and builds a tally. `count` is signed so that negative
    /// counts coming from outside can be reported instead of wrapped.
    pub fn new(denomination_value: Money, count: i64) -> ResultEngine<Self> {
        if !denomination_value.is_positive() {
            return Err(EngineError::InvalidDenomination(format!(
                "denomination must be > 0, got {denomination_value}"
            )));
        }
        if count < 0 {
            return Err(EngineError::InvalidCount(format!(
                "count for {denomination_value} must be >= 0, got {count}"
            )));
        }
        let count = u32::try_from(count).map_err(|_| {
            EngineError::InvalidCount(format!("count for {denomination_value} is too large"))
        })?;
        Ok(Self {
            denomination_value,
            count,
        })
    }

    #[must_use]
    pub fn denomination_value(&self) -> Money {
        self.denomination_value
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// `denomination_value × count`.
    pub fn line_total(&self) -> ResultEngine<Money> {
        self.denomination_value.checked_mul(self.count).ok_or_else(|| {
            EngineError::Overflow(format!("{} × {}", self.denomination_value, self.count))
        })
    }
}

/// Where the till stands against the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum Standing {
    Balanced,
    /// The till holds more than the ledger.
    Over(Money),
    /// The till holds less than the ledger.
    Short(Money),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TillReconciliation {
    pub till_total: Money,
    pub ledger_total: Money,
    /// `till_total - ledger_total`; positive is over, negative is short.
    pub difference: Money,
    pub has_discrepancy: bool,
}

impl TillReconciliation {
    #[must_use]
    pub fn standing(&self) -> Standing {
        match self.difference.cents().signum() {
            0 => Standing::Balanced,
            1 => Standing::Over(self.difference),
            _ => Standing::Short(self.difference.abs()),
        }
    }
}

/// Sums the till and compares it with the ledger grand total.
pub fn reconcile(counts: &[DenominationCount], sum_total: Money) -> ResultEngine<TillReconciliation> {
    let till_total = counts.iter().try_fold(Money::ZERO, |acc, count| {
        acc.try_add(count.line_total()?, "till total")
    })?;
    let difference = till_total
        .checked_sub(sum_total)
        .ok_or_else(|| EngineError::Overflow("till difference".to_string()))?;
    Ok(TillReconciliation {
        till_total,
        ledger_total: sum_total,
        difference,
        has_discrepancy: !difference.is_zero(),
    })
}

/// A till sheet bound to a denomination catalog.
///
/// It starts with every catalog denomination at zero and only lets counts
/// change; denominations are never added or removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TillCount {
    currency: Currency,
    counts: Vec<DenominationCount>,
}

impl TillCount {
    #[must_use]
    pub fn new(catalog: &DenominationCatalog) -> Self {
        Self {
            currency: catalog.currency(),
            counts: catalog
                .values()
                .iter()
                .map(|&denomination_value| DenominationCount {
                    denomination_value,
                    count: 0,
                })
                .collect(),
        }
    }

    /// Sets the count for `denomination_value`.
    pub fn set(&mut self, denomination_value: Money, count: i64) -> ResultEngine<()> {
        let updated = DenominationCount::new(denomination_value, count)?;
        let slot = self
            .counts
            .iter_mut()
            .find(|c| c.denomination_value == denomination_value)
            .ok_or_else(|| {
                EngineError::InvalidDenomination(format!(
                    "{denomination_value} is not in the catalog"
                ))
            })?;
        *slot = updated;
        Ok(())
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub fn counts(&self) -> &[DenominationCount] {
        &self.counts
    }

    pub fn reconcile(&self, sum_total: Money) -> ResultEngine<TillReconciliation> {
        reconcile(&self.counts, sum_total)
    }
}
