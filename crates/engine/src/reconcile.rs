//! A full day's reconciliation: ledger first, then the till.
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    CashEntry, DayTotals, DenominationCount, LedgerSummary, ResultEngine, TillReconciliation,
    ledger, till,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyReconciliation {
    pub summary: LedgerSummary,
    pub till: TillReconciliation,
}

impl DailyReconciliation {
    /// Aggregates `entries`, then reconciles `counts` against the grand total.
    pub fn compute(entries: &[CashEntry], counts: &[DenominationCount]) -> ResultEngine<Self> {
        let summary = ledger::aggregate(entries)?;
        let till = till::reconcile(counts, summary.sum_total)?;
        Ok(Self { summary, till })
    }

    /// The ledger sums as recorded totals for `day_key`.
    #[must_use]
    pub fn day_totals(&self, day_key: NaiveDate) -> DayTotals {
        DayTotals::new(
            day_key,
            Some(self.summary.sum_cash),
            Some(self.summary.sum_check),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, Money};

    #[test]
    fn till_is_compared_with_the_ledger_grand_total() {
        let entries = vec![
            CashEntry::new(
                "1",
                "Mia",
                Amount::Set(Money::new(3_000)),
                Amount::Set(Money::new(1_500)),
                false,
            )
            .unwrap(),
        ];
        let counts = vec![
            DenominationCount::new(Money::new(2_000), 1).unwrap(),
            DenominationCount::new(Money::new(1_000), 1).unwrap(),
        ];
        let day = DailyReconciliation::compute(&entries, &counts).unwrap();
        assert_eq!(day.summary.sum_total, Money::new(4_500));
        assert_eq!(day.till.ledger_total, Money::new(4_500));
        assert_eq!(day.till.difference, Money::new(-1_500));

        let key = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let totals = day.day_totals(key);
        assert_eq!(totals.total_cash, Some(Money::new(3_000)));
        assert_eq!(totals.total_check, Some(Money::new(1_500)));
    }
}
