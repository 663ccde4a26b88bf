use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Money;

/// Recorded totals of one calendar day.
///
/// `None` means "no recorded data", which is not the same as a recorded zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotals {
    pub day_key: NaiveDate,
    pub total_cash: Option<Money>,
    pub total_check: Option<Money>,
}

impl DayTotals {
    #[must_use]
    pub const fn new(day_key: NaiveDate, total_cash: Option<Money>, total_check: Option<Money>) -> Self {
        Self {
            day_key,
            total_cash,
            total_check,
        }
    }

    /// A day nothing was ever recorded for.
    #[must_use]
    pub const fn empty(day_key: NaiveDate) -> Self {
        Self::new(day_key, None, None)
    }

    /// At least one total is recorded; a recorded zero counts as data.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.total_cash.is_some() || self.total_check.is_some()
    }

    /// The same totals filed under another day.
    #[must_use]
    pub const fn rekeyed(self, day_key: NaiveDate) -> Self {
        Self { day_key, ..self }
    }
}
