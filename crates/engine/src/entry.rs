//! The module contains the `CashEntry` type: one child's cash/check payment
//! recorded on a day's worksheet.
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{Amount, Money, ResultEngine};

/// Opaque identifier of the entity (child) an entry belongs to.
///
/// External sources hand out either strings or integers; both are kept as
/// text so that `"42"` and `42` name the same entity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// One entity's recorded payment for a given day.
///
/// Amounts are never negative: [`CashEntry::new`] and the intake boundary
/// reject them. The per-entry total is never stored, see [`CashEntry::total`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CashEntry {
    pub entity_id: EntityId,
    pub display_name: String,
    cash_amount: Amount,
    check_amount: Amount,
    pub locked: bool,
}

impl CashEntry {
    /// A freshly added entry: nothing entered yet, not locked.
    #[must_use]
    pub fn blank(entity_id: impl Into<EntityId>, display_name: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            display_name: display_name.into(),
            cash_amount: Amount::Unset,
            check_amount: Amount::Unset,
            locked: false,
        }
    }

    /// Builds an entry, rejecting negative amounts.
    pub fn new(
        entity_id: impl Into<EntityId>,
        display_name: impl Into<String>,
        cash_amount: Amount,
        check_amount: Amount,
        locked: bool,
    ) -> ResultEngine<Self> {
        let mut entry = Self::blank(entity_id, display_name);
        entry.cash_amount = ensure_non_negative(cash_amount, "cash")?;
        entry.check_amount = ensure_non_negative(check_amount, "check")?;
        entry.locked = locked;
        Ok(entry)
    }

    #[must_use]
    pub fn cash_amount(&self) -> Amount {
        self.cash_amount
    }

    #[must_use]
    pub fn check_amount(&self) -> Amount {
        self.check_amount
    }

    /// `cash + check`, unset counting as zero. Recomputed on every call.
    ///
    /// Saturates instead of overflowing; the ledger fold uses checked sums.
    #[must_use]
    pub fn total(&self) -> Money {
        Money::new(
            self.cash_amount
                .value_or_zero()
                .cents()
                .saturating_add(self.check_amount.value_or_zero().cents()),
        )
    }

    /// The total as shown in a worksheet cell: empty while nothing is entered.
    #[must_use]
    pub fn display_total(&self) -> Amount {
        if self.cash_amount.is_set() || self.check_amount.is_set() {
            Amount::Set(self.total())
        } else {
            Amount::Unset
        }
    }

    /// Whether the entry carries money and belongs on a receipt.
    #[must_use]
    pub fn is_exportable(&self) -> bool {
        self.cash_amount.is_positive() || self.check_amount.is_positive()
    }

    pub(crate) fn set_cash(&mut self, amount: Amount) -> ResultEngine<()> {
        self.cash_amount = ensure_non_negative(amount, "cash")?;
        Ok(())
    }

    pub(crate) fn set_check(&mut self, amount: Amount) -> ResultEngine<()> {
        self.check_amount = ensure_non_negative(amount, "check")?;
        Ok(())
    }
}

impl fmt::Display for CashEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} cash={} check={}",
            self.entity_id, self.display_name, self.cash_amount, self.check_amount
        )
    }
}

pub(crate) fn ensure_non_negative(amount: Amount, field: &str) -> ResultEngine<Amount> {
    match amount {
        Amount::Set(value) if value.is_negative() => Err(crate::EngineError::InvalidAmount(
            format!("{field} amount must be >= 0, got {value}"),
        )),
        other => Ok(other),
    }
}
