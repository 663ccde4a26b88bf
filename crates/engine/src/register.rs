//! A day's worksheet and its cash register state.
//!
//! The worksheet owns mutation of entries; aggregation and reconciliation only
//! ever see a snapshot (see [`Worksheet::snapshot`]). Once the register is
//! closed every entry is locked and nothing can be edited, added or removed.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Amount, CashEntry, Currency, DailyReconciliation, DayTotals, EngineError, EntityId,
    ResultEngine, TillCount,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterStatus {
    #[default]
    Open,
    Closed,
}

/// Which fields of an entry a UI may offer for editing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FieldAccess {
    pub cash_editable: bool,
    pub check_editable: bool,
    pub removable: bool,
}

impl FieldAccess {
    const READ_ONLY: FieldAccess = FieldAccess {
        cash_editable: false,
        check_editable: false,
        removable: false,
    };

    const EDITABLE: FieldAccess = FieldAccess {
        cash_editable: true,
        check_editable: true,
        removable: true,
    };
}

/// Snapshot produced when a register is closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayClose {
    pub reconciliation: DailyReconciliation,
    pub totals: DayTotals,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Worksheet {
    day_key: NaiveDate,
    currency: Currency,
    status: RegisterStatus,
    entries: Vec<CashEntry>,
}

impl Worksheet {
    #[must_use]
    pub fn new(day_key: NaiveDate, currency: Currency) -> Self {
        Self {
            day_key,
            currency,
            status: RegisterStatus::Open,
            entries: Vec::new(),
        }
    }

    /// Rebuilds a worksheet loaded from storage.
    ///
    /// A closed register locks every entry, whatever their stored flag says.
    pub fn restore(
        day_key: NaiveDate,
        currency: Currency,
        status: RegisterStatus,
        entries: Vec<CashEntry>,
    ) -> ResultEngine<Self> {
        let mut worksheet = Self::new(day_key, currency);
        for entry in entries {
            worksheet.push_unique(entry)?;
        }
        if status == RegisterStatus::Closed {
            worksheet.lock_all();
        }
        worksheet.status = status;
        Ok(worksheet)
    }

    #[must_use]
    pub fn day_key(&self) -> NaiveDate {
        self.day_key
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub fn status(&self) -> RegisterStatus {
        self.status
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == RegisterStatus::Closed
    }

    /// The entries as they stand, for aggregation.
    #[must_use]
    pub fn snapshot(&self) -> &[CashEntry] {
        &self.entries
    }

    /// Adds a blank entry for `entity_id`.
    pub fn add_entry(
        &mut self,
        entity_id: impl Into<EntityId>,
        display_name: impl Into<String>,
    ) -> ResultEngine<&CashEntry> {
        self.ensure_open()?;
        self.push_unique(CashEntry::blank(entity_id, display_name))?;
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Adds many entries at once; nothing is added if any of them is refused.
    pub fn import(&mut self, entries: impl IntoIterator<Item = CashEntry>) -> ResultEngine<usize> {
        self.ensure_open()?;
        let mut staged = self.entries.clone();
        let before = staged.len();
        for entry in entries {
            if staged.iter().any(|e| e.entity_id == entry.entity_id) {
                return Err(EngineError::DuplicateEntity(entry.entity_id.to_string()));
            }
            staged.push(entry);
        }
        let added = staged.len() - before;
        self.entries = staged;
        Ok(added)
    }

    pub fn set_cash(&mut self, entity_id: &EntityId, amount: Amount) -> ResultEngine<()> {
        self.editable_entry(entity_id)?.set_cash(amount)
    }

    pub fn set_check(&mut self, entity_id: &EntityId, amount: Amount) -> ResultEngine<()> {
        self.editable_entry(entity_id)?.set_check(amount)
    }

    /// Removes an entry from the worksheet.
    pub fn remove_entry(&mut self, entity_id: &EntityId) -> ResultEngine<CashEntry> {
        self.editable_entry(entity_id)?;
        let index = self
            .position(entity_id)
            .ok_or_else(|| EngineError::KeyNotFound(entity_id.to_string()))?;
        Ok(self.entries.remove(index))
    }

    /// Which fields of `entity_id` are editable right now.
    pub fn field_access(&self, entity_id: &EntityId) -> ResultEngine<FieldAccess> {
        let entry = self
            .entries
            .iter()
            .find(|e| &e.entity_id == entity_id)
            .ok_or_else(|| EngineError::KeyNotFound(entity_id.to_string()))?;
        if self.is_closed() || entry.locked {
            Ok(FieldAccess::READ_ONLY)
        } else {
            Ok(FieldAccess::EDITABLE)
        }
    }

    /// Reconciles the day against `till`, then closes the register and locks
    /// every entry. The worksheet is left untouched if reconciliation fails.
    pub fn close(&mut self, till: &TillCount) -> ResultEngine<DayClose> {
        self.ensure_open()?;
        if till.currency() != self.currency {
            return Err(EngineError::CurrencyMismatch(format!(
                "worksheet currency is {}, till is counted in {}",
                self.currency,
                till.currency()
            )));
        }
        let reconciliation = DailyReconciliation::compute(&self.entries, till.counts())?;
        let totals = reconciliation.day_totals(self.day_key);
        self.lock_all();
        self.status = RegisterStatus::Closed;
        Ok(DayClose {
            reconciliation,
            totals,
        })
    }

    fn ensure_open(&self) -> ResultEngine<()> {
        if self.is_closed() {
            return Err(EngineError::RegisterClosed(self.day_key));
        }
        Ok(())
    }

    fn position(&self, entity_id: &EntityId) -> Option<usize> {
        self.entries.iter().position(|e| &e.entity_id == entity_id)
    }

    fn editable_entry(&mut self, entity_id: &EntityId) -> ResultEngine<&mut CashEntry> {
        self.ensure_open()?;
        let index = self
            .position(entity_id)
            .ok_or_else(|| EngineError::KeyNotFound(entity_id.to_string()))?;
        let entry = &mut self.entries[index];
        if entry.locked {
            return Err(EngineError::EntryLocked(entity_id.to_string()));
        }
        Ok(entry)
    }

    fn push_unique(&mut self, entry: CashEntry) -> ResultEngine<()> {
        if self.position(&entry.entity_id).is_some() {
            return Err(EngineError::DuplicateEntity(entry.entity_id.to_string()));
        }
        self.entries.push(entry);
        Ok(())
    }

    fn lock_all(&mut self) {
        for entry in &mut self.entries {
            entry.locked = true;
        }
    }
}
