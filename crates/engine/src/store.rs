//! Day-totals persistence seam and the migration workflow on top of it.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{DayTotals, MigrationDecision, MigrationStrategy, ResultEngine, migration};

/// Where recorded day totals live.
///
/// Implementations map transport or availability failures to
/// [`EngineError::Store`](crate::EngineError::Store).
pub trait DayTotalsStore {
    /// Totals recorded for `day`, `None` if the day was never stored.
    fn load(&self, day: NaiveDate) -> ResultEngine<Option<DayTotals>>;

    /// Replaces the totals stored for `totals.day_key`.
    fn save(&mut self, totals: DayTotals) -> ResultEngine<()>;

    /// Days holding data, oldest first.
    fn days_with_data(&self) -> ResultEngine<Vec<NaiveDate>>;
}

/// In-memory store, mostly for tests and batch runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    days: BTreeMap<NaiveDate, DayTotals>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<DayTotals> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = DayTotals>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().map(|t| (t.day_key, t)).collect(),
        }
    }
}

impl DayTotalsStore for MemoryStore {
    fn load(&self, day: NaiveDate) -> ResultEngine<Option<DayTotals>> {
        Ok(self.days.get(&day).copied())
    }

    fn save(&mut self, totals: DayTotals) -> ResultEngine<()> {
        self.days.insert(totals.day_key, totals);
        Ok(())
    }

    fn days_with_data(&self) -> ResultEngine<Vec<NaiveDate>> {
        Ok(self
            .days
            .values()
            .filter(|t| t.has_data())
            .map(|t| t.day_key)
            .collect())
    }
}

/// Outcome of [`migrate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub decision: MigrationDecision,
    /// Fetched again after the write: migration can change the set.
    pub days_with_data: Vec<NaiveDate>,
}

/// Migrates `source_day` onto `target_day` and persists the result.
///
/// Both days are read fresh from `store`. An ambiguous migration (both days
/// hold data and no `strategy`) is returned as
/// [`EngineError::AmbiguousMigration`](crate::EngineError::AmbiguousMigration)
/// and nothing is written.
pub fn migrate<S: DayTotalsStore + ?Sized>(
    store: &mut S,
    source_day: NaiveDate,
    target_day: NaiveDate,
    strategy: Option<MigrationStrategy>,
) -> ResultEngine<MigrationReport> {
    let source = store
        .load(source_day)?
        .unwrap_or_else(|| DayTotals::empty(source_day));
    let target = store
        .load(target_day)?
        .unwrap_or_else(|| DayTotals::empty(target_day));

    let decision = migration::decide(&source, &target, strategy)?;
    match decision.target_totals() {
        Some(totals) => {
            tracing::info!("migrating {source_day} onto {target_day}: {decision:?}");
            store.save(*totals)?;
        }
        None => tracing::debug!("nothing recorded on {source_day}, migration skipped"),
    }

    Ok(MigrationReport {
        decision,
        days_with_data: store.days_with_data()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineError, Money};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn memory_store_lists_only_days_with_data() {
        let store: MemoryStore = vec![
            DayTotals::new(day(3), Some(Money::ZERO), None),
            DayTotals::empty(day(1)),
            DayTotals::new(day(2), None, Some(Money::new(5))),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.days_with_data().unwrap(), vec![day(2), day(3)]);
    }

    #[test]
    fn ambiguous_migration_writes_nothing() {
        let mut store: MemoryStore = vec![
            DayTotals::new(day(1), Some(Money::new(100)), None),
            DayTotals::new(day(2), Some(Money::new(50)), None),
        ]
        .into_iter()
        .collect();
        let err = migrate(&mut store, day(1), day(2), None).unwrap_err();
        assert!(matches!(err, EngineError::AmbiguousMigration { .. }));
        assert_eq!(
            store.load(day(2)).unwrap(),
            Some(DayTotals::new(day(2), Some(Money::new(50)), None))
        );
    }

    #[test]
    fn normal_migration_adds_the_target_day() {
        let mut store: MemoryStore =
            std::iter::once(DayTotals::new(day(1), Some(Money::new(100)), None)).collect();
        let report = migrate(&mut store, day(1), day(5), None).unwrap();
        assert!(matches!(report.decision, MigrationDecision::Normal { .. }));
        assert_eq!(report.days_with_data, vec![day(1), day(5)]);
    }

    #[test]
    fn missing_source_is_a_noop() {
        let mut store = MemoryStore::new();
        let report = migrate(&mut store, day(1), day(2), None).unwrap();
        assert_eq!(report.decision, MigrationDecision::NoOp);
        assert!(report.days_with_data.is_empty());
    }
}
