//! Day totals kept in a JSON file (an array of `DayTotalsRow`).
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use api_types::day_totals::DayTotalsRow;
use chrono::NaiveDate;
use engine::{DayTotals, DayTotalsStore, EngineError};

use crate::{convert, error::Result};

type StoreResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug)]
pub struct JsonDayStore {
    path: PathBuf,
    days: BTreeMap<NaiveDate, DayTotals>,
}

impl JsonDayStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let days = if path.exists() {
            let rows: Vec<DayTotalsRow> = serde_json::from_str(&fs::read_to_string(&path)?)?;
            rows.iter()
                .map(|row| convert::day_totals(row).map(|t| (t.day_key, t)))
                .collect::<Result<_>>()?
        } else {
            tracing::debug!("no store at {}, starting empty", path.display());
            BTreeMap::new()
        };
        Ok(Self { path, days })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> std::result::Result<(), String> {
        let rows: Vec<DayTotalsRow> = self.days.values().map(convert::day_totals_row).collect();
        let json = serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| e.to_string())?;
        fs::rename(&tmp, &self.path).map_err(|e| e.to_string())
    }
}

impl DayTotalsStore for JsonDayStore {
    fn load(&self, day: NaiveDate) -> StoreResult<Option<DayTotals>> {
        Ok(self.days.get(&day).copied())
    }

    fn save(&mut self, totals: DayTotals) -> StoreResult<()> {
        let previous = self.days.insert(totals.day_key, totals);
        if let Err(err) = self.flush() {
            match previous {
                Some(previous) => self.days.insert(previous.day_key, previous),
                None => self.days.remove(&totals.day_key),
            };
            return Err(EngineError::Store(format!(
                "cannot write {}: {err}",
                self.path.display()
            )));
        }
        Ok(())
    }

    fn days_with_data(&self) -> StoreResult<Vec<NaiveDate>> {
        Ok(self
            .days
            .values()
            .filter(|t| t.has_data())
            .map(|t| t.day_key)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use engine::{MigrationStrategy, Money, store};

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn migration_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("totals.json");

        let mut db = JsonDayStore::open(&path).unwrap();
        db.save(DayTotals::new(day(1), Some(Money::new(10_000)), Some(Money::ZERO)))
            .unwrap();
        db.save(DayTotals::new(day(2), Some(Money::new(5_000)), Some(Money::new(1_000))))
            .unwrap();

        let report = store::migrate(&mut db, day(1), day(2), Some(MigrationStrategy::Merge)).unwrap();
        assert_eq!(report.days_with_data, vec![day(1), day(2)]);

        let reopened = JsonDayStore::open(&path).unwrap();
        assert_eq!(
            reopened.load(day(2)).unwrap(),
            Some(DayTotals::new(
                day(2),
                Some(Money::new(15_000)),
                Some(Money::new(1_000))
            ))
        );
    }

    #[test]
    fn unwritable_store_reports_and_keeps_memory_consistent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("totals.json");
        let mut db = JsonDayStore::open(&path).unwrap();
        let err = db
            .save(DayTotals::new(day(3), Some(Money::new(1)), None))
            .unwrap_err();
        assert!(matches!(err, EngineError::Store(_)));
        assert_eq!(db.load(day(3)).unwrap(), None);
    }
}
