//! Day migration: moving a day's recorded totals onto another calendar day.
//!
//! | source has data | target has data | outcome |
//! |---|---|---|
//! | no  | any | [`MigrationPlan::NoOp`] |
//! | yes | no  | [`MigrationPlan::Normal`], source copied |
//! | yes | yes | [`MigrationPlan::NeedsChoice`], caller picks merge or overwrite |
//!
//! The planner is a pure function of its two snapshots. `Overwrite` is
//! idempotent; `Merge` is not: merging the same source twice adds it twice.
use serde::{Deserialize, Serialize};

use crate::{DayTotals, EngineError, Money, ResultEngine};

/// How to combine two days that both hold data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStrategy {
    /// Sum both days, field by field.
    Merge,
    /// Replace the target's totals with the source's.
    Overwrite,
}

/// Final outcome of a migration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum MigrationDecision {
    /// The source day had nothing to migrate.
    NoOp,
    Normal { target_totals: DayTotals },
    Merge { target_totals: DayTotals },
    Overwrite { target_totals: DayTotals },
}

impl MigrationDecision {
    /// The totals to persist for the target day, if any.
    #[must_use]
    pub fn target_totals(&self) -> Option<&DayTotals> {
        match self {
            Self::NoOp => None,
            Self::Normal { target_totals }
            | Self::Merge { target_totals }
            | Self::Overwrite { target_totals } => Some(target_totals),
        }
    }
}

/// Both days hold data; resolved by the caller's choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingMigration {
    source: DayTotals,
    target: DayTotals,
}

impl PendingMigration {
    #[must_use]
    pub fn source(&self) -> &DayTotals {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &DayTotals {
        &self.target
    }

    pub fn resolve(self, strategy: MigrationStrategy) -> ResultEngine<MigrationDecision> {
        match strategy {
            MigrationStrategy::Merge => Ok(MigrationDecision::Merge {
                target_totals: merge(&self.source, &self.target)?,
            }),
            MigrationStrategy::Overwrite => Ok(MigrationDecision::Overwrite {
                target_totals: self.source.rekeyed(self.target.day_key),
            }),
        }
    }
}

/// Result of [`plan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrationPlan {
    NoOp,
    Normal { target_totals: DayTotals },
    NeedsChoice(PendingMigration),
}

/// Decides how `source` migrates onto `target`.
pub fn plan(source: &DayTotals, target: &DayTotals) -> ResultEngine<MigrationPlan> {
    if source.day_key == target.day_key {
        return Err(EngineError::InvalidMigration(format!(
            "cannot migrate {} onto itself",
            source.day_key
        )));
    }
    if !source.has_data() {
        return Ok(MigrationPlan::NoOp);
    }
    if !target.has_data() {
        return Ok(MigrationPlan::Normal {
            target_totals: source.rekeyed(target.day_key),
        });
    }
    Ok(MigrationPlan::NeedsChoice(PendingMigration {
        source: *source,
        target: *target,
    }))
}

/// One-shot form of [`plan`].
///
/// `strategy` is only consulted when both days hold data; without it that
/// case is reported as [`EngineError::AmbiguousMigration`].
pub fn decide(
    source: &DayTotals,
    target: &DayTotals,
    strategy: Option<MigrationStrategy>,
) -> ResultEngine<MigrationDecision> {
    match plan(source, target)? {
        MigrationPlan::NoOp => Ok(MigrationDecision::NoOp),
        MigrationPlan::Normal { target_totals } => Ok(MigrationDecision::Normal { target_totals }),
        MigrationPlan::NeedsChoice(pending) => match strategy {
            Some(strategy) => pending.resolve(strategy),
            None => Err(EngineError::AmbiguousMigration {
                source_day: source.day_key,
                target_day: target.day_key,
            }),
        },
    }
}

fn merge(source: &DayTotals, target: &DayTotals) -> ResultEngine<DayTotals> {
    Ok(DayTotals::new(
        target.day_key,
        merge_field(target.total_cash, source.total_cash, "cash")?,
        merge_field(target.total_check, source.total_check, "check")?,
    ))
}

fn merge_field(target: Option<Money>, source: Option<Money>, label: &str) -> ResultEngine<Option<Money>> {
    match (target, source) {
        (None, None) => Ok(None),
        (Some(value), None) | (None, Some(value)) => Ok(Some(value)),
        (Some(a), Some(b)) => a.try_add(b, &format!("merged {label} total")).map(Some),
    }
}
