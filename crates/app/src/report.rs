//! Report views and their plain-text rendering.
use std::fmt::Write as _;

use api_types::{
    day_totals::{MigrationOutcome, MigrationView},
    report::{EntryLine, ReconciliationView, RowErrorView, TillView},
};
use chrono::NaiveDate;
use engine::{DailyReconciliation, MigrationDecision, MigrationReport, Standing, Worksheet};

use crate::convert;

pub fn reconciliation_view(
    worksheet: &Worksheet,
    day: &DailyReconciliation,
    rejected: Vec<RowErrorView>,
) -> ReconciliationView {
    let summary = &day.summary;
    let standing = match day.till.standing() {
        Standing::Balanced => "balanced",
        Standing::Over(_) => "over",
        Standing::Short(_) => "short",
    };
    ReconciliationView {
        day: convert::format_day(worksheet.day_key()),
        currency: convert::wire_currency(worksheet.currency()),
        register_closed: worksheet.is_closed(),
        sum_cash: summary.sum_cash.to_string(),
        sum_check: summary.sum_check.to_string(),
        sum_total: summary.sum_total.to_string(),
        exportable_count: summary.exportable_count,
        entries: summary
            .rows
            .iter()
            .map(|row| EntryLine {
                entity_id: row.entity_id.to_string(),
                display_name: row.display_name.clone(),
                cash: row.cash.to_string(),
                check: row.check.to_string(),
                total: row.total.to_string(),
                exportable: row.exportable,
            })
            .collect(),
        till: TillView {
            till_total: day.till.till_total.to_string(),
            difference: day.till.difference.to_string(),
            has_discrepancy: day.till.has_discrepancy,
            standing: standing.to_string(),
        },
        rejected,
    }
}

pub fn migration_view(
    source: NaiveDate,
    target: NaiveDate,
    report: &MigrationReport,
) -> MigrationView {
    let outcome = match report.decision {
        MigrationDecision::NoOp => MigrationOutcome::NoOp,
        MigrationDecision::Normal { .. } => MigrationOutcome::Normal,
        MigrationDecision::Merge { .. } => MigrationOutcome::Merge,
        MigrationDecision::Overwrite { .. } => MigrationOutcome::Overwrite,
    };
    MigrationView {
        source_day: convert::format_day(source),
        target_day: convert::format_day(target),
        outcome,
        target_totals: report.decision.target_totals().map(convert::day_totals_row),
        days_with_data: report
            .days_with_data
            .iter()
            .copied()
            .map(convert::format_day)
            .collect(),
    }
}

pub fn render_reconciliation(view: &ReconciliationView) -> String {
    let mut out = String::new();
    let status = if view.register_closed { "closed" } else { "open" };
    let _ = writeln!(out, "{} ({}), register {status}", view.day, view.currency.code());
    let _ = writeln!(
        out,
        "{:<12} {:<24} {:>10} {:>10} {:>10}",
        "id", "name", "cash", "check", "total"
    );
    for line in &view.entries {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {:>10} {:>10} {:>10}{}",
            line.entity_id,
            line.display_name,
            line.cash,
            line.check,
            line.total,
            if line.exportable { "" } else { "  -" }
        );
    }
    let _ = writeln!(
        out,
        "{:<37} {:>10} {:>10} {:>10}",
        "totals", view.sum_cash, view.sum_check, view.sum_total
    );
    let _ = writeln!(out, "receipts: {}", view.exportable_count);
    let _ = writeln!(out, "till: {}", view.till.till_total);
    let _ = writeln!(
        out,
        "difference: {} ({})",
        view.till.difference, view.till.standing
    );
    if !view.rejected.is_empty() {
        let _ = writeln!(out, "rejected rows:");
        for row in &view.rejected {
            let _ = writeln!(
                out,
                "  {} #{} [{}]: {}",
                row.section,
                row.row + 1,
                row.key,
                row.message
            );
        }
    }
    out
}

pub fn render_migration(view: &MigrationView) -> String {
    let mut out = String::new();
    match (&view.outcome, &view.target_totals) {
        (MigrationOutcome::NoOp, _) | (_, None) => {
            let _ = writeln!(out, "{}: nothing recorded, nothing migrated", view.source_day);
        }
        (outcome, Some(totals)) => {
            let _ = writeln!(
                out,
                "{} -> {} ({outcome:?}): cash {} check {}",
                view.source_day,
                view.target_day,
                totals.total_cash.as_deref().unwrap_or("-"),
                totals.total_check.as_deref().unwrap_or("-"),
            );
        }
    }
    let _ = writeln!(out, "days with data: {}", view.days_with_data.join(", "));
    out
}
