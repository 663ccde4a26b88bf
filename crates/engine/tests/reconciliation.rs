use chrono::NaiveDate;
use proptest::prelude::*;

use engine::{
    Amount, CashEntry, Currency, DailyReconciliation, DayTotals, DayTotalsStore,
    DenominationCount, EngineError, MemoryStore, MigrationDecision, MigrationStrategy, Money,
    Standing, TillCount, Worksheet, intake, ledger, migration, store, till,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn totals(d: u32, cash: Option<&str>, check: Option<&str>) -> DayTotals {
    DayTotals::new(
        day(d),
        cash.map(|c| c.parse::<Money>().unwrap()),
        check.map(|c| c.parse::<Money>().unwrap()),
    )
}

fn entry(id: usize, cash: Option<i64>, check: Option<i64>) -> CashEntry {
    CashEntry::new(
        id.to_string(),
        format!("child {id}"),
        cash.map(Money::new).into(),
        check.map(Money::new).into(),
        false,
    )
    .unwrap()
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn amounts() -> impl Strategy<Value = Vec<(Option<i64>, Option<i64>)>> {
    prop::collection::vec(
        (
            prop::option::of(0i64..10_000_000),
            prop::option::of(0i64..10_000_000),
        ),
        0..40,
    )
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn ledger_sums_are_exact_and_order_free(rows in amounts(), seed in any::<u64>()) {
        let entries: Vec<CashEntry> = rows
            .iter()
            .enumerate()
            .map(|(i, (cash, check))| entry(i, *cash, *check))
            .collect();
        let summary = ledger::aggregate(&entries).unwrap();
        prop_assert_eq!(summary.sum_total, summary.sum_cash + summary.sum_check);
        prop_assert!(summary.exportable_count <= entries.len());

        let mut shuffled = entries.clone();
        let len = shuffled.len();
        if len > 1 {
            shuffled.rotate_left((seed as usize) % len);
            shuffled.reverse();
        }
        let other = ledger::aggregate(&shuffled).unwrap();
        prop_assert_eq!(other.sum_cash, summary.sum_cash);
        prop_assert_eq!(other.sum_check, summary.sum_check);
        prop_assert_eq!(other.sum_total, summary.sum_total);
        prop_assert_eq!(other.exportable_count, summary.exportable_count);
    }

    #[test]
    fn till_total_is_order_free(
        counts in prop::collection::vec((1i64..100_000, 0i64..500), 0..20),
        ledger_total in 0i64..50_000_000,
    ) {
        let counts: Vec<DenominationCount> = counts
            .into_iter()
            .map(|(value, n)| DenominationCount::new(Money::new(value), n).unwrap())
            .collect();
        let forward = till::reconcile(&counts, Money::new(ledger_total)).unwrap();
        let mut reversed = counts.clone();
        reversed.reverse();
        let backward = till::reconcile(&reversed, Money::new(ledger_total)).unwrap();
        prop_assert_eq!(forward.till_total, backward.till_total);
        prop_assert_eq!(forward.difference, forward.till_total - Money::new(ledger_total));
        prop_assert_eq!(forward.has_discrepancy, !forward.difference.is_zero());
    }
}

#[test]
fn unset_or_zero_entries_export_nothing() {
    let entries = vec![entry(1, None, None), entry(2, Some(0), Some(0)), entry(3, None, Some(0))];
    let summary = ledger::aggregate(&entries).unwrap();
    assert_eq!(summary.exportable_count, 0);
    assert_eq!(summary.sum_total, Money::ZERO);
}

#[test]
fn thirty_seven_cents_are_exactly_thirty_seven_cents() {
    let rows: Vec<intake::RawCashEntry> = (0..37)
        .map(|i| intake::RawCashEntry {
            entity_id: i.to_string(),
            display_name: String::new(),
            cash: Some("0.01".to_string()),
            check: None,
            locked: false,
        })
        .collect();
    let intake = intake::entries(rows, Currency::Eur);
    assert!(intake.is_clean());
    let summary = ledger::aggregate(&intake.accepted).unwrap();
    assert_eq!(summary.sum_total, "0.37".parse::<Money>().unwrap());
    assert_eq!(summary.sum_total.to_string(), "0.37");
}

#[test]
fn balanced_till_reports_no_discrepancy() {
    let entries = vec![entry(1, Some(1_010), None), entry(2, None, Some(2_020))];
    let mut till = TillCount::new(&Currency::Eur.default_catalog());
    till.set(Money::new(1_000), 1).unwrap();
    till.set(Money::new(10), 1).unwrap();
    till.set(Money::new(2_000), 1).unwrap();
    till.set(Money::new(20), 1).unwrap();
    let day = DailyReconciliation::compute(&entries, till.counts()).unwrap();
    assert_eq!(day.till.difference, Money::ZERO);
    assert!(!day.till.has_discrepancy);
    assert_eq!(day.till.standing(), Standing::Balanced);
}

#[test]
fn normal_migration_copies_source() {
    let decision = migration::decide(
        &totals(1, Some("100.00"), Some("20.00")),
        &totals(2, None, None),
        None,
    )
    .unwrap();
    assert_eq!(
        decision,
        MigrationDecision::Normal {
            target_totals: totals(2, Some("100.00"), Some("20.00"))
        }
    );
}

#[test]
fn merge_sums_and_overwrite_replaces() {
    let source = totals(1, Some("100.00"), Some("0.00"));
    let target = totals(2, Some("50.00"), Some("10.00"));

    let merged = migration::decide(&source, &target, Some(MigrationStrategy::Merge)).unwrap();
    assert_eq!(
        merged,
        MigrationDecision::Merge {
            target_totals: totals(2, Some("150.00"), Some("10.00"))
        }
    );

    let overwritten =
        migration::decide(&source, &target, Some(MigrationStrategy::Overwrite)).unwrap();
    assert_eq!(
        overwritten,
        MigrationDecision::Overwrite {
            target_totals: totals(2, Some("100.00"), Some("0.00"))
        }
    );
}

#[test]
fn null_source_is_a_noop() {
    let source = totals(1, None, None);
    for target in [totals(2, None, None), totals(2, Some("5.00"), None)] {
        assert_eq!(
            migration::decide(&source, &target, None).unwrap(),
            MigrationDecision::NoOp
        );
    }
}

#[test]
fn overwrite_is_idempotent_merge_is_not() {
    let source = totals(1, Some("100.00"), Some("0.00"));
    let mut db: MemoryStore = vec![source, totals(2, Some("50.00"), Some("10.00"))]
        .into_iter()
        .collect();

    let first = store::migrate(&mut db, day(1), day(2), Some(MigrationStrategy::Overwrite)).unwrap();
    let second =
        store::migrate(&mut db, day(1), day(2), Some(MigrationStrategy::Overwrite)).unwrap();
    assert_eq!(first.decision.target_totals(), second.decision.target_totals());
    assert_eq!(
        db.load(day(2)).unwrap(),
        Some(totals(2, Some("100.00"), Some("0.00")))
    );

    let first = store::migrate(&mut db, day(1), day(2), Some(MigrationStrategy::Merge)).unwrap();
    let second = store::migrate(&mut db, day(1), day(2), Some(MigrationStrategy::Merge)).unwrap();
    assert_eq!(
        first.decision.target_totals(),
        Some(&totals(2, Some("200.00"), Some("0.00")))
    );
    assert_eq!(
        second.decision.target_totals(),
        Some(&totals(2, Some("300.00"), Some("0.00")))
    );
    assert_ne!(first.decision.target_totals(), second.decision.target_totals());
}

#[test]
fn migration_refreshes_days_with_data() {
    let mut db: MemoryStore = std::iter::once(totals(3, Some("12.00"), None)).collect();
    let report = store::migrate(&mut db, day(3), day(7), None).unwrap();
    assert_eq!(report.days_with_data, vec![day(3), day(7)]);

    let err = store::migrate(&mut db, day(3), day(7), None).unwrap_err();
    assert_eq!(
        err,
        EngineError::AmbiguousMigration {
            source_day: day(3),
            target_day: day(7),
        }
    );
}

#[test]
fn worksheet_day_flows_into_the_store() {
    let mut ws = Worksheet::new(day(9), Currency::Eur);
    ws.import(vec![entry(1, Some(4_000), None), entry(2, None, Some(1_500))])
        .unwrap();
    ws.set_cash(&"2".into(), Amount::Set(Money::new(500))).unwrap();

    let mut till = TillCount::new(&Currency::Eur.default_catalog());
    till.set(Money::new(2_000), 2).unwrap();
    till.set(Money::new(500), 1).unwrap();

    let close = ws.close(&till).unwrap();
    assert_eq!(close.reconciliation.summary.sum_total, Money::new(6_000));
    assert_eq!(close.reconciliation.till.standing(), Standing::Short(Money::new(1_500)));

    let mut db = MemoryStore::new();
    db.save(close.totals).unwrap();
    assert_eq!(db.days_with_data().unwrap(), vec![day(9)]);
    assert_eq!(
        ws.set_cash(&"1".into(), Amount::Unset).unwrap_err(),
        EngineError::RegisterClosed(day(9))
    );
}
