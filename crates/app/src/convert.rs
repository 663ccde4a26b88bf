//! Conversions between the wire format (`api_types`) and engine values.
use api_types::{
    day_totals::DayTotalsRow,
    report::RowErrorView,
    worksheet::{EntryRow, TillRow, WorksheetFile},
};
use chrono::NaiveDate;
use engine::{
    Amount, Currency, DayTotals, DenominationCatalog, Money, RegisterStatus, TillCount, Worksheet,
    intake::{self, RawCashEntry, RawDenomination, RowError},
};

use crate::error::{AppError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| AppError::Date(raw.to_string()))
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

pub fn currency(wire: api_types::Currency) -> Currency {
    match wire {
        api_types::Currency::Eur => Currency::Eur,
        api_types::Currency::Chf => Currency::Chf,
        api_types::Currency::Usd => Currency::Usd,
    }
}

pub fn wire_currency(currency: Currency) -> api_types::Currency {
    match currency {
        Currency::Eur => api_types::Currency::Eur,
        Currency::Chf => api_types::Currency::Chf,
        Currency::Usd => api_types::Currency::Usd,
    }
}

fn raw_entry(row: &EntryRow) -> RawCashEntry {
    RawCashEntry {
        entity_id: row
            .entity_id
            .as_ref()
            .map(api_types::WireId::as_text)
            .unwrap_or_default(),
        display_name: row.display_name.clone(),
        cash: row.cash.as_ref().map(|a| a.as_text()),
        check: row.check.as_ref().map(|a| a.as_text()),
        locked: row.locked,
    }
}

fn raw_denomination(row: &TillRow) -> RawDenomination {
    RawDenomination {
        value: row.value.as_text(),
        count: row.count.as_ref().map(api_types::WireCell::as_text),
    }
}

fn row_error_view(section: &str, error: RowError) -> RowErrorView {
    RowErrorView {
        section: section.to_string(),
        row: error.row,
        key: error.key,
        message: error.error.to_string(),
    }
}

/// A worksheet file turned into engine values, with the rows that failed.
#[derive(Debug)]
pub struct LoadedWorksheet {
    pub worksheet: Worksheet,
    pub till: TillCount,
    pub rejected: Vec<RowErrorView>,
}

/// Validates a worksheet file. Bad rows are dropped and reported; only a bad
/// day or an unusable catalog aborts the load.
pub fn load_worksheet(
    file: &WorksheetFile,
    catalog_for: impl Fn(Currency) -> Result<DenominationCatalog>,
) -> Result<LoadedWorksheet> {
    let day = parse_day(&file.day)?;
    let currency = currency(file.currency);
    let catalog = catalog_for(currency)?;

    let entries = intake::entries(file.entries.iter().map(raw_entry), currency);
    let till = intake::till(file.till.iter().map(raw_denomination), &catalog);

    let rejected = entries
        .rejected
        .into_iter()
        .map(|e| row_error_view("entry", e))
        .chain(till.rejected.into_iter().map(|e| row_error_view("till", e)))
        .collect();

    let status = if file.register_closed {
        RegisterStatus::Closed
    } else {
        RegisterStatus::Open
    };
    let worksheet = Worksheet::restore(day, currency, status, entries.accepted)?;

    Ok(LoadedWorksheet {
        worksheet,
        till: till.accepted,
        rejected,
    })
}

fn wire_amount(amount: Amount) -> Option<api_types::WireCell> {
    amount
        .value()
        .map(|v| api_types::WireCell::Text(v.to_string()))
}

/// Serializes a worksheet back to its file form.
pub fn worksheet_file(worksheet: &Worksheet, till: &TillCount) -> WorksheetFile {
    WorksheetFile {
        day: format_day(worksheet.day_key()),
        currency: wire_currency(worksheet.currency()),
        register_closed: worksheet.is_closed(),
        entries: worksheet
            .snapshot()
            .iter()
            .map(|entry| EntryRow {
                entity_id: Some(api_types::WireId::Text(entry.entity_id.to_string())),
                display_name: entry.display_name.clone(),
                cash: wire_amount(entry.cash_amount()),
                check: wire_amount(entry.check_amount()),
                locked: entry.locked,
            })
            .collect(),
        till: till
            .counts()
            .iter()
            .filter(|c| c.count() > 0)
            .map(|c| TillRow {
                value: api_types::WireCell::Text(c.denomination_value().to_string()),
                count: Some(api_types::WireCell::Number(c.count().into())),
            })
            .collect(),
    }
}

fn parse_total(raw: Option<&str>, day: &str) -> Result<Option<Money>> {
    raw.map(|text| {
        Money::parse_major(text, Currency::default())
            .map_err(|err| AppError::Engine(engine::EngineError::Store(format!("{day}: {err}"))))
    })
    .transpose()
}

pub fn day_totals(row: &DayTotalsRow) -> Result<DayTotals> {
    Ok(DayTotals::new(
        parse_day(&row.day)?,
        parse_total(row.total_cash.as_deref(), &row.day)?,
        parse_total(row.total_check.as_deref(), &row.day)?,
    ))
}

pub fn day_totals_row(totals: &DayTotals) -> DayTotalsRow {
    DayTotalsRow {
        day: format_day(totals.day_key),
        total_cash: totals.total_cash.map(|v| v.to_string()),
        total_check: totals.total_check.map(|v| v.to_string()),
    }
}
