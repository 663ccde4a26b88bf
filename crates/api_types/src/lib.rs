//! Wire types exchanged with the front desk's remote service and files.
//!
//! Amounts arrive loosely typed (JSON numbers, strings, empty strings or
//! `null`); they are kept that way here and parsed once by the caller.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Chf,
    Usd,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Chf => "CHF",
            Self::Usd => "USD",
        }
    }
}

/// A loosely typed cell (amount or count) as sent by the front end: `12.5`,
/// `"12,50"`, `""`, or anything else a client happened to put there.
///
/// Decoding never fails on a cell; judging its content is left to the caller
/// so a bad cell only costs its own row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireCell {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl WireCell {
    /// Textual form of the cell, as typed.
    ///
    /// Numbers use their JSON spelling, so `0.1` stays `"0.1"`; other values
    /// use their JSON text (`true`, `[1]`) and fail to parse downstream.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Other(v) => v.to_string(),
        }
    }
}

/// Identifiers are strings or integers depending on the endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Text(String),
    Other(serde_json::Value),
}

impl WireId {
    /// The id as text; anything but a string or an integer reads as blank.
    pub fn as_text(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Other(_) => String::new(),
        }
    }
}

pub mod worksheet {
    use super::*;

    /// One child's row in a day's bills worksheet.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct EntryRow {
        #[serde(default)]
        pub entity_id: Option<WireId>,
        #[serde(default)]
        pub display_name: String,
        #[serde(default)]
        pub cash: Option<WireCell>,
        #[serde(default)]
        pub check: Option<WireCell>,
        #[serde(default)]
        pub locked: bool,
    }

    /// One denomination's tally.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TillRow {
        pub value: WireCell,
        #[serde(default)]
        pub count: Option<WireCell>,
    }

    /// A day's worksheet as stored on disk.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct WorksheetFile {
        /// `YYYY-MM-DD`.
        pub day: String,
        #[serde(default)]
        pub currency: Currency,
        #[serde(default)]
        pub register_closed: bool,
        #[serde(default)]
        pub entries: Vec<EntryRow>,
        #[serde(default)]
        pub till: Vec<TillRow>,
    }
}

pub mod day_totals {
    use super::*;

    /// Recorded totals of one day. `null` means nothing was recorded.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DayTotalsRow {
        /// `YYYY-MM-DD`.
        pub day: String,
        pub total_cash: Option<String>,
        pub total_check: Option<String>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum MigrationOutcome {
        NoOp,
        Normal,
        Merge,
        Overwrite,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MigrationView {
        pub source_day: String,
        pub target_day: String,
        pub outcome: MigrationOutcome,
        pub target_totals: Option<DayTotalsRow>,
        /// Days holding data after the migration.
        pub days_with_data: Vec<String>,
    }
}

pub mod report {
    use super::*;

    /// A receipt/report line. Amounts are formatted major units, empty when
    /// nothing was entered.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EntryLine {
        pub entity_id: String,
        pub display_name: String,
        pub cash: String,
        pub check: String,
        pub total: String,
        pub exportable: bool,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TillView {
        pub till_total: String,
        pub difference: String,
        pub has_discrepancy: bool,
        /// `balanced`, `over` or `short`.
        pub standing: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RowErrorView {
        /// `entry` or `till`.
        pub section: String,
        pub row: usize,
        pub key: String,
        pub message: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ReconciliationView {
        pub day: String,
        pub currency: Currency,
        pub register_closed: bool,
        pub sum_cash: String,
        pub sum_check: String,
        pub sum_total: String,
        pub exportable_count: usize,
        pub entries: Vec<EntryLine>,
        pub till: TillView,
        pub rejected: Vec<RowErrorView>,
    }
}
