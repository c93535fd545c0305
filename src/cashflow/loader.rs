//! Load ledger cash flows from CSV or JSON exports
//!
//! CSV columns: `date,amount[,investment]` with dates as `YYYY-MM-DD`.
//! JSON: an array of objects with the same fields.
//! Rows are kept in file order; nothing here sorts.

use super::CashFlow;
use chrono::NaiveDate;
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("failed to read ledger: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV ledger: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON ledger: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: cannot parse date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: amount must be a finite number")]
    NonFiniteAmount { row: usize },
}

/// One ledger row: a cash flow plus the investment it belongs to, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub investment: Option<String>,
    #[serde(flatten)]
    pub flow: CashFlow,
}

/// Raw row shared by the CSV and JSON formats
#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    amount: f64,
    #[serde(default)]
    investment: Option<String>,
}

impl RawRow {
    /// `row` is 1-based, counting data rows only
    fn to_entry(self, row: usize) -> Result<LedgerEntry, LedgerError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            LedgerError::InvalidDate {
                row,
                value: self.date.clone(),
            }
        })?;

        if !self.amount.is_finite() {
            return Err(LedgerError::NonFiniteAmount { row });
        }

        let investment = self
            .investment
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(LedgerEntry {
            investment,
            flow: CashFlow::new(date, self.amount),
        })
    }
}

/// Load a ledger file, choosing JSON for `.json` and CSV otherwise
pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<Vec<LedgerEntry>, LedgerError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut file = File::open(path)?;
    let entries = if is_json {
        let mut text = String::new();
        file.read_to_string(&mut text)?;
        load_ledger_from_json_str(&text)?
    } else {
        load_ledger_from_reader(file)?
    };

    log::debug!("Loaded {} ledger rows from {}", entries.len(), path.display());
    Ok(entries)
}

/// Load CSV ledger rows from any reader (file, string buffer, stdin)
pub fn load_ledger_from_reader<R: Read>(reader: R) -> Result<Vec<LedgerEntry>, LedgerError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut entries = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: RawRow = result?;
        entries.push(row.to_entry(i + 1)?);
    }

    Ok(entries)
}

/// Load ledger rows from a JSON array
pub fn load_ledger_from_json_str(text: &str) -> Result<Vec<LedgerEntry>, LedgerError> {
    let rows: Vec<RawRow> = serde_json::from_str(text)?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| row.to_entry(i + 1))
        .collect()
}
