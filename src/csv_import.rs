//! CSV Import
//!
//! Parses a CSV document into ledger entries. Used by the bulk import
//! endpoint and by the CLI.
//!
//! The header row must name `source_category`; `date`, `activity`, `amount`,
//! `unit`, `emission_factor`, and `scope` are optional columns. Rows are
//! validated individually so one typo does not sink the batch: bad rows are
//! reported by row number and skipped.

use serde::Deserialize;

use crate::calc::Quantity;
use crate::factors::{Scope, SourceCategory};
use crate::ledger::NewEntry;

/// One CSV data row as read from the file
#[derive(Debug, Deserialize)]
struct CsvRow {
    source_category: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    activity: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    emission_factor: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Result of parsing a CSV document
#[derive(Debug, Default)]
pub struct CsvImportOutcome {
    /// Entries ready for the ledger
    pub entries: Vec<NewEntry>,
    /// `(row, message)` per rejected row, 1-indexed past the header
    pub errors: Vec<(usize, String)>,
}

impl CsvImportOutcome {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.errors.is_empty()
    }
}

/// Parse a CSV document into entries plus per-row errors
pub fn parse_csv(text: &str) -> CsvImportOutcome {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut outcome = CsvImportOutcome::default();

    for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        match record {
            Ok(csv_row) => match parse_row(csv_row) {
                Ok(entry) => outcome.entries.push(entry),
                Err(error) => outcome.errors.push((row, error)),
            },
            Err(err) => outcome.errors.push((row, err.to_string())),
        }
    }

    outcome
}

/// Turn a CSV row into a ledger entry, strictly validating the tagged fields
fn parse_row(row: CsvRow) -> Result<NewEntry, String> {
    let source_category = SourceCategory::parse(&row.source_category)
        .ok_or_else(|| format!("unknown source_category '{}'", row.source_category))?;

    let scope = match row.scope.as_deref().filter(|s| !s.is_empty()) {
        None => None,
        Some("Scope 1") => Some(Scope::Scope1),
        Some("Scope 2") => Some(Scope::Scope2),
        Some("Scope 3") => Some(Scope::Scope3),
        Some(other) => return Err(format!("unknown scope '{}'", other)),
    };

    let mut entry = NewEntry::new(source_category);
    entry.activity = row.activity.filter(|a| !a.is_empty());
    entry.unit = row.unit.filter(|u| !u.is_empty());
    entry.date = row.date.filter(|d| !d.is_empty());
    entry.scope = scope;
    entry.amount = quantity_from(row.amount);
    entry.emission_factor = quantity_from(row.emission_factor);

    if entry.amount.coerce() < 0.0 {
        return Err("amount must not be negative".to_string());
    }

    Ok(entry)
}

fn quantity_from(field: Option<String>) -> Quantity {
    match field.filter(|f| !f.is_empty()) {
        Some(text) => Quantity::Text(text),
        None => Quantity::Missing,
    }
}
