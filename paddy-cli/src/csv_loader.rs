//! CSV loader for bulk cost-row import.
//!
//! ## CSV Format
//!
//! Column order does not matter (headers are matched by name); header
//! names are case-sensitive. Only `category` is required; leave any
//! other cell empty for "no value".
//!
//! | Column        | Required | Type    | Notes                              |
//! |---------------|----------|---------|------------------------------------|
//! | `category`    | yes      | string  | Row label, blank allowed           |
//! | `cost_type`   | no       | string  | `variable` (default) or `fixed`    |
//! | `simple_cost` | no       | decimal | Used under the simple input method |
//! | `quantity`    | no       | decimal | Used under the detailed method     |
//! | `unit`        | no       | string  | Free text (kg, bags, hours)        |
//! | `unit_price`  | no       | decimal | Used under the detailed method     |
//!
//! ### Example
//!
//! ```csv
//! category,cost_type,simple_cost,quantity,unit,unit_price
//! Seed,variable,800.00,40,kg,20.00
//! Land rent,fixed,2000.00,,,
//! ```

use std::path::Path;

use anyhow::Context;
use paddy_core::models::{CostType, RowEntry};
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    category: String,
    cost_type: Option<String>,
    simple_cost: Option<Decimal>,
    quantity: Option<Decimal>,
    unit: Option<String>,
    unit_price: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// `category` column, malformed decimal, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `cost_type` cell contained something other than `variable` or
    /// `fixed`. `row` is the 1-based data row number.
    #[error("unrecognised cost type '{value}' on row {row}")]
    InvalidCostType { value: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into a RowEntry.
///
/// row_number is 1-based (for error messages). The derived total is left
/// at zero; the caller recomputes it when the rows join the table.
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<RowEntry, CsvLoadError> {
    let cost_type = match row.cost_type.as_deref() {
        None => CostType::default(),
        Some(value) => {
            CostType::parse(value).ok_or_else(|| CsvLoadError::InvalidCostType {
                value: value.to_string(),
                row: row_number,
            })?
        }
    };

    let mut entry = RowEntry::new(row.category);
    entry.cost_type = cost_type;
    entry.simple_cost = row.simple_cost;
    entry.quantity = row.quantity;
    entry.unit = row.unit;
    entry.unit_price = row.unit_price;
    Ok(entry)
}

/// Parse CSV text (the full file contents as a &str) and return the rows
/// in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   field cannot be deserialised.
/// * [CsvLoadError::InvalidCostType] – if any row contains an
///   unrecognised cost-type token.
pub fn load_from_str(input: &str) -> Result<Vec<RowEntry>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1; // 1-based for user-facing messages
            convert_row(row, row_number)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to
/// [load_from_str].
pub fn load_from_file(path: &Path) -> anyhow::Result<Vec<RowEntry>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading cost file '{}'", path.display()))?;
    let rows = load_from_str(&contents)
        .with_context(|| format!("loading cost rows from '{}'", path.display()))?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
