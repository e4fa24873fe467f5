//! Report file ingestion
//!
//! Dispatches on file extension: CSV and Excel files with recognizable
//! name/count header columns are read directly; anything else (and any
//! structured file whose headers are not recognized or that fails to read)
//! degrades to the heuristic text parser over best-effort decoded bytes.

use crate::decode::decode_bytes;
use crate::error::{Result, TabreconError};
use crate::inventory::Inventory;
use crate::parser::{self, parse_count_token};
use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, warn};
use std::path::Path;

/// Recognized header spellings for the table-name column.
const NAME_HEADERS: &[&str] = &["object", "tablename", "table", "table name", "table_name"];

/// Recognized header spellings for the record-count column.
const COUNT_HEADERS: &[&str] = &["number of records", "records", "count", "number_of_records"];

/// Load one report file into a normalized inventory.
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    if !path.exists() {
        return Err(TabreconError::input_not_found(path));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => load_csv(path),
        Some("xls") | Some("xlsx") => load_excel(path),
        _ => load_text(path),
    }
}

fn load_text(path: &Path) -> Result<Inventory> {
    let bytes = std::fs::read(path)?;
    Ok(parser::parse(&decode_bytes(bytes)))
}

fn load_csv(path: &Path) -> Result<Inventory> {
    let bytes = std::fs::read(path)?;
    let text = decode_bytes(bytes);
    match csv_inventory(&text) {
        Some(inventory) => {
            debug!("read {} entries from CSV columns", inventory.len());
            Ok(inventory)
        }
        None => {
            debug!("CSV headers not recognized, falling back to text parser");
            Ok(parser::parse(&text))
        }
    }
}

/// Read an inventory from CSV name/count columns. Returns `None` when the
/// header row lacks a recognized name or count column.
fn csv_inventory(text: &str) -> Option<Inventory> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .ok()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let name_idx = find_column(&headers, NAME_HEADERS)?;
    let count_idx = find_column(&headers, COUNT_HEADERS)?;

    let mut inventory = Inventory::new();
    for record in reader.records().flatten() {
        let Some(name) = record.get(name_idx) else {
            continue;
        };
        if name.trim().is_empty() {
            continue;
        }
        let count = record.get(count_idx).and_then(parse_count_token);
        inventory.insert(name, count);
    }
    Some(inventory)
}

/// Find a column index by preference order over the wanted spellings.
fn find_column(headers: &[String], wanted: &[&str]) -> Option<usize> {
    wanted
        .iter()
        .find_map(|w| headers.iter().position(|h| h == w))
}

fn load_excel(path: &Path) -> Result<Inventory> {
    match excel_inventory(path) {
        Ok(Some(inventory)) => {
            debug!("read {} entries from spreadsheet columns", inventory.len());
            Ok(inventory)
        }
        Ok(None) => {
            debug!("spreadsheet headers not recognized, falling back to text parser");
            load_text(path)
        }
        Err(e) => {
            warn!("failed to read '{}' as a spreadsheet: {}", path.display(), e);
            load_text(path)
        }
    }
}

/// Read an inventory from the first worksheet's name/count columns.
fn excel_inventory(path: &Path) -> Result<Option<Inventory>> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();
    let Some(sheet_name) = sheet_names.first() else {
        return Ok(None);
    };
    let range = workbook.worksheet_range(sheet_name)?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(None);
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_lowercase())
        .collect();
    let Some(name_idx) = find_column(&headers, NAME_HEADERS) else {
        return Ok(None);
    };
    let Some(count_idx) = find_column(&headers, COUNT_HEADERS) else {
        return Ok(None);
    };

    let mut inventory = Inventory::new();
    for row in rows {
        let Some(name) = row.get(name_idx).map(|c| c.to_string()) else {
            continue;
        };
        if name.trim().is_empty() {
            continue;
        }
        let count = row.get(count_idx).and_then(cell_count);
        inventory.insert(name, count);
    }
    Ok(Some(inventory))
}

/// Extract a record count from a spreadsheet cell. Non-numeric cells and
/// negative or fractional values yield "count unknown".
fn cell_count(cell: &Data) -> Option<u64> {
    match cell {
        Data::Int(n) if *n >= 0 => Some(*n as u64),
        Data::Float(f) if *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64 => {
            Some(*f as u64)
        }
        Data::String(s) => parse_count_token(s),
        _ => None,
    }
}
