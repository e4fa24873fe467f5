//! Comparison report export: XLSX, CSV, and JSON
//!
//! The exporter consumes only the comparison-row shape; the reconciliation
//! core knows nothing about these formats.

use crate::compare::{ComparisonRow, ComparisonSummary, ReconcileStatus};
use crate::error::{Result, TabreconError};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

const COLUMNS: &[&str] = &["Table", "Before", "After", "Difference", "Status"];

/// Write the comparison to a file, choosing the format by extension.
pub fn export(rows: &[ComparisonRow], path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" => write_xlsx(rows, path),
        "csv" => write_csv(rows, path),
        "json" => write_json(rows, path),
        other => Err(TabreconError::export(format!(
            "Unsupported export format: '.{}' (use .xlsx, .csv, or .json)",
            other
        ))),
    }
}

/// Multi-sheet spreadsheet: Summary, All rows, and non-MATCH Differences.
pub fn write_xlsx(rows: &[ComparisonRow], path: &Path) -> Result<()> {
    let summary = ComparisonSummary::from_rows(rows);
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet().set_name("Summary")?;
    sheet.write_with_format(0, 0, "Metric", &bold)?;
    sheet.write_with_format(0, 1, "Value", &bold)?;
    sheet.write(1, 0, "Generated")?;
    sheet.write(1, 1, Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string())?;
    let metrics: [(&str, usize); 6] = [
        ("Total Tables Compared", summary.total),
        ("Matches", summary.matches),
        ("Count Changed", summary.changed),
        ("New Tables", summary.new),
        ("Deleted Tables", summary.deleted),
        ("Count Unknown", summary.no_count),
    ];
    for (i, (metric, value)) in metrics.iter().enumerate() {
        let row = (i + 2) as u32;
        sheet.write(row, 0, *metric)?;
        sheet.write(row, 1, *value as u64)?;
    }

    let all_sheet = workbook.add_worksheet().set_name("All")?;
    write_rows_sheet(all_sheet, rows.iter(), &bold)?;

    let diff_sheet = workbook.add_worksheet().set_name("Differences")?;
    let differences = rows.iter().filter(|r| r.status != ReconcileStatus::Match);
    write_rows_sheet(diff_sheet, differences, &bold)?;

    workbook.save(path)?;
    Ok(())
}

fn write_rows_sheet<'a>(
    sheet: &mut Worksheet,
    rows: impl Iterator<Item = &'a ComparisonRow>,
    bold: &Format,
) -> Result<()> {
    for (col, header) in COLUMNS.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *header, bold)?;
    }
    for (i, row) in rows.enumerate() {
        let r = (i + 1) as u32;
        sheet.write(r, 0, row.name.as_str())?;
        write_optional_count(sheet, r, 1, row.count_before)?;
        write_optional_count(sheet, r, 2, row.count_after)?;
        match row.difference {
            Some(diff) => sheet.write(r, 3, diff)?,
            None => sheet.write(r, 3, "")?,
        };
        sheet.write(r, 4, row.status.label())?;
    }
    Ok(())
}

fn write_optional_count(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    count: Option<u64>,
) -> Result<()> {
    match count {
        Some(n) => sheet.write(row, col, n)?,
        None => sheet.write(row, col, "")?,
    };
    Ok(())
}

/// Flat CSV of every comparison row, same columns as the All sheet.
pub fn write_csv(rows: &[ComparisonRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(&[
            row.name.clone(),
            optional_to_string(row.count_before),
            optional_to_string(row.count_after),
            row.difference.map(|d| d.to_string()).unwrap_or_default(),
            row.status.label().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn optional_to_string(count: Option<u64>) -> String {
    count.map(|n| n.to_string()).unwrap_or_default()
}

/// JSON document with generation timestamp, per-status summary, and rows.
pub fn json_document(rows: &[ComparisonRow]) -> serde_json::Value {
    serde_json::json!({
        "generated": Utc::now().to_rfc3339(),
        "summary": ComparisonSummary::from_rows(rows),
        "rows": rows,
    })
}

pub fn write_json(rows: &[ComparisonRow], path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(&json_document(rows))?;
    std::fs::write(path, content)?;
    Ok(())
}
