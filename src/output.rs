//! Output formatting utilities

use crate::compare::{ComparisonRow, ComparisonSummary};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::report;

/// Pretty printer for tabrecon output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the reconciliation summary
    pub fn print_summary(summary: &ComparisonSummary) {
        println!("📊 Reconciliation Summary");
        println!("├─ Total tables compared: {}", summary.total);
        println!("├─ ✅ Match: {}", summary.matches);
        println!("├─ ❌ Count changed: {}", summary.changed);
        println!("├─ ➕ New: {}", summary.new);
        println!("├─ ➖ Deleted: {}", summary.deleted);
        println!("└─ ❓ Count unknown: {}", summary.no_count);
    }

    /// Print comparison rows as an aligned text table
    pub fn print_rows(rows: &[ComparisonRow]) {
        if rows.is_empty() {
            println!("No tables found in either report.");
            return;
        }

        let name_width = rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Table".len());

        println!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}  {}",
            "Table", "Before", "After", "Difference", "Status"
        );
        for row in rows {
            println!(
                "{:<name_width$}  {:>12}  {:>12}  {:>12}  {}",
                row.name,
                format_count(row.count_before),
                format_count(row.count_after),
                format_difference(row.difference),
                row.status.label()
            );
        }
    }

    /// Print a parsed inventory preview
    pub fn print_inventory(inventory: &Inventory, limit: usize) {
        if inventory.is_empty() {
            println!("No tables parsed.");
            return;
        }

        let shown = if limit == 0 {
            inventory.len()
        } else {
            limit.min(inventory.len())
        };
        println!("📋 Parsed {} table(s):", inventory.len());
        for (i, (_, entry)) in inventory.iter().take(shown).enumerate() {
            let prefix = if i == shown - 1 && shown == inventory.len() {
                "└─"
            } else {
                "├─"
            };
            println!("{} {}: {}", prefix, entry.name, format_count(entry.count));
        }
        if shown < inventory.len() {
            println!("└─ ... and {} more", inventory.len() - shown);
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format the full comparison (summary + rows) as JSON
    pub fn format_comparison(rows: &[ComparisonRow]) -> Result<String> {
        Ok(serde_json::to_string_pretty(&report::json_document(rows))?)
    }

    /// Format a parsed inventory as JSON
    pub fn format_inventory(inventory: &Inventory) -> Result<String> {
        let entries: Vec<_> = inventory.iter().map(|(_, entry)| entry).collect();
        let json = serde_json::json!({
            "tables_parsed": inventory.len(),
            "entries": entries,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }
}

/// An absent count renders as "-", keeping it visually distinct from zero
fn format_count(count: Option<u64>) -> String {
    match count {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    }
}

fn format_difference(difference: Option<i64>) -> String {
    match difference {
        Some(d) => format!("{:+}", d),
        None => "-".to_string(),
    }
}
