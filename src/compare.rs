//! Presence/count reconciliation engine
//!
//! A full outer join of two inventories on the normalized key, classifying
//! every table into one of five states. A missing count is its own terminal
//! state: it is never defaulted to zero, because that would silently turn
//! "count unknown" into a false NEW or DELETED classification.

use crate::inventory::Inventory;
use serde::{Deserialize, Serialize};

/// Classification of one table across the two inventories.
///
/// Variants are declared in alphabetical order of their labels; comparison
/// rows sort by status label then name, so the derived `Ord` gives the
/// documented output order directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconcileStatus {
    /// Present in both inventories with differing counts.
    Changed,
    /// Present only in the before inventory.
    Deleted,
    /// Present in both inventories with equal counts.
    Match,
    /// Present only in the after inventory.
    New,
    /// Present in both inventories, but at least one count is unknown.
    PresentNoCount,
}

impl ReconcileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Changed => "CHANGED",
            Self::Deleted => "DELETED",
            Self::Match => "MATCH",
            Self::New => "NEW",
            Self::PresentNoCount => "PRESENT_NO_COUNT",
        }
    }
}

impl std::fmt::Display for ReconcileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reconciliation result for one table key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Display name, preferring the after entry's spelling.
    pub name: String,
    pub count_before: Option<u64>,
    pub count_after: Option<u64>,
    /// `count_after - count_before`; set only when both counts are known.
    /// Clamped to the `i64` range for count pairs whose gap exceeds it.
    pub difference: Option<i64>,
    pub present_before: bool,
    pub present_after: bool,
    pub status: ReconcileStatus,
}

/// Per-status totals over a comparison result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total: usize,
    pub matches: usize,
    pub changed: usize,
    pub new: usize,
    pub deleted: usize,
    pub no_count: usize,
}

impl ComparisonSummary {
    pub fn from_rows(rows: &[ComparisonRow]) -> Self {
        let mut summary = Self {
            total: rows.len(),
            matches: 0,
            changed: 0,
            new: 0,
            deleted: 0,
            no_count: 0,
        };
        for row in rows {
            match row.status {
                ReconcileStatus::Match => summary.matches += 1,
                ReconcileStatus::Changed => summary.changed += 1,
                ReconcileStatus::New => summary.new += 1,
                ReconcileStatus::Deleted => summary.deleted += 1,
                ReconcileStatus::PresentNoCount => summary.no_count += 1,
            }
        }
        summary
    }

    pub fn has_differences(&self) -> bool {
        self.changed + self.new + self.deleted + self.no_count > 0
    }
}

/// Reconcile two inventories into one row per distinct key.
///
/// Total function: valid inventories always produce a valid result. Rows
/// are ordered by status label, then name, for deterministic output.
pub fn compare(before: &Inventory, after: &Inventory) -> Vec<ComparisonRow> {
    let mut keys: Vec<&String> = before.keys().collect();
    keys.extend(after.keys().filter(|k| !before.contains_key(k)));

    let mut rows: Vec<ComparisonRow> = keys
        .into_iter()
        .map(|key| classify(key, before, after))
        .collect();

    rows.sort_by(|a, b| a.status.cmp(&b.status).then_with(|| a.name.cmp(&b.name)));
    rows
}

fn classify(key: &str, before: &Inventory, after: &Inventory) -> ComparisonRow {
    let entry_before = before.get(key);
    let entry_after = after.get(key);

    let present_before = entry_before.is_some();
    let present_after = entry_after.is_some();
    let count_before = entry_before.and_then(|e| e.count);
    let count_after = entry_after.and_then(|e| e.count);

    let name = entry_after
        .or(entry_before)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| key.to_string());

    let status = match (present_before, present_after) {
        (false, true) => ReconcileStatus::New,
        (true, false) => ReconcileStatus::Deleted,
        (true, true) => match (count_before, count_after) {
            (Some(b), Some(a)) if b == a => ReconcileStatus::Match,
            (Some(_), Some(_)) => ReconcileStatus::Changed,
            _ => ReconcileStatus::PresentNoCount,
        },
        // Unreachable for keys drawn from either inventory; classified
        // as deleted-with-nothing rather than panicking.
        (false, false) => ReconcileStatus::Deleted,
    };

    let difference = match (status, count_before, count_after) {
        (ReconcileStatus::Match | ReconcileStatus::Changed, Some(b), Some(a)) => {
            // Counts range over the full u64 space, so the subtraction must
            // be widened; gaps outside the i64 range saturate
            let wide = a as i128 - b as i128;
            Some(i64::try_from(wide).unwrap_or(if wide < 0 { i64::MIN } else { i64::MAX }))
        }
        _ => None,
    };

    ComparisonRow {
        name,
        count_before,
        count_after,
        difference,
        present_before,
        present_after,
        status,
    }
}
