//! # tabrecon
//!
//! A table-inventory reconciliation tool for detecting which database tables
//! appeared, disappeared, or changed record counts between two report
//! snapshots (e.g., captured before and after a deployment).
//!
//! The core is a heuristic report parser plus a presence/count reconciliation
//! engine; everything else (file ingestion, pretty/JSON output, spreadsheet
//! export) is plumbing around those two pure functions.

pub mod cli;
pub mod commands;
pub mod compare;
pub mod decode;
pub mod error;
pub mod ingest;
pub mod inventory;
pub mod output;
pub mod parser;
pub mod report;

pub use compare::{compare, ComparisonRow, ComparisonSummary, ReconcileStatus};
pub use error::{Result, TabreconError};
pub use inventory::{Inventory, InventoryEntry};
pub use parser::ReportParser;

/// Counts above this are treated as corrupted matches rather than real
/// record counts by the scored-candidate parsing strategy.
pub const IMPLAUSIBLE_COUNT: u64 = 1_000_000_000_000;

/// Characters of surrounding text inspected when scoring a numeric token.
pub const CONTEXT_WINDOW: usize = 20;
