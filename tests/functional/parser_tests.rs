//! Functional tests for the report parser strategy chain

use tabrecon::parser::parse;
use tabrecon::ReportParser;

use crate::common::sample_data;

#[test]
fn test_pipe_report_parsed_by_labeled_columns() {
    let inventory = parse(sample_data::PIPE_REPORT_BEFORE);

    assert_eq!(inventory.len(), 3);
    assert_eq!(inventory.get("cust").unwrap().count, Some(1250));
    assert_eq!(inventory.get("ord").unwrap().count, Some(42));
    assert_eq!(inventory.get("legacy").unwrap().count, Some(7));
}

#[test]
fn test_label_report_parsed_by_fallback() {
    let inventory = parse(sample_data::LABEL_REPORT);

    assert_eq!(inventory.len(), 2);
    assert_eq!(inventory.get("customers").unwrap().count, Some(1250));
    assert_eq!(inventory.get("orders").unwrap().count, Some(42));
}

#[test]
fn test_dedup_idempotence() {
    // A table name repeated three times with different counts yields
    // exactly one entry, whose count equals the first occurrence's
    let text = "\
TABLE | CUST | Customers | 100 |
TABLE | CUST | Customers | 200 |
TABLE | CUST | Customers | 300 |
";
    let inventory = parse(text);
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory.get("cust").unwrap().count, Some(100));
}

#[test]
fn test_unparseable_lines_skipped_without_error() {
    let text = "\
garbage ####
TABLE | CUST | Customers | 1,250 |
| | | |
TABLE incomplete line without pipes 99
";
    let inventory = parse(text);
    assert!(inventory.contains_key("cust"));
}

#[test]
fn test_parser_is_reusable() {
    let parser = ReportParser::new();
    let first = parser.parse(sample_data::PIPE_REPORT_BEFORE);
    let second = parser.parse(sample_data::PIPE_REPORT_BEFORE);
    assert_eq!(first.len(), second.len());
}

#[test]
fn test_whitespace_heavy_pipe_layout() {
    let text = "TABLE   |   CUST    |  Customers   |    1,250   |";
    let inventory = parse(text);
    assert_eq!(inventory.get("cust").unwrap().count, Some(1250));
}

#[test]
fn test_count_with_thousands_separators() {
    let inventory = parse("TABLE | BIG | Billing history | 12,345,678 |");
    assert_eq!(inventory.get("big").unwrap().count, Some(12_345_678));
}

#[test]
fn test_free_text_report_scored_strategy() {
    let text = "\
Backup summary generated Monday
table CUSTOMERS contains 1,250 records total (occupying 88 MB)
table ORDERS contains 42 records total (occupying 2 MB)
";
    let inventory = parse(text);
    assert_eq!(inventory.get("customers").unwrap().count, Some(1250));
    assert_eq!(inventory.get("orders").unwrap().count, Some(42));
}
