//! End-to-end reconciliation scenarios: parse both sides, then compare

use tabrecon::parser::parse;
use tabrecon::{compare, ComparisonSummary, ReconcileStatus};

use crate::common::{assertions, sample_data};

#[test]
fn test_scenario_identical_line_is_match() {
    let before = parse("TABLE | CUST | Customers | 1,250 |");
    let after = parse("TABLE | CUST | Customers | 1,250 |");
    let rows = compare(&before, &after);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ReconcileStatus::Match);
    assert_eq!(rows[0].difference, Some(0));
}

#[test]
fn test_scenario_table_disappeared_is_deleted() {
    let before = parse("TABLE | CUST | Customers | 1,250 |");
    let after = parse("");
    let rows = compare(&before, &after);

    assert_eq!(rows.len(), 1);
    assert!(rows[0].present_before);
    assert!(!rows[0].present_after);
    assert_eq!(rows[0].status, ReconcileStatus::Deleted);
    assert_eq!(rows[0].difference, None);
}

#[test]
fn test_scenario_table_appeared_is_new() {
    let before = parse("");
    let after = parse("TABLE | ORD | Orders | 42 |");
    let rows = compare(&before, &after);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ReconcileStatus::New);
    assert_eq!(rows[0].count_after, Some(42));
}

#[test]
fn test_scenario_count_grew_is_changed() {
    let before = parse("TABLE | X | desc | 100 |");
    let after = parse("TABLE | X | desc | 150 |");
    let rows = compare(&before, &after);

    assert_eq!(rows[0].status, ReconcileStatus::Changed);
    assert_eq!(rows[0].difference, Some(50));
}

#[test]
fn test_scenario_unparseable_count_is_present_no_count() {
    let before = parse("TABLE | Y | desc | N/A |");
    let after = parse("TABLE | Y | desc | 500 |");
    let rows = compare(&before, &after);

    assert_eq!(rows[0].status, ReconcileStatus::PresentNoCount);
    assert_eq!(rows[0].difference, None);
}

#[test]
fn test_full_deployment_report() {
    let before = parse(sample_data::PIPE_REPORT_BEFORE);
    let after = parse(sample_data::PIPE_REPORT_AFTER);
    let rows = compare(&before, &after);

    assert_eq!(rows.len(), 4);
    assertions::assert_status(&rows, "CUST", ReconcileStatus::Match);
    assertions::assert_status(&rows, "ORD", ReconcileStatus::Changed);
    assertions::assert_status(&rows, "LEGACY", ReconcileStatus::Deleted);
    assertions::assert_status(&rows, "EVENTS", ReconcileStatus::New);

    assert_eq!(assertions::row_for(&rows, "ORD").difference, Some(50));
    assert_eq!(assertions::row_for(&rows, "EVENTS").count_after, Some(3000));

    let summary = ComparisonSummary::from_rows(&rows);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.matches, 1);
    assert_eq!(summary.changed, 1);
    assert_eq!(summary.new, 1);
    assert_eq!(summary.deleted, 1);
    assert!(summary.has_differences());
}

#[test]
fn test_case_and_whitespace_variants_join_to_one_row() {
    // "Orders", " orders ", "ORDERS" are all the same table
    let before = parse("TABLE |  Orders  | desc | 10 |");
    let after = parse("TABLE | ORDERS | desc | 10 |");
    let rows = compare(&before, &after);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ReconcileStatus::Match);
}

#[test]
fn test_mixed_layout_sides_still_reconcile() {
    // One side pipe-delimited, the other a label report: keys still join
    let before = parse("TABLE | customers | desc | 1,250 |");
    let after = parse("CUSTOMERS: 1,300");
    let rows = compare(&before, &after);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ReconcileStatus::Changed);
    assert_eq!(rows[0].difference, Some(50));
}

#[test]
fn test_result_is_deterministic() {
    let before = parse(sample_data::PIPE_REPORT_BEFORE);
    let after = parse(sample_data::PIPE_REPORT_AFTER);

    let first = compare(&before, &after);
    let second = compare(&before, &after);

    let names_first: Vec<&str> = first.iter().map(|r| r.name.as_str()).collect();
    let names_second: Vec<&str> = second.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names_first, names_second);
}
