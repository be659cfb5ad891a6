//! End-to-end pipeline tests over on-disk fixtures.

use std::fs;
use std::path::Path;

use tally_core::{EngineConfig, Money};
use tally_import::BudgetTable;
use tally_report::{drilldown, summarize, write_summary_csv, TOTAL_LABEL};

use crate::commands::load_classified;

fn write_fixtures(dir: &Path) {
    let tx_dir = dir.join("transactions");
    fs::create_dir(&tx_dir).unwrap();

    // Checking export: single signed Amount column.
    fs::write(
        tx_dir.join("checking.csv"),
        "Date,Amount,Description\n\
         2024-01-15,-45.50,HARRIS TEETER #1234 CHARLOTTE\n\
         2024-01-16,-25.75,STARBUCKS COFFEE 98765\n\
         2024-01-17,-10.00,UNKNOWN SHOP\n\
         2024-01-18,-2071.74,PAYMENT THANK YOU\n",
    )
    .unwrap();

    // Card export: credit/debit pair and a different date header.
    fs::write(
        tx_dir.join("card.csv"),
        "Transaction Date,Credit,Debit,Description\n\
         01/19/2024,0.00,80.00,COSTCO WHOLESALE #55\n\
         01/20/2024,1200.00,0.00,PAYROLL DEPOSIT\n",
    )
    .unwrap();

    fs::write(
        dir.join("category_list.csv"),
        "Groceries,Restaurants,Income,ignore\n\
         HARRIS TEETER,STARBUCKS,PAYROLL,PAYMENT THANK YOU\n\
         COSTCO,,,\n",
    )
    .unwrap();
}

#[test]
fn pipeline_classifies_mixed_format_batch() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let config = EngineConfig::default();

    let classified = load_classified(
        &config,
        dir.path(),
        &dir.path().join("category_list.csv"),
    )
    .unwrap();

    // Six rows in, one excluded by the ignore column.
    assert_eq!(classified.len(), 6);
    assert_eq!(classified.iter().filter(|ct| ct.is_excluded()).count(), 1);

    let rows = summarize(&classified, None);
    let total = rows.last().unwrap();
    assert_eq!(total.category, TOTAL_LABEL);
    assert_eq!(total.count, 5);
    // -45.50 - 25.75 - 10.00 - 80.00 + 1200.00
    assert_eq!(total.total, Money::from_cents(103875));

    let groceries = rows.iter().find(|r| r.category == "Groceries").unwrap();
    assert_eq!(groceries.count, 2);
    assert_eq!(groceries.total, Money::from_cents(-12550));
}

#[test]
fn unreadable_schema_file_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    fs::write(
        dir.path().join("transactions").join("weird.csv"),
        "When,How Much,What\nyesterday,a lot,THINGS\n",
    )
    .unwrap();
    let config = EngineConfig::default();

    let classified = load_classified(
        &config,
        dir.path(),
        &dir.path().join("category_list.csv"),
    )
    .unwrap();
    // The two good files still load in full.
    assert_eq!(classified.len(), 6);
}

#[test]
fn empty_category_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let empty = dir.path().join("empty_categories.csv");
    fs::write(&empty, "Groceries,Gas\n").unwrap();
    let config = EngineConfig::default();

    assert!(load_classified(&config, dir.path(), &empty).is_err());
}

#[test]
fn budget_comparison_flows_through_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    fs::write(
        dir.path().join("budget.csv"),
        "Category,Budget\nGroceries,100.00\nRestaurants,50.00\n",
    )
    .unwrap();
    let config = EngineConfig::default();

    let classified = load_classified(
        &config,
        dir.path(),
        &dir.path().join("category_list.csv"),
    )
    .unwrap();
    let budgets = BudgetTable::from_path(&dir.path().join("budget.csv")).unwrap();
    let rows = summarize(&classified, Some(&budgets));

    let groceries = rows.iter().find(|r| r.category == "Groceries").unwrap();
    assert_eq!(groceries.budget, Some(Money::from_cents(10000)));
    // 100.00 - (-125.50): spending is negative, so the deviation stays positive.
    assert_eq!(groceries.deviation, Some(Money::from_cents(22550)));
}

#[test]
fn drilldown_matches_case_insensitively_over_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let config = EngineConfig::default();

    let classified = load_classified(
        &config,
        dir.path(),
        &dir.path().join("category_list.csv"),
    )
    .unwrap();

    let result = drilldown("groceries", &classified);
    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.total, Money::from_cents(-12550));
    // Discovery sorts file names, so card.csv rows come before checking.csv.
    assert!(result.rows[0].description.starts_with("COSTCO"));
    assert!(result.rows[1].description.starts_with("HARRIS TEETER"));
}

#[test]
fn summary_export_round_trips_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let config = EngineConfig::default();

    let classified = load_classified(
        &config,
        dir.path(),
        &dir.path().join("category_list.csv"),
    )
    .unwrap();
    let rows = summarize(&classified, None);

    let export_path = dir.path().join("summary.csv");
    let file = fs::File::create(&export_path).unwrap();
    write_summary_csv(file, &rows).unwrap();

    let text = fs::read_to_string(&export_path).unwrap();
    assert!(text.starts_with("Category,Count,Total,Average,Percent"));
    // Header + one line per summary row (TOTAL included).
    assert_eq!(text.lines().count(), rows.len() + 1);
}

#[test]
fn engine_config_override_changes_default_label() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let config_path = dir.path().join("tally.toml");
    fs::write(&config_path, "default_category = \"Other\"\n").unwrap();

    let config = crate::commands::load_engine_config(Some(&config_path)).unwrap();
    let classified = load_classified(
        &config,
        dir.path(),
        &dir.path().join("category_list.csv"),
    )
    .unwrap();
    assert!(classified.iter().any(|ct| ct.category() == Some("Other")));
}
