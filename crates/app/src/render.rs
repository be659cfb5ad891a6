//! Terminal rendering of summaries and drilldowns. Plain aligned columns;
//! nothing here feeds back into the pipeline.

use tally_core::{ClassifiedTransaction, EngineConfig};
use tally_report::{category_count, uncategorized_count, CategorySummary, Drilldown, TOTAL_LABEL};

pub fn summary_table(
    rows: &[CategorySummary],
    classified: &[ClassifiedTransaction],
    config: &EngineConfig,
) {
    println!();
    println!("Spending by category");

    if rows.is_empty() {
        println!("  No transactions to display.");
        return;
    }

    let excluded = classified.iter().filter(|ct| ct.is_excluded()).count();
    let total_row = rows.last().expect("summary always ends with TOTAL");
    println!(
        "  {} transactions │ {} categories │ {} uncategorized │ {} excluded",
        total_row.count,
        category_count(rows, &config.default_category),
        uncategorized_count(rows, &config.default_category),
        excluded
    );
    println!();

    let with_budget = rows.iter().any(|row| row.budget.is_some());
    if with_budget {
        println!(
            "  {:<20} │ {:>5} │ {:>11} │ {:>10} │ {:>7} │ {:>11} │ {:>11}",
            "Category", "Count", "Total", "Average", "%", "Budget", "Deviation"
        );
        println!("  ─────────────────────┼───────┼─────────────┼────────────┼─────────┼─────────────┼────────────");
    } else {
        println!(
            "  {:<20} │ {:>5} │ {:>11} │ {:>10} │ {:>7}",
            "Category", "Count", "Total", "Average", "%"
        );
        println!("  ─────────────────────┼───────┼─────────────┼────────────┼────────");
    }

    for row in rows {
        if row.category == TOTAL_LABEL {
            if with_budget {
                println!("  ─────────────────────┼───────┼─────────────┼────────────┼─────────┼─────────────┼────────────");
            } else {
                println!("  ─────────────────────┼───────┼─────────────┼────────────┼────────");
            }
        }
        let base = format!(
            "  {:<20} │ {:>5} │ {:>11} │ {:>10} │ {:>6.1}%",
            truncate(&row.category, 20),
            row.count,
            row.total.to_string(),
            row.average.to_string(),
            row.percent
        );
        match (with_budget, row.budget, row.deviation) {
            (true, Some(budget), Some(deviation)) => {
                println!("{base} │ {:>11} │ {:>11}", budget.to_string(), deviation.to_string());
            }
            (true, _, _) => println!("{base} │ {:>11} │ {:>11}", "", ""),
            (false, _, _) => println!("{base}"),
        }
    }
    println!();
}

pub fn drilldown_table(category: &str, result: &Drilldown) {
    println!();
    println!("Transactions for {category:?}");

    if result.rows.is_empty() {
        println!("  No transactions in this category.");
        return;
    }

    println!(
        "  {:<10} │ {:>11} │ {:<40} │ {}",
        "Date", "Amount", "Description", "Source"
    );
    println!("  ───────────┼─────────────┼──────────────────────────────────────────┼───────────");
    for tx in &result.rows {
        println!(
            "  {:<10} │ {:>11} │ {:<40} │ {}",
            tx.date.to_string(),
            tx.amount.to_string(),
            truncate(&tx.description, 40),
            tx.source_file
        );
    }
    println!("  ───────────┴─────────────┴──────────────────────────────────────────┴───────────");
    println!("  {} transactions, total {}", result.rows.len(), result.total);
    println!();
}

/// Truncates long cell text with an ellipsis so columns stay aligned.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
