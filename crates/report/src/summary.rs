use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use tally_core::{ClassifiedTransaction, Money};
use tally_import::BudgetTable;

/// Name of the synthetic reduction row appended after the category rows.
pub const TOTAL_LABEL: &str = "TOTAL";

/// One summary row. `budget` and `deviation` are present only when a budget
/// table was supplied to [`summarize`]; `deviation = budget - total`, so a
/// negative deviation means over budget.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub total: Money,
    pub average: Money,
    pub percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation: Option<Money>,
}

/// Groups non-excluded transactions by category and reduces each group to
/// count, total, average and share of the grand total. Rows come back sorted
/// by descending total (name as tie-break), with the `TOTAL` row appended
/// last. An empty post-exclusion input yields an empty vector.
pub fn summarize(
    transactions: &[ClassifiedTransaction],
    budgets: Option<&BudgetTable>,
) -> Vec<CategorySummary> {
    let mut groups: HashMap<&str, (usize, Money)> = HashMap::new();
    for ct in transactions {
        let Some(name) = ct.category() else { continue };
        let entry = groups.entry(name).or_insert((0, Money::zero()));
        entry.0 += 1;
        entry.1 = entry.1 + ct.transaction.amount;
    }

    if groups.is_empty() {
        return Vec::new();
    }

    let grand_count: usize = groups.values().map(|(count, _)| count).sum();
    let grand_total: Money = groups.values().map(|(_, total)| *total).sum();

    let mut rows: Vec<CategorySummary> = groups
        .into_iter()
        .map(|(name, (count, total))| {
            let budget = budgets.map(|b| b.get(name).unwrap_or_else(Money::zero));
            CategorySummary {
                category: name.to_string(),
                count,
                total,
                average: total.per(count),
                percent: percent_of(total, grand_total),
                budget,
                deviation: budget.map(|b| b - total),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

    let budget_total =
        budgets.map(|_| rows.iter().filter_map(|row| row.budget).sum::<Money>());
    rows.push(CategorySummary {
        category: TOTAL_LABEL.to_string(),
        count: grand_count,
        total: grand_total,
        average: grand_total.per(grand_count),
        percent: 100.0,
        budget: budget_total,
        deviation: budget_total.map(|b| b - grand_total),
    });

    info!("summarized {} categories, grand total {}", rows.len() - 1, grand_total);
    rows
}

fn percent_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    ((part.as_decimal() / whole.as_decimal()) * Decimal::from(100))
        .to_f64()
        .unwrap_or(0.0)
}

/// Number of real categories in a summary, not counting the TOTAL row or the
/// default bucket.
pub fn category_count(rows: &[CategorySummary], default_label: &str) -> usize {
    rows.iter()
        .filter(|row| row.category != TOTAL_LABEL && row.category != default_label)
        .count()
}

/// How many transactions fell through to the default bucket.
pub fn uncategorized_count(rows: &[CategorySummary], default_label: &str) -> usize {
    rows.iter()
        .find(|row| row.category == default_label)
        .map(|row| row.count)
        .unwrap_or(0)
}
