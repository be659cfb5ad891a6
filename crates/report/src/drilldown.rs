use serde::Serialize;

use tally_core::{ClassifiedTransaction, Money, Transaction};

/// Every transaction behind one category, in the order they arrived. Matching
/// an unknown category is not an error; the listing is simply empty.
#[derive(Debug, Clone, Serialize)]
pub struct Drilldown {
    pub rows: Vec<Transaction>,
    pub total: Money,
}

/// Case-insensitive match on the classified category name. Excluded
/// transactions never appear; original file/row order is preserved so results
/// are reproducible across runs.
pub fn drilldown(category: &str, transactions: &[ClassifiedTransaction]) -> Drilldown {
    let mut rows = Vec::new();
    let mut total = Money::zero();
    for ct in transactions {
        let Some(name) = ct.category() else { continue };
        if name.eq_ignore_ascii_case(category) {
            total = total + ct.transaction.amount;
            rows.push(ct.transaction.clone());
        }
    }
    Drilldown { rows, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::Classification;

    fn classified(category: &str, desc: &str, cents: i64, day: u32) -> ClassifiedTransaction {
        ClassifiedTransaction {
            transaction: Transaction {
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                amount: Money::from_cents(cents),
                description: desc.to_string(),
                source_file: "test.csv".to_string(),
            },
            classification: Classification::Category(category.to_string()),
        }
    }

    #[test]
    fn collects_matching_category_with_total() {
        let txs = vec![
            classified("Groceries", "HARRIS TEETER", -4550, 15),
            classified("Gas", "SHELL", -3000, 16),
            classified("Groceries", "COSTCO", -8000, 17),
        ];
        let result = drilldown("Groceries", &txs);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.total, Money::from_cents(-12550));
    }

    #[test]
    fn match_is_case_insensitive() {
        let txs = vec![classified("Groceries", "COSTCO", -100, 15)];
        assert_eq!(drilldown("groceries", &txs).rows.len(), 1);
        assert_eq!(drilldown("GROCERIES", &txs).rows.len(), 1);
    }

    #[test]
    fn preserves_input_order() {
        // Deliberately out of date order; the listing must not re-sort.
        let txs = vec![
            classified("Gas", "SHELL LATE", -100, 20),
            classified("Gas", "SHELL EARLY", -200, 5),
        ];
        let result = drilldown("Gas", &txs);
        assert_eq!(result.rows[0].description, "SHELL LATE");
        assert_eq!(result.rows[1].description, "SHELL EARLY");
    }

    #[test]
    fn unknown_category_is_empty_not_error() {
        let txs = vec![classified("Gas", "SHELL", -100, 15)];
        let result = drilldown("Vacation", &txs);
        assert!(result.rows.is_empty());
        assert_eq!(result.total, Money::zero());
    }

    #[test]
    fn excluded_transactions_never_listed() {
        let mut tx = classified("x", "PAYMENT", -100, 15);
        tx.classification = Classification::Excluded;
        let result = drilldown("x", &[tx]);
        assert!(result.rows.is_empty());
    }
}
