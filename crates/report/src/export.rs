use std::io::Write;

use crate::summary::CategorySummary;

/// Writes the summary (TOTAL row included) as CSV. Budget columns appear only
/// when the summary was computed against a budget table.
pub fn write_summary_csv<W: Write>(
    writer: W,
    rows: &[CategorySummary],
) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    let with_budget = rows.iter().any(|row| row.budget.is_some());

    if with_budget {
        out.write_record([
            "Category",
            "Count",
            "Total",
            "Average",
            "Percent",
            "Budget",
            "Deviation",
        ])?;
    } else {
        out.write_record(["Category", "Count", "Total", "Average", "Percent"])?;
    }

    for row in rows {
        let mut record = vec![
            row.category.clone(),
            row.count.to_string(),
            format!("{:.2}", row.total.as_decimal()),
            format!("{:.2}", row.average.as_decimal()),
            format!("{:.1}", row.percent),
        ];
        if with_budget {
            record.push(
                row.budget
                    .map(|b| format!("{:.2}", b.as_decimal()))
                    .unwrap_or_default(),
            );
            record.push(
                row.deviation
                    .map(|d| format!("{:.2}", d.as_decimal()))
                    .unwrap_or_default(),
            );
        }
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}
