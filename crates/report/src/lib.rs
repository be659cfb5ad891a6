pub mod drilldown;
pub mod export;
pub mod summary;

pub use drilldown::{drilldown, Drilldown};
pub use export::write_summary_csv;
pub use summary::{category_count, summarize, uncategorized_count, CategorySummary, TOTAL_LABEL};
