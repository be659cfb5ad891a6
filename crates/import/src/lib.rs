pub mod budget;
pub mod category;
pub mod csv;
pub mod discover;

pub use budget::{BudgetError, BudgetTable};
pub use category::{classify_all, Category, CategoryError, CategoryTable};
pub use csv::{
    normalize_path, normalize_reader, resolve_columns, AmountColumns, ColumnMap, NormalizedFile,
    RowParseError, SchemaError,
};
pub use discover::{discover_inputs, DiscoverError};
