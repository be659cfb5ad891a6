pub mod config;
pub mod money;
pub mod transaction;

pub use config::{ConfigError, EngineConfig};
pub use money::{Money, ParseMoneyError};
pub use transaction::{Classification, ClassifiedTransaction, Transaction};
