//! Data module - CSV loading and monthly aggregation

mod aggregator;
mod loader;
mod record;

pub use aggregator::{aggregate_monthly, locations, months};
pub use loader::{load_records, parse_date, LoadError};
pub use record::{MonthKey, MonthKeyError, MonthlyAggregate, RawRecord};
