//! Calendar-month key space shared by every target and achievement series.

pub mod month_key;
pub mod month_series;

pub use month_key::{month_keys, year_bounds, year_prefix, MonthKey, MONTHS_PER_YEAR, SUPPORTED_YEARS};
pub use month_series::MonthSeries;
