//! Reports module for SetAside
//!
//! Monthly statistics with a per-category breakdown, and the income/expense
//! trend over several months.

pub mod stats;
pub mod trend;

pub use stats::{CategorySpending, MonthlyStats};
pub use trend::{MonthlyTrend, TrendPoint, MAX_TREND_MONTHS};
