//! Pure operations over a snapshot of form records.
//!
//! Every function takes the snapshot by shared reference and returns owned
//! results; none of them mutates or reorders the input.

pub mod filter;
pub mod monthly;
pub mod recent;
pub mod stats;

pub use filter::{FormFilter, OriginFilter, filter};
pub use monthly::{MonthlyReport, MonthlySelection};
pub use recent::{RECENT_DEFAULT, recent};
pub use stats::{ChartSlice, DashboardStats, OriginStats, origin_stats, stats, stats_on};
