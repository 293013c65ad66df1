//! Task statistics.
//!
//! Summarizes the active and completed lists: totals, urgent and
//! today-priority counts, and overdue tasks.

pub mod metrics;

pub use metrics::TaskStats;
