//! Statistics command implementation.

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::error::MarktaskError;
use crate::features::stats::TaskStats;
use crate::output::format_stats;
use crate::storage::TaskStore;

/// Execute stats command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn stats(store: &TaskStore, today: NaiveDate, format: OutputFormat) -> Result<String, MarktaskError> {
    let stats = TaskStats::calculate(store.tasks(), store.completed(), today);
    format_stats(&stats, format)
}
