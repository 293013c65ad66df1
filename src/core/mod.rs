//! Core abstractions for marktask.
//!
//! This module provides date resolution and shared traits used across features.

mod datetime;
pub mod filter;
mod traits;

pub use datetime::{resolve_date, CanonicalDate, DateResolver};
pub use filter::{filter_tasks, TaskFilter};
pub use traits::{ResolveDate, Schedulable};
