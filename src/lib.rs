//! marktask - quick task capture from a one-line mini-syntax
//!
//! A task line reads `<description> [@category] [!priority] [~recurring] [^due]`
//! and several tasks can be given at once, separated by commas. This crate
//! parses that syntax, resolves free-form due dates, and keeps the resulting
//! tasks in JSON files.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tasks;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use crate::core::{resolve_date, CanonicalDate, DateResolver};
pub use error::MarktaskError;
pub use features::nlp::{normalize, parse_batch, parse_line, TaskNormalizer};
pub use storage::TaskStore;
pub use tasks::{DueDate, Priority, Recurrence, TaskDraft, TaskRecord};
