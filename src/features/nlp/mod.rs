//! Inline task syntax parsing.
//!
//! This module turns input like
//! `Buy milk @shopping !today ^tomorrow, Pay rent ~monthly ^feb 1`
//! into task records:
//! - [`parse_line`] reads one annotated line
//! - [`parse_batch`] splits comma-separated input and parses each task
//! - [`normalize`] resolves due text into calendar dates

mod batch;
mod normalize;
mod parser;

pub use batch::{parse_batch, BatchParser};
pub use normalize::{normalize, normalize_with, TaskNormalizer};
pub use parser::parse_line;
