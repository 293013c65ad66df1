//! Feature implementations for marktask.
//!
//! - Inline task syntax parsing
//! - Statistics

pub mod nlp;
pub mod stats;
