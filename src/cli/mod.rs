//! Command-line interface for marktask.

pub mod args;
pub mod commands;
