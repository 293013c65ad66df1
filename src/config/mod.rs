//! Configuration management for marktask.
//!
//! This module handles loading configuration from `~/.marktask/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, ParsingConfig, StorageConfig};
