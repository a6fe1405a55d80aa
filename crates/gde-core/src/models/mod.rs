//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::{GdeConfig, LayoutConfig, NumberGrammar};
pub use record::GdeRecord;
