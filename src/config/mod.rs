//! Configuration for the client core.
//!
//! Loaded from `~/.config/voltdesk/config.toml`; every section is optional.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LocaleConfig, PaginationConfig, StorageConfig};
