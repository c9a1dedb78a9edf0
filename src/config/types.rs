use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Locales the client can present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale codes with translations available (default: en, de).
    #[serde(default = "default_supported_locales")]
    pub supported: Vec<String>,
    /// Fallback when neither a saved nor a system locale applies (default: en).
    #[serde(default = "default_locale")]
    pub default: String,
}

/// Infinite-scroll tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Items per page (default: 10).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Distance from the bottom, in pixels, that triggers the next page
    /// (default: 100).
    #[serde(default = "default_scroll_threshold_px")]
    pub scroll_threshold_px: u32,
    /// Scroll debounce window in milliseconds (default: 100).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Persisted client state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// State file. Defaults to `<data dir>/voltdesk/state.toml`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_supported_locales() -> Vec<String> {
    vec!["en".to_string(), "de".to_string()]
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_scroll_threshold_px() -> u32 {
    100
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: default_supported_locales(),
            default: default_locale(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            scroll_threshold_px: default_scroll_threshold_px(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl StorageConfig {
    /// Configured state file, or the platform default.
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("voltdesk")
                .join("state.toml"),
        }
    }
}
