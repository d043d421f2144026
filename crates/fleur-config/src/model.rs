use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable client preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_notify_on_status_change")]
    pub notify_on_status_change: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_signed_in_user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom staging directory for receipt images awaiting upload.
    /// Defaults to `~/Pictures/Receipts`.
    pub receipts_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-PH".into(),
            currency: "PHP".into(),
            currency_symbol: Self::default_currency_symbol(),
            notify_on_status_change: Self::default_notify_on_status_change(),
            last_signed_in_user: None,
            receipts_root: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "₱".into()
    }

    pub fn default_notify_on_status_change() -> bool {
        true
    }

    pub fn resolve_receipts_root(&self) -> PathBuf {
        if let Some(path) = &self.receipts_root {
            return path.clone();
        }

        let base = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Receipts")
    }
}
