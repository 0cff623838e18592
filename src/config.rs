//! Runtime configuration, read from the environment (and an optional `.env`
//! file in the working directory).

use std::env;
use std::path::PathBuf;

use crate::error::{ContactsError, ContactsResult};
use crate::export::{ExportOptions, ExportStrategy, DEFAULT_COLUMN_WIDTH};

const DEFAULT_DB_PATH: &str = ".data/contacts.db";
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_CARD_MODEL: &str = "llava";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file (`CONTACTS_DB_PATH`)
    pub db_path: PathBuf,

    /// Read strategy for exports (`CONTACTS_EXPORT_STRATEGY`)
    pub export_strategy: ExportStrategy,

    /// Spreadsheet column width (`CONTACTS_EXPORT_COLUMN_WIDTH`)
    pub column_width: f64,

    /// Ollama base URL for card scanning (`OLLAMA_HOST`)
    pub ollama_url: String,

    /// Vision model used for card scanning (`CONTACTS_CARD_MODEL`)
    pub card_model: String,

    /// Log filter used when `RUST_LOG` is unset (`LOG_LEVEL`)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            export_strategy: ExportStrategy::default(),
            column_width: DEFAULT_COLUMN_WIDTH,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            card_model: DEFAULT_CARD_MODEL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables. Every variable is
    /// optional; unset variables keep their defaults.
    pub fn from_env() -> ContactsResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ContactsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup("CONTACTS_DB_PATH").filter(|s| !s.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("CONTACTS_EXPORT_STRATEGY") {
            config.export_strategy =
                ExportStrategy::parse(&raw).ok_or_else(|| ContactsError::InvalidConfig {
                    var: "CONTACTS_EXPORT_STRATEGY".into(),
                    reason: format!("expected 'per-collection' or 'join', got: {}", raw),
                })?;
        }

        if let Some(raw) = lookup("CONTACTS_EXPORT_COLUMN_WIDTH") {
            config.column_width = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|w| *w > 0.0 && *w <= 255.0)
                .ok_or_else(|| ContactsError::InvalidConfig {
                    var: "CONTACTS_EXPORT_COLUMN_WIDTH".into(),
                    reason: format!("must be a number between 0 and 255, got: {}", raw),
                })?;
        }

        if let Some(url) = lookup("OLLAMA_HOST") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ContactsError::InvalidConfig {
                    var: "OLLAMA_HOST".into(),
                    reason: "Must start with http:// or https://".into(),
                });
            }
            config.ollama_url = url.trim_end_matches('/').to_string();
        }

        if let Some(model) = lookup("CONTACTS_CARD_MODEL").filter(|s| !s.trim().is_empty()) {
            config.card_model = model;
        }

        if let Some(level) = lookup("LOG_LEVEL").filter(|s| !s.trim().is_empty()) {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            strategy: self.export_strategy,
            column_width: self.column_width,
        }
    }
}
