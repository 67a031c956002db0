use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::ConfigError;

pub const CONFIG_KEYS: [&str; 6] = [
    "store",
    "data_root",
    "log_filter",
    "ui_color_enabled",
    "plain_output",
    "display_precision",
];

/// Stores user-configurable preferences and identity grants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub store: StoreBackend,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    /// Optional custom directory for calculation data. Defaults to `<home>/data`.
    pub data_root: Option<PathBuf>,

    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,

    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default)]
    pub plain_output: bool,

    #[serde(default)]
    pub display_precision: Option<u8>,

    #[serde(default)]
    pub credentials: Vec<CredentialGrant>,

    /// Tokens that were revoked and must keep failing as revoked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revoked: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            data_root: None,
            log_filter: Self::default_log_filter(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            plain_output: false,
            display_precision: None,
            credentials: Vec::new(),
            revoked: Vec::new(),
        }
    }
}

impl Config {
    pub fn default_log_filter() -> String {
        "calcbook=info".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Directory holding calculation data: `data_root` if set, else `<home>/data`.
    pub fn resolve_data_root(&self, home: &Path) -> PathBuf {
        self.data_root
            .clone()
            .unwrap_or_else(|| home.join("data"))
    }

    /// Adds a token grant, replacing any existing grant for the same token
    /// and lifting an earlier revocation of it.
    pub fn grant(&mut self, token: &str, owner_id: u64, label: Option<&str>) {
        let token = token.trim().to_string();
        self.credentials.retain(|grant| grant.token != token);
        self.revoked.retain(|revoked| *revoked != token);
        self.credentials.push(CredentialGrant {
            token,
            owner_id,
            label: label.map(str::to_string),
        });
    }

    /// Removes the grant for `token` and records it as revoked. Returns
    /// whether a grant existed; unknown tokens are not recorded.
    pub fn revoke(&mut self, token: &str) -> bool {
        let token = token.trim();
        let before = self.credentials.len();
        self.credentials.retain(|grant| grant.token != token);
        let removed = self.credentials.len() != before;
        if removed && !self.revoked.iter().any(|revoked| revoked == token) {
            self.revoked.push(token.to_string());
        }
        removed
    }

    /// Updates a single scalar setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "store" => self.store = StoreBackend::parse(value)?,
            "data_root" => {
                self.data_root = if value.is_empty() || value == "default" {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "log_filter" => {
                if value.is_empty() {
                    return Err(invalid(key, "filter must not be empty"));
                }
                self.log_filter = value.to_string();
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(key, value)?,
            "plain_output" => self.plain_output = parse_bool(key, value)?,
            "display_precision" => {
                self.display_precision = if value.is_empty() || value == "auto" {
                    None
                } else {
                    let digits: u8 = value
                        .parse()
                        .map_err(|_| invalid(key, "expected a number of decimal places"))?;
                    if digits > 15 {
                        return Err(invalid(key, "at most 15 decimal places are supported"));
                    }
                    Some(digits)
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// A token granted access as a specific owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialGrant {
    pub token: String,
    pub owner_id: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

/// Selects where calculation records are kept.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    Json,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "json" => Ok(StoreBackend::Json),
            _ => Err(invalid("store", "expected `memory` or `json`")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Json => "json",
        };
        f.write_str(label)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, "expected true or false")),
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
