//! Console configuration
//!
//! Settings that tune the console without touching its invariants. Field
//! capacities and the contract id range are fixed and deliberately absent.

use crate::contract::ContractStatus;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl From<ConfigError> for crate::EscraError {
    fn from(err: ConfigError) -> Self {
        crate::EscraError::invalid(err.to_string())
    }
}

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// How long a freshly typed digit stays visible in a masked field
    pub reveal_window_ms: u64,
    /// Largest accepted upload
    pub max_upload_bytes: u64,
    /// MIME types accepted for independently selected files
    pub accepted_mime_types: Vec<String>,
    /// Status assigned to newly created contracts
    pub default_contract_status: ContractStatus,
    /// Advance past the collaborators step when "only signer" is switched on
    pub auto_advance_on_only_signer: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            reveal_window_ms: 1000,
            max_upload_bytes: 10 * 1024 * 1024,
            accepted_mime_types: vec![
                "application/pdf".to_string(),
                "application/msword".to_string(),
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
                "image/jpeg".to_string(),
            ],
            default_contract_status: ContractStatus::Initiation,
            auto_advance_on_only_signer: true,
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal_window_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "reveal_window_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_upload_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.accepted_mime_types.iter().all(|m| m.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "accepted_mime_types",
                reason: "at least one MIME type is required".to_string(),
            });
        }
        Ok(())
    }

    /// Whether a MIME type is on the accepted list (case-insensitive).
    #[must_use]
    pub fn accepts_mime_type(&self, mime_type: &str) -> bool {
        self.accepted_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime_type.trim()))
    }
}
