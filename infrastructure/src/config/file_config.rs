//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section and field has a default so the service starts from an
//! empty config; secrets (the deployment API key) are normally supplied
//! via environment variables rather than the file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener settings
    pub server: FileServerConfig,
    /// Question sheet settings
    pub sheet: FileSheetConfig,
    /// Rephrase deployment settings
    pub rephrase: FileRephraseConfig,
    /// Flow-event logging settings
    pub logging: FileLoggingConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// `[sheet]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSheetConfig {
    /// Path to the question workbook.
    pub path: PathBuf,
    /// Header rows to skip before question rows start.
    pub skip_rows: usize,
}

impl Default for FileSheetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/vragenlijst.xlsx"),
            skip_rows: 2,
        }
    }
}

/// `[rephrase]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRephraseConfig {
    /// Deployment invoke endpoint.
    pub endpoint: String,
    /// Bearer token; normally set via `INTAKE_REPHRASE__API_KEY`.
    pub api_key: String,
    /// Deployment key selecting the questionnaire prompt.
    pub deployment: String,
    /// Static deployment context sent with every invoke.
    pub context: BTreeMap<String, Vec<String>>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileRephraseConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.orquesta.dev/v2/deployments/invoke".to_string(),
            api_key: String::new(),
            deployment: "logopedica-vragenlijsten".to_string(),
            context: BTreeMap::from([
                ("environments".to_string(), vec![]),
                ("klacht".to_string(), vec!["mondgewoonten".to_string()]),
            ]),
            timeout_secs: 30,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Where to append flow events as JSONL; unset disables flow logging.
    pub flow_log_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.sheet.skip_rows, 2);
        assert_eq!(config.rephrase.deployment, "logopedica-vragenlijsten");
        assert!(config.rephrase.api_key.is_empty());
        assert!(config.logging.flow_log_path.is_none());
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [rephrase]
            api_key = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.rephrase.api_key, "secret");
        assert_eq!(config.sheet.path, PathBuf::from("data/vragenlijst.xlsx"));
    }
}
