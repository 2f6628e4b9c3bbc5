//! Configuration loading.
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/jukebridge/config.toml` (system)
//! 2. `~/.config/jukebridge/config.toml` (user)
//! 3. `./jukebridge.toml` (local override, replaced by `--config` if given)
//! 4. Environment variables (`JUKEBRIDGE_*`)
//!
//! Example config:
//!
//! ```toml
//! [bind]
//! http_port = 8080
//!
//! [mixer]
//! base_url = "http://127.0.0.1:9000"
//! timeout_ms = 5000
//!
//! [telemetry]
//! log_level = "info"
//! ```

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {var}: {message}")]
    EnvOverride { var: String, message: String },
}

/// Network bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindConfig {
    /// HTTP port for the listener-facing endpoints.
    /// Default: 8080
    #[serde(default = "BindConfig::default_http_port")]
    pub http_port: u16,
}

impl BindConfig {
    fn default_http_port() -> u16 {
        8080
    }
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            http_port: Self::default_http_port(),
        }
    }
}

/// Remote mixer endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixerConfig {
    /// Base URL of the live audio mixer.
    /// Default: http://127.0.0.1:9000
    #[serde(default = "MixerConfig::default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    /// Default: 5000
    #[serde(default = "MixerConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl MixerConfig {
    fn default_base_url() -> String {
        "http://127.0.0.1:9000".to_string()
    }

    fn default_timeout_ms() -> u64 {
        5000
    }
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default log filter when RUST_LOG is unset (EnvFilter syntax).
    /// Default: info
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub bind: BindConfig,
    #[serde(default)]
    pub mixer: MixerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl BridgeConfig {
    /// Load config from the standard locations plus env overrides.
    pub fn load(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut table = toml::Table::new();
        for path in discover_config_files(cli_path) {
            let contents =
                std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
                    path: path.clone(),
                    source: e,
                })?;
            let parsed: toml::Table =
                contents
                    .parse()
                    .map_err(|e: toml::de::Error| ConfigError::Parse {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
            merge_tables(&mut table, parsed);
        }

        let mut config: BridgeConfig =
            toml::Value::Table(table)
                .try_into()
                .map_err(|e: toml::de::Error| ConfigError::Parse {
                    path: PathBuf::from("<merged config>"),
                    message: e.to_string(),
                })?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(v) = env::var("JUKEBRIDGE_HTTP_PORT") {
            self.bind.http_port = v.parse().map_err(|_| ConfigError::EnvOverride {
                var: "JUKEBRIDGE_HTTP_PORT".to_string(),
                message: format!("'{v}' is not a port number"),
            })?;
        }
        if let Ok(v) = env::var("JUKEBRIDGE_MIXER_URL") {
            self.mixer.base_url = v;
        }
        if let Ok(v) = env::var("JUKEBRIDGE_MIXER_TIMEOUT_MS") {
            self.mixer.timeout_ms = v.parse().map_err(|_| ConfigError::EnvOverride {
                var: "JUKEBRIDGE_MIXER_TIMEOUT_MS".to_string(),
                message: format!("'{v}' is not a millisecond count"),
            })?;
        }
        if let Ok(v) = env::var("JUKEBRIDGE_LOG_LEVEL") {
            self.telemetry.log_level = v;
        }
        Ok(())
    }
}

/// Discover config files in standard locations, in load order.
/// Only returns files that exist. A CLI-provided path replaces the local
/// override and short-circuits discovery below it.
fn discover_config_files(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/jukebridge/config.toml");
    if system.exists() {
        files.push(system);
    }

    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf())
    {
        let user = config_dir.join("jukebridge/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from("jukebridge.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
