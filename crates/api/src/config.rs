//! Service configuration
//!
//! Built-in defaults, overlaid by an optional config file and then by
//! `DIAGNOSIS__*` environment variables (`__` separates sections, e.g.
//! `DIAGNOSIS__SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use inference_engine::ArtifactPaths;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "DIAGNOSIS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/diagnosis";
const ENV_PREFIX: &str = "DIAGNOSIS";

/// Top-level settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub artifacts: ArtifactSettings,
    pub logging: LoggingSettings,
    pub metrics: MetricsSettings,
}

/// Listener address
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the trained model lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Base directory for the three artifact files
    pub dir: PathBuf,
    pub model_file: String,
    pub scaler_file: String,
    pub metadata_file: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("model"),
            model_file: inference_engine::MODEL_FILE.to_string(),
            scaler_file: inference_engine::SCALER_FILE.to_string(),
            metadata_file: inference_engine::METADATA_FILE.to_string(),
        }
    }
}

impl ArtifactSettings {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.dir.join(&self.model_file),
            scaler: self.dir.join(&self.scaler_file),
            metadata: self.dir.join(&self.metadata_file),
        }
    }
}

/// Log output
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Maximum level: trace, debug, info, warn, error or off
    pub level: String,
    /// Append logs to this file as well as stdout; empty disables
    pub file: Option<PathBuf>,
    /// Emit stdout logs as JSON lines
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some(PathBuf::from("logs/api.log")),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Install the Prometheus recorder and serve `/metrics`
    pub enabled: bool,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Settings {
    /// Load from the file named by `DIAGNOSIS_CONFIG` (or the default
    /// location) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load from an explicit file path; a missing file is not an error
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.addr(), "0.0.0.0:5000");
        assert_eq!(settings.artifacts.paths(), ArtifactPaths::in_dir("model"));
        assert_eq!(settings.logging.level, "info");
        assert!(settings.metrics.enabled);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load_from("does/not/exist/diagnosis").unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.artifacts.dir, PathBuf::from("model"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnosis.toml");
        std::fs::write(
            &path,
            concat!(
                "[server]\nport = 8081\n\n",
                "[artifacts]\ndir = \"/srv/model\"\n\n",
                "[metrics]\nenabled = false\n",
            ),
        )
        .unwrap();

        let settings = Settings::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(
            settings.artifacts.paths().model,
            PathBuf::from("/srv/model").join(inference_engine::MODEL_FILE)
        );
        assert!(!settings.metrics.enabled);
    }
}
