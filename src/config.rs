use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::workflow::PhaseDurations;

/// Main configuration structure for Cliniio
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliniioConfig {
    /// Logging settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Where batch and session records are kept
    #[serde(default)]
    pub storage: StorageConfig,
    /// Sterilization workflow settings
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON lines instead of human readable output
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory for the JSON record store
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".cliniio"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Expected minutes per phase
    #[serde(default)]
    pub phase_durations: PhaseDurations,
}

impl CliniioConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (cliniio.toml, or `path` when given)
    /// 3. Environment variables (prefixed with CLINIIO_, `__` between sections)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&CliniioConfig::default())?);

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path));
            }
            None => {
                if Path::new("cliniio.toml").exists() {
                    builder = builder.add_source(File::with_name("cliniio"));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CLINIIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists. Returns whether one was loaded, since
    /// this runs before logging is initialized.
    pub fn load_env_file() -> Result<bool> {
        if !Path::new(".env").exists() {
            return Ok(false);
        }
        dotenvy::dotenv()?;
        Ok(true)
    }
}
