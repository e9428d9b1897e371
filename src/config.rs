use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::features::ColumnPolicy;

/// Optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "grade_predictor.toml";
/// Environment override prefix, e.g. `GRADE_PREDICTOR__ARTIFACTS__DIR=models`.
pub const ENV_PREFIX: &str = "GRADE_PREDICTOR";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub artifacts: ArtifactsConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory searched for artifact files.
    pub dir: PathBuf,
    /// Refuse to start when any present artifact fails to load.
    pub strict_load: bool,
    /// Reject row columns that the feature order (`features.json` or the
    /// pipeline's own) does not name.
    pub strict_columns: bool,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            strict_load: false,
            strict_columns: false,
        }
    }
}

impl ArtifactsConfig {
    pub fn column_policy(&self) -> ColumnPolicy {
        if self.strict_columns {
            ColumnPolicy::Strict
        } else {
            ColumnPolicy::Lenient
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 720.0,
        }
    }
}

impl AppConfig {
    /// Defaults, then [`CONFIG_FILE`] if present, then the environment.
    pub fn load() -> Result<Self> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);
        Self::load_from(CONFIG_FILE, env)
    }

    fn load_from(file: &str, env: Environment) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::new(file, FileFormat::Toml).required(false))
            .add_source(env)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
