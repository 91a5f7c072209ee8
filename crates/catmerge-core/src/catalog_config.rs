use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Weights for the row completeness score.
///
/// A row scores `category_weight` when it has a category, `image_weight`
/// when it has an image URL, plus one point per description character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub category_weight: u64,
    pub image_weight: u64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            category_weight: 2000,
            image_weight: 1000,
        }
    }
}

/// Contents of `config/catalog.yaml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub input_dirs: Vec<PathBuf>,
    pub output_path: PathBuf,
    pub auto_categorize: bool,
    pub score: ScoreWeights,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            input_dirs: vec![PathBuf::from("./data")],
            output_path: PathBuf::from("./data/merged_catalog.csv"),
            auto_categorize: false,
            score: ScoreWeights::default(),
        }
    }
}

impl CatalogConfig {
    /// Apply the environment overrides carried by `app`.
    #[must_use]
    pub fn with_env_overrides(mut self, app: &AppConfig) -> Self {
        if let Some(dirs) = &app.input_dirs {
            self.input_dirs.clone_from(dirs);
        }
        if let Some(output) = &app.output_path {
            self.output_path.clone_from(output);
        }
        self
    }

    /// Check the invariants the merge relies on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if there are no input directories,
    /// the output path is empty, or a score weight is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_dirs.is_empty() {
            return Err(ConfigError::Validation(
                "at least one input directory is required".to_string(),
            ));
        }

        if self.input_dirs.iter().any(|d| d.as_os_str().is_empty()) {
            return Err(ConfigError::Validation(
                "input directory paths must be non-empty".to_string(),
            ));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_path must be non-empty".to_string(),
            ));
        }

        if self.score.category_weight == 0 || self.score.image_weight == 0 {
            return Err(ConfigError::Validation(format!(
                "score weights must be positive (category_weight={}, image_weight={})",
                self.score.category_weight, self.score.image_weight
            )));
        }

        Ok(())
    }
}

/// Load and validate the catalog configuration from a YAML file.
///
/// A missing file is not an error: defaults are returned so the tool runs
/// with no setup at all.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_catalog_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
    if !path.exists() {
        return Ok(CatalogConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config = parse_catalog_config(&content)?;
    config.validate()?;
    Ok(config)
}

fn parse_catalog_config(content: &str) -> Result<CatalogConfig, ConfigError> {
    // An empty YAML document deserializes to unit, not to a defaulted struct.
    if content.trim().is_empty() {
        return Ok(CatalogConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}
