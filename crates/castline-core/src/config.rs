use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CastlineError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub sources: SourcesConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

/// Locations of the two input catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub dialogue: PathBuf,
    pub cast: PathBuf,
}

/// Where the resolved dataset is cached and exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Read instead of recomputing when the file exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<PathBuf>,
    /// Written after every run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<PathBuf>,
}

impl PipelineConfig {
    /// Load config: user file (if exists), otherwise built-in defaults.
    pub fn load() -> Result<Self, CastlineError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, CastlineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CastlineError::Configuration(format!("{}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| CastlineError::Configuration(format!("{}: {e}", path.display())))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), CastlineError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| CastlineError::Configuration(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Reject configurations that cannot run. Fails when the cache and
    /// export paths are the same file.
    pub fn validate(&self) -> Result<(), CastlineError> {
        if let (Some(cache), Some(export)) = (&self.dataset.cache, &self.dataset.export) {
            if cache == export {
                return Err(CastlineError::Configuration(format!(
                    "cache path cannot be the same as export path: {}",
                    cache.display()
                )));
            }
        }
        Ok(())
    }

    /// Return a copy with every relative path joined onto `base`.
    pub fn resolved_against(&self, base: &Path) -> Self {
        let join = |p: &PathBuf| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.clone()
            }
        };
        Self {
            sources: SourcesConfig {
                dialogue: join(&self.sources.dialogue),
                cast: join(&self.sources.cast),
            },
            dataset: DatasetConfig {
                cache: self.dataset.cache.as_ref().map(join),
                export: self.dataset.export.as_ref().map(join),
            },
        }
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory relative paths are resolved against.
    pub fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "castline")
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
