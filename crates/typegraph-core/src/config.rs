//! Algorithm configuration for typegraph
//!
//! Defaults for hop bounds, unweighted edge cost and output format, read from
//! `config.toml`. The default location is `~/.config/typegraph/config.toml`,
//! overridable with `TYPEGRAPH_CONFIG_DIR`.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::bail_invalid;
use crate::error::{GraphError, Result};

pub use types::{
    AlgorithmConfig, OutputConfig, OutputFormat, ShortestPathConfig, TraversalConfig,
    CONFIG_FORMAT_VERSION,
};

const CONFIG_DIR: &str = "typegraph";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "TYPEGRAPH_CONFIG_DIR";

impl AlgorithmConfig {
    /// Path of the user configuration file
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    GraphError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load the user configuration, falling back to defaults when absent
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GraphError::io_operation("read config", path.display(), e))?;
        let config: AlgorithmConfig = toml::from_str(&content)?;

        if config.version > CONFIG_FORMAT_VERSION {
            tracing::warn!(
                version = config.version,
                supported = CONFIG_FORMAT_VERSION,
                "config written by a newer typegraph"
            );
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GraphError::Other(format!("failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the algorithms would refuse anyway
    pub fn validate(&self) -> Result<()> {
        let cost = self.shortest_path.unweighted_edge_cost;
        if !cost.is_finite() || cost < 0.0 {
            bail_invalid!("shortest_path.unweighted_edge_cost", cost);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AlgorithmConfig::default();
        assert_eq!(config.version, CONFIG_FORMAT_VERSION);
        assert_eq!(config.traversal.max_hops, 0);
        assert_eq!(config.shortest_path.max_hops, 0);
        assert_eq!(config.shortest_path.unweighted_edge_cost, 1.0);
        assert_eq!(config.output.format, OutputFormat::Human);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AlgorithmConfig::default();
        config.traversal.max_hops = 4;
        config.shortest_path.unweighted_edge_cost = 2.5;
        config.output.format = OutputFormat::Json;
        config.save(&path).unwrap();

        let loaded = AlgorithmConfig::load(&path).unwrap();
        assert_eq!(loaded.traversal.max_hops, 4);
        assert_eq!(loaded.shortest_path.unweighted_edge_cost, 2.5);
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[traversal]\nmax_hops = 2\n").unwrap();

        let loaded = AlgorithmConfig::load(&path).unwrap();
        assert_eq!(loaded.traversal.max_hops, 2);
        assert_eq!(loaded.shortest_path.unweighted_edge_cost, 1.0);
        assert_eq!(loaded.version, CONFIG_FORMAT_VERSION);
    }

    #[test]
    fn test_negative_unweighted_cost_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[shortest_path]\nunweighted_edge_cost = -1.0\n").unwrap();

        let err = AlgorithmConfig::load(&path).unwrap_err();
        assert!(matches!(err, GraphError::InvalidValue { .. }));
    }

    #[test]
    fn test_malformed_toml_is_toml_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[traversal\nmax_hops = ").unwrap();

        let err = AlgorithmConfig::load(&path).unwrap_err();
        assert!(matches!(err, GraphError::Toml(_)));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("records".parse::<OutputFormat>().is_err());
    }
}
