//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Algorithm configuration, stored as `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    /// Format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Traversal defaults
    #[serde(default)]
    pub traversal: TraversalConfig,

    /// Shortest path defaults
    #[serde(default)]
    pub shortest_path: ShortestPathConfig,

    /// Output defaults
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            traversal: TraversalConfig::default(),
            shortest_path: ShortestPathConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Defaults for BFS/DFS traversals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Maximum hops (0 = unlimited)
    #[serde(default)]
    pub max_hops: u32,
}

/// Defaults for single-pair shortest path algorithms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortestPathConfig {
    /// Maximum hops (0 = unlimited)
    #[serde(default)]
    pub max_hops: u32,

    /// Cost of edges whose type has no weight attribute (default 1.0)
    #[serde(default = "default_unweighted_edge_cost")]
    pub unweighted_edge_cost: f64,
}

impl Default for ShortestPathConfig {
    fn default() -> Self {
        Self {
            max_hops: 0,
            unweighted_edge_cost: default_unweighted_edge_cost(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(GraphError::invalid_value("output format", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

fn default_unweighted_edge_cost() -> f64 {
    1.0
}
