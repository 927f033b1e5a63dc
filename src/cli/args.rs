use std::path::PathBuf;

use clap::{Args, ValueEnum};
use typegraph_core::graph::Direction;

use super::parse::{parse_direction, parse_edge_type, parse_weight, EdgeTypeArg, WeightArg};

/// Node and edge types an algorithm may use, plus excluded nodes
#[derive(Args, Debug, Clone)]
pub struct ScopeArgs {
    /// Allowed node type (repeatable; all node types when omitted)
    #[arg(long = "node-type", short = 'n', action = clap::ArgAction::Append)]
    pub node_types: Vec<String>,

    /// Allowed edge type as NAME or NAME:DIRECTION (repeatable; all edge types when omitted)
    #[arg(long = "edge-type", short = 'e', value_parser = parse_edge_type, action = clap::ArgAction::Append)]
    pub edge_types: Vec<EdgeTypeArg>,

    /// Direction for edge types given without one: out, in, or both
    #[arg(long, short, value_parser = parse_direction, default_value = "out")]
    pub direction: Direction,

    /// Node key never visited (repeatable)
    #[arg(long = "exclude-node", short = 'x', action = clap::ArgAction::Append)]
    pub excluded_nodes: Vec<String>,
}

impl ScopeArgs {
    /// No type or node filter given
    pub fn is_empty(&self) -> bool {
        self.node_types.is_empty() && self.edge_types.is_empty() && self.excluded_nodes.is_empty()
    }
}

#[derive(Args, Debug, Clone)]
pub struct TraverseArgs {
    /// Graph document (JSON)
    pub graph: PathBuf,

    /// Key of the source node
    #[arg(long)]
    pub from: String,

    /// Walk depth-first instead of breadth-first
    #[arg(long)]
    pub dfs: bool,

    /// Maximum hops from the source (0 = unlimited; defaults to the configured bound)
    #[arg(long)]
    pub max_hops: Option<u32>,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ComponentsArgs {
    /// Graph document (JSON)
    pub graph: PathBuf,

    /// Strongly connected components (edge directions matter)
    #[arg(long)]
    pub strong: bool,

    /// Store each node's component id in a new integer node attribute and save the graph
    #[arg(long, value_name = "ATTRIBUTE")]
    pub materialize: Option<String>,

    /// Save the graph with the materialized attribute here instead of over GRAPH
    #[arg(long, value_name = "PATH", requires = "materialize")]
    pub output: Option<PathBuf>,

    /// Report the components stored in an earlier --materialize run
    #[arg(long, value_name = "ATTRIBUTE", conflicts_with_all = ["strong", "materialize"])]
    pub from_attribute: Option<String>,

    /// List the members of every component
    #[arg(long)]
    pub members: bool,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

/// Single-pair shortest path algorithm
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAlgorithm {
    /// Fewest hops
    Bfs,
    /// Least total weight
    Dijkstra,
}

#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Graph document (JSON)
    pub graph: PathBuf,

    /// Key of the source node
    #[arg(long)]
    pub from: String,

    /// Key of the destination node
    #[arg(long)]
    pub to: String,

    /// Algorithm (dijkstra when weights or an unweighted cost are given, bfs otherwise)
    #[arg(long, value_enum)]
    pub algorithm: Option<PathAlgorithm>,

    /// Weighted edge type as TYPE=ATTRIBUTE or TYPE=ATTRIBUTE:DIRECTION (repeatable)
    #[arg(long, short = 'w', value_parser = parse_weight, action = clap::ArgAction::Append)]
    pub weight: Vec<WeightArg>,

    /// Cost of edges without a weight (defaults to the configured cost)
    #[arg(long)]
    pub unweighted_cost: Option<f64>,

    /// Maximum hops from the source (0 = unlimited; defaults to the configured bound)
    #[arg(long)]
    pub max_hops: Option<u32>,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

impl PathArgs {
    /// Algorithm to run, inferred from the weighting flags when not given
    pub fn resolved_algorithm(&self) -> PathAlgorithm {
        match self.algorithm {
            Some(algorithm) => algorithm,
            None if !self.weight.is_empty() || self.unweighted_cost.is_some() => {
                PathAlgorithm::Dijkstra
            }
            None => PathAlgorithm::Bfs,
        }
    }
}
