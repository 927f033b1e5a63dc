//! `typegraph path` - shortest path between two nodes

mod human;
mod json;

use std::time::Instant;

use serde::Serialize;

use crate::cli::args::PathAlgorithm;
use crate::cli::{OutputFormat, PathArgs};
use crate::commands::dispatch::CommandContext;
use crate::commands::scope::{edge_type, type_label, ResolvedScope};
use typegraph_core::bail_usage;
use typegraph_core::error::{GraphError, Result};
use typegraph_core::graph::algos::{
    HopBounded, ShortestPath, SinglePairShortestPath, SinglePairShortestPathBfs,
    SinglePairShortestPathDijkstra,
};
use typegraph_core::graph::GraphProvider;
use typegraph_core::store::LoadedGraph;
use typegraph_core::trace_time;

/// One edge of the path
#[derive(Debug, Clone, Serialize)]
pub struct PathEdge {
    pub id: u64,
    #[serde(rename = "type")]
    pub edge_type: String,
    pub from: String,
    pub to: String,
}

/// Outcome of a path search, with keys resolved for output
#[derive(Debug, Clone)]
pub struct PathReport {
    pub from: String,
    pub to: String,
    pub algorithm: &'static str,
    pub cost: Option<f64>,
    pub nodes: Vec<String>,
    pub edges: Vec<PathEdge>,
}

pub fn execute(ctx: &CommandContext, args: &PathArgs) -> Result<()> {
    let start = Instant::now();
    let algorithm = args.resolved_algorithm();
    if algorithm == PathAlgorithm::Bfs && (!args.weight.is_empty() || args.unweighted_cost.is_some())
    {
        bail_usage!("--weight and --unweighted-cost require --algorithm dijkstra");
    }

    let graph = ctx.load_graph(&args.graph)?;
    let source = graph.node(&args.from)?;
    let destination = graph.node(&args.to)?;
    let scope = ResolvedScope::resolve(&graph, &args.scope)?;
    let max_hops = args
        .max_hops
        .unwrap_or(ctx.config.shortest_path.max_hops);

    let report = match algorithm {
        PathAlgorithm::Bfs => {
            let mut search = SinglePairShortestPathBfs::new(&graph.store, source, destination)?;
            scope.configure(&mut search, max_hops)?;
            search.run()?;
            report(&graph, &search, "bfs")?
        }
        PathAlgorithm::Dijkstra => {
            let mut search =
                SinglePairShortestPathDijkstra::new(&graph.store, source, destination)?;
            configure_dijkstra(ctx, args, &graph, &scope, &mut search, max_hops)?;
            search.run()?;
            report(&graph, &search, "dijkstra")?
        }
    };
    trace_time!(start, "path", found = report.cost.is_some());

    match ctx.format() {
        OutputFormat::Json => json::output(&report),
        OutputFormat::Human => {
            human::output(ctx.cli, &report);
            Ok(())
        }
    }
}

/// Scope, weights and edge cost for a Dijkstra search
///
/// With weights but no `--edge-type`, only the weighted edge types are used.
fn configure_dijkstra<'a>(
    ctx: &CommandContext,
    args: &PathArgs,
    graph: &LoadedGraph,
    scope: &'a ResolvedScope,
    search: &mut SinglePairShortestPathDijkstra<'a>,
    max_hops: u32,
) -> Result<()> {
    scope.apply_nodes(search)?;
    if scope.edge_types.is_some() || args.weight.is_empty() {
        scope.apply_edges(search)?;
    }
    for weight in &args.weight {
        let t = edge_type(graph, &weight.edge_type.name)?;
        let attr = graph
            .store
            .find_attribute(&weight.attribute)
            .ok_or_else(|| GraphError::AttributeNotFound {
                name: weight.attribute.clone(),
            })?;
        let direction = weight.edge_type.direction.unwrap_or(scope.direction);
        search.add_weighted_edge_type(t, direction, attr)?;
    }
    search.set_unweighted_edge_cost(
        args.unweighted_cost
            .unwrap_or(ctx.config.shortest_path.unweighted_edge_cost),
    )?;
    search.set_maximum_hops(max_hops)
}

fn report<P: SinglePairShortestPath>(
    graph: &LoadedGraph,
    search: &P,
    algorithm: &'static str,
) -> Result<PathReport> {
    let nodes = search.path_as_nodes()?;
    let edges = search
        .path_as_edges()?
        .into_iter()
        .zip(nodes.windows(2))
        .map(|(edge, pair)| {
            Ok(PathEdge {
                id: edge.0,
                edge_type: type_label(graph, graph.store.edge_type(edge)?),
                from: graph.label(pair[0]),
                to: graph.label(pair[1]),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PathReport {
        from: graph.label(search.source()),
        to: graph.label(search.destination()),
        algorithm,
        cost: search.cost()?,
        nodes: nodes.into_iter().map(|node| graph.label(node)).collect(),
        edges,
    })
}
