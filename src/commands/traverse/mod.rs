//! `typegraph traverse` - walk the graph from a source node

mod human;
mod json;

use std::time::Instant;

use serde::Serialize;

use crate::cli::{OutputFormat, TraverseArgs};
use crate::commands::dispatch::CommandContext;
use crate::commands::scope::{type_label, ResolvedScope};
use typegraph_core::error::Result;
use typegraph_core::graph::algos::{Traversal, TraversalBfs, TraversalDfs};
use typegraph_core::graph::GraphProvider;
use typegraph_core::store::LoadedGraph;
use typegraph_core::trace_time;

/// A node produced by the walk
#[derive(Debug, Clone, Serialize)]
pub struct Visit {
    pub key: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub depth: u32,
}

/// Walk order and bound, echoed back in the output
pub struct WalkSummary<'s> {
    pub source: &'s str,
    pub order: &'static str,
    pub max_hops: u32,
}

pub fn execute(ctx: &CommandContext, args: &TraverseArgs) -> Result<()> {
    let start = Instant::now();
    let graph = ctx.load_graph(&args.graph)?;
    let source = graph.node(&args.from)?;
    let scope = ResolvedScope::resolve(&graph, &args.scope)?;
    let max_hops = args.max_hops.unwrap_or(ctx.config.traversal.max_hops);

    let visits = if args.dfs {
        let mut walk = TraversalDfs::new(&graph.store, source)?;
        scope.configure(&mut walk, max_hops)?;
        collect(&graph, &mut walk)?
    } else {
        let mut walk = TraversalBfs::new(&graph.store, source)?;
        scope.configure(&mut walk, max_hops)?;
        collect(&graph, &mut walk)?
    };
    trace_time!(start, "traverse", visited = visits.len());

    let summary = WalkSummary {
        source: &args.from,
        order: if args.dfs { "dfs" } else { "bfs" },
        max_hops,
    };
    match ctx.format() {
        OutputFormat::Json => json::output(&summary, &visits),
        OutputFormat::Human => {
            human::output(ctx.cli, &summary, &visits);
            Ok(())
        }
    }
}

fn collect<T: Traversal>(graph: &LoadedGraph, walk: &mut T) -> Result<Vec<Visit>> {
    walk.walk()
        .map(|step| {
            let (node, depth) = step?;
            Ok(Visit {
                key: graph.label(node),
                node_type: type_label(graph, graph.store.node_type(node)?),
                depth,
            })
        })
        .collect()
}
