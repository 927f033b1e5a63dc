//! `typegraph components` - weakly or strongly connected components

mod human;
mod json;

use std::time::Instant;

use crate::cli::{ComponentsArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use crate::commands::scope::ResolvedScope;
use typegraph_core::bail_usage;
use typegraph_core::error::Result;
use typegraph_core::graph::algos::{
    ConnectedComponents, Connectivity, StrongConnectivityGabow, WeakConnectivityDfs,
};
use typegraph_core::store::LoadedGraph;
use typegraph_core::trace_time;

/// A component with its members resolved to node keys
pub struct ComponentEntry {
    pub id: u64,
    pub members: Vec<String>,
}

/// Everything the output formats report
pub struct ComponentsReport {
    pub kind: &'static str,
    pub components: Vec<ComponentEntry>,
    pub largest: Option<u64>,
    pub materialized: Option<String>,
    /// Where the graph was written after materializing
    pub saved: Option<String>,
}

pub fn execute(ctx: &CommandContext, args: &ComponentsArgs) -> Result<()> {
    let start = Instant::now();
    let (mut document, mut graph) = ctx.load_document(&args.graph)?;

    let (kind, components) = if let Some(name) = &args.from_attribute {
        if !args.scope.is_empty() {
            bail_usage!("--from-attribute takes no --node-type, --edge-type or --exclude-node");
        }
        let components = ConnectedComponents::from_materialized(&graph.store, name)?;
        ("stored", components)
    } else {
        let scope = ResolvedScope::resolve(&graph, &args.scope)?;
        let materialize = args.materialize.as_deref();
        if args.strong {
            ("strong", strong(&mut graph, &scope, materialize)?)
        } else {
            ("weak", weak(&mut graph, &scope, materialize)?)
        }
    };
    trace_time!(start, "components", kind = kind, count = components.count());

    let saved = match &args.materialize {
        Some(name) => {
            let path = args.output.as_deref().unwrap_or(args.graph.as_path());
            document.capture_node_attribute(&graph, name)?;
            document.save(path)?;
            tracing::debug!(attribute = %name, path = %path.display(), "graph_saved");
            Some(path.display().to_string())
        }
        None => None,
    };

    let report = ComponentsReport {
        kind,
        components: entries(&graph, &components),
        largest: components.largest().map(|(id, _)| id),
        materialized: components.materialized_attribute().map(str::to_string),
        saved,
    };
    match ctx.format() {
        OutputFormat::Json => json::output(&report),
        OutputFormat::Human => {
            human::output(ctx.cli, args, &report);
            Ok(())
        }
    }
}

fn weak(
    graph: &mut LoadedGraph,
    scope: &ResolvedScope,
    materialize: Option<&str>,
) -> Result<ConnectedComponents> {
    let mut algorithm = WeakConnectivityDfs::new(&mut graph.store);
    scope.apply_nodes(&mut algorithm)?;
    // weak connectivity ignores edge directions
    match &scope.edge_types {
        None => algorithm.add_all_edge_types()?,
        Some(types) => {
            for (t, _) in types {
                algorithm.add_edge_type(*t)?;
            }
        }
    }
    if let Some(name) = materialize {
        algorithm.set_materialized_attribute(name)?;
    }
    algorithm.run()?;
    Ok(algorithm.connected_components()?.clone())
}

fn strong(
    graph: &mut LoadedGraph,
    scope: &ResolvedScope,
    materialize: Option<&str>,
) -> Result<ConnectedComponents> {
    let mut algorithm = StrongConnectivityGabow::new(&mut graph.store);
    scope.apply_nodes(&mut algorithm)?;
    scope.apply_edges(&mut algorithm)?;
    if let Some(name) = materialize {
        algorithm.set_materialized_attribute(name)?;
    }
    algorithm.run()?;
    Ok(algorithm.connected_components()?.clone())
}

fn entries(graph: &LoadedGraph, components: &ConnectedComponents) -> Vec<ComponentEntry> {
    components
        .iter()
        .map(|(id, members)| ComponentEntry {
            id,
            members: members.iter().map(|node| graph.label(node)).collect(),
        })
        .collect()
}
