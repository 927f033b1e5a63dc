use super::PathReport;
use crate::cli::Cli;

/// Output in human-readable format
pub fn output(cli: &Cli, report: &PathReport) {
    let Some(cost) = report.cost else {
        println!("No path found from {} to {}", report.from, report.to);
        return;
    };

    println!("{}", report.nodes.join(" -> "));
    if !cli.quiet {
        for edge in &report.edges {
            println!("  {} --[{}]--> {}", edge.from, edge.edge_type, edge.to);
        }
        println!();
        println!(
            "cost {} over {} hop(s) ({})",
            cost,
            report.edges.len(),
            report.algorithm
        );
    }
}
