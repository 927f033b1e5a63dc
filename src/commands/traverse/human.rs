use super::{Visit, WalkSummary};
use crate::cli::Cli;

/// Output in human-readable format, indented by depth
pub fn output(cli: &Cli, summary: &WalkSummary<'_>, visits: &[Visit]) {
    for visit in visits {
        println!(
            "{}{} ({})",
            "  ".repeat(visit.depth as usize),
            visit.key,
            visit.node_type
        );
    }

    if !cli.quiet {
        let bound = match summary.max_hops {
            0 => String::new(),
            hops => format!(" within {} hops", hops),
        };
        println!();
        println!(
            "{} node(s) reached from {} ({}{})",
            visits.len(),
            summary.source,
            summary.order,
            bound
        );
    }
}
