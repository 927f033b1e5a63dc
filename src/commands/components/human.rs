use super::ComponentsReport;
use crate::cli::{Cli, ComponentsArgs};

/// Output in human-readable format
pub fn output(cli: &Cli, args: &ComponentsArgs, report: &ComponentsReport) {
    println!(
        "{} {} component(s)",
        report.components.len(),
        report.kind
    );
    if let Some(largest) = report.largest {
        let size = report
            .components
            .iter()
            .find(|entry| entry.id == largest)
            .map_or(0, |entry| entry.members.len());
        println!("largest: #{} ({} node(s))", largest, size);
    }

    if args.members {
        for entry in &report.components {
            println!("#{}: {}", entry.id, entry.members.join(", "));
        }
    }

    if let Some(name) = &report.materialized {
        if !cli.quiet {
            match &report.saved {
                Some(path) => println!("component ids stored in attribute '{}' of {}", name, path),
                None => println!("component ids read from attribute '{}'", name),
            }
        }
    }
}
