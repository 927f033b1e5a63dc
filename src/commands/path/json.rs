use super::PathReport;
use typegraph_core::error::Result;

/// Output in JSON format
pub fn output(report: &PathReport) -> Result<()> {
    let output = serde_json::json!({
        "from": report.from,
        "to": report.to,
        "algorithm": report.algorithm,
        "found": report.cost.is_some(),
        "cost": report.cost,
        "nodes": report.nodes,
        "edges": report.edges,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
