use super::ComponentsReport;
use typegraph_core::error::Result;

/// Output in JSON format
pub fn output(report: &ComponentsReport) -> Result<()> {
    let components: Vec<serde_json::Value> = report
        .components
        .iter()
        .map(|entry| {
            serde_json::json!({
                "id": entry.id,
                "size": entry.members.len(),
                "members": entry.members,
            })
        })
        .collect();

    let output = serde_json::json!({
        "kind": report.kind,
        "count": report.components.len(),
        "largest": report.largest,
        "materialized": report.materialized,
        "saved": report.saved,
        "components": components,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
