use super::{Visit, WalkSummary};
use typegraph_core::error::Result;

/// Output in JSON format
pub fn output(summary: &WalkSummary<'_>, visits: &[Visit]) -> Result<()> {
    let output = serde_json::json!({
        "source": summary.source,
        "order": summary.order,
        "max_hops": summary.max_hops,
        "count": visits.len(),
        "nodes": visits,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
