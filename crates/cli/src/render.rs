//! Plain-text and JSON rendering of a pipeline outcome.
//!
//! Rendering is presentation only: the core imposes no format, this module
//! just lays the report out for a terminal.

use std::io::Write;

use restock_pipeline::PipelineOutcome;

const RULE_WIDTH: usize = 92;

/// Aligned text tables plus the insight list.
pub fn text(outcome: &PipelineOutcome, mut out: impl Write) -> std::io::Result<()> {
    let report = &outcome.report;

    writeln!(out, "Order recommendations")?;
    writeln!(out, "{:-<RULE_WIDTH$}", "")?;
    writeln!(
        out,
        "{:<14} {:>12} {:>12} {:>12} {:>10} {:>10} {:>12}",
        "sku", "mean demand", "order qty", "purchasing", "holding", "shortage", "total cost"
    )?;
    for row in &report.per_item {
        writeln!(
            out,
            "{:<14} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>10.2} {:>12.2}",
            row.sku.as_str(),
            row.mean_demand,
            row.order_quantity,
            row.purchasing_cost,
            row.holding_cost,
            row.shortage_cost,
            row.total_cost
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Metrics")?;
    writeln!(out, "{:-<RULE_WIDTH$}", "")?;
    for (name, value) in &report.metrics {
        writeln!(out, "{name:<26} {value:>14.2}")?;
    }

    writeln!(out)?;
    writeln!(out, "Insights")?;
    writeln!(out, "{:-<RULE_WIDTH$}", "")?;
    for message in &report.messages {
        writeln!(out, "- {message}")?;
    }
    Ok(())
}

/// The report as pretty-printed JSON.
pub fn json(outcome: &PipelineOutcome, mut out: impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, &outcome.report)?;
    writeln!(out)?;
    Ok(())
}
