//! Prompt builder — turns a [`NormalizedSummary`] into the text sent to the LLM.
//!
//! The output is a pure function of the summary: fixed section order, fixed
//! per-section limits, no timestamps. Section headers are always emitted,
//! even when the section has no lines, so the receiving model always sees
//! the same skeleton.

use crate::normalizer::{normalize, slice_list};
use crate::types::{metric_or, NormalizedSummary, NOT_AVAILABLE, UNKNOWN};
use serde_json::Value;

/// System-role message sent alongside every prompt.
pub const SYSTEM_MESSAGE: &str =
    "You are a senior network security analyst. Answer with a clear, well-structured report.";

pub const PROTOCOL_LIMIT: usize = 10;
pub const TALKER_LIMIT: usize = 10;
pub const ALERT_LIMIT: usize = 12;
pub const FLOW_LIMIT: usize = 12;

const FRAMING: &str = "You are a network traffic analyst. Provide a concise, actionable report based on this PCAP analysis.";

const INSTRUCTIONS: [&str; 4] = [
    "Respond with:",
    "1) An executive summary of 3-5 bullets.",
    "2) Key risks or anomalies.",
    "3) Recommended next steps, phrased as capture filters or validation checks.",
];

/// Build the prompt for an already-normalized summary.
pub fn build_prompt(summary: &NormalizedSummary) -> String {
    let mut lines: Vec<String> = vec![FRAMING.to_string()];

    section(&mut lines, "Summary:");
    lines.push(format!(
        "- Capture start: {}",
        summary.capture_start.as_deref().unwrap_or(UNKNOWN)
    ));
    lines.push(format!(
        "- Capture end: {}",
        summary.capture_end.as_deref().unwrap_or(UNKNOWN)
    ));
    lines.push(format!("- Packet count: {}", metric_or(summary.packet_count.as_ref(), UNKNOWN)));
    lines.push(format!("- Total bytes: {}", metric_or(summary.total_bytes.as_ref(), UNKNOWN)));

    section(&mut lines, "Protocols:");
    lines.extend(
        slice_list(&summary.protocols, PROTOCOL_LIMIT)
            .iter()
            .map(|p| format!("- {}: {}", p.name, metric_or(p.count.as_ref(), NOT_AVAILABLE))),
    );

    section(&mut lines, "Top talkers:");
    lines.extend(
        slice_list(&summary.top_talkers, TALKER_LIMIT)
            .iter()
            .map(|t| format!("- {} ({})", t.address, metric_or(t.volume(), NOT_AVAILABLE))),
    );

    section(&mut lines, "Alerts / anomalies:");
    lines.extend(
        slice_list(&summary.alerts, ALERT_LIMIT)
            .iter()
            .map(|alert| format!("- {alert}")),
    );

    section(&mut lines, "Notable flows:");
    lines.extend(slice_list(&summary.flows, FLOW_LIMIT).iter().map(|f| {
        format!(
            "- {} -> {} ({}, {})",
            f.src,
            f.dst,
            f.protocol,
            metric_or(f.bytes.as_ref(), NOT_AVAILABLE)
        )
    }));

    lines.push(String::new());
    lines.extend(INSTRUCTIONS.iter().map(|line| line.to_string()));

    lines.join("\n")
}

/// Build the prompt straight from a raw parser response.
pub fn build_prompt_from_value(raw: &Value) -> String {
    build_prompt(&normalize(raw))
}

fn section(lines: &mut Vec<String>, header: &str) {
    lines.push(String::new());
    lines.push(header.to_string());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
