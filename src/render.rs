//! Plain-text rendering of an [`Analysis`] for `--output text`.

use pcap_agent_core::charts::ChartPoint;
use pcap_agent_services::Analysis;
use std::fmt::Write;

const NONE: &str = "  (none)";

pub fn text(analysis: &Analysis) -> String {
    let charts = &analysis.charts;
    let mut out = String::new();

    out.push_str("Capture summary\n");
    for card in &charts.stats {
        let _ = writeln!(out, "  {:<16}{}", card.label, card.value);
    }

    points(&mut out, "Protocols", &charts.protocols);
    points(&mut out, "Top talkers", &charts.talkers);

    header(&mut out, "Alerts");
    if charts.alerts.is_empty() {
        let _ = writeln!(out, "{NONE}");
    }
    for alert in &charts.alerts {
        let _ = writeln!(out, "  ! {alert}");
    }

    header(&mut out, "Flows");
    if charts.flows.is_empty() {
        let _ = writeln!(out, "{NONE}");
    }
    for f in &charts.flows {
        let _ = writeln!(
            out,
            "  {} -> {}  {}  {}  {} pkts",
            f.src, f.dst, f.protocol, f.bytes, f.packets
        );
    }

    if let Some(report) = &analysis.report {
        header(&mut out, "Report");
        out.push_str(report.trim_end());
        out.push('\n');
    }
    out
}

fn header(out: &mut String, title: &str) {
    let _ = write!(out, "\n{title}\n");
}

fn points(out: &mut String, title: &str, points: &[ChartPoint]) {
    header(out, title);
    if points.is_empty() {
        let _ = writeln!(out, "{NONE}");
        return;
    }
    let width = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
    for p in points {
        let _ = writeln!(out, "  {:<width$}  {}", p.label, p.display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_sections_in_order() {
        let analysis = Analysis::offline(json!({
            "summary": {
                "packet_count": 12345,
                "total_bytes": 9876543,
                "protocols": { "TCP": 10000, "UDP": 2345 },
                "top_talkers": [{ "ip": "10.0.0.5", "bytes": 2048 }],
                "alerts": ["Port scan from 10.0.0.9"]
            }
        }))
        .with_report("All quiet.\n");

        let out = text(&analysis);
        assert!(out.contains("  Packets         12,345\n"));
        assert!(out.contains("  Total bytes     9.4 MB\n"));
        assert!(out.contains("  TCP  10,000\n"));
        assert!(out.contains("  10.0.0.5  2.0 KB\n"));
        assert!(out.contains("  ! Port scan from 10.0.0.9\n"));
        assert!(out.ends_with("Report\nAll quiet.\n"));

        let order: Vec<usize> = ["Capture summary", "Protocols", "Top talkers", "Alerts", "Flows", "Report"]
            .iter()
            .map(|h| out.find(h).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_sections_say_none() {
        let out = text(&Analysis::offline(json!({})));
        assert_eq!(out.matches(NONE).count(), 4);
        assert!(!out.contains("Report"));
    }
}
