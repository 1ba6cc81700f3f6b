//! Chart-ready data derived from a [`NormalizedSummary`].
//!
//! The dashboard and the plain-text renderer both draw from [`ChartData`], so
//! they agree on limits, ordering and number formatting. Lists are bounded
//! by the same limits as the prompt.

use crate::format::{format_bytes_f64, format_count_f64, format_duration, PLACEHOLDER};
use crate::normalizer::slice_list;
use crate::prompt::{ALERT_LIMIT, FLOW_LIMIT, PROTOCOL_LIMIT, TALKER_LIMIT};
use crate::types::{Metric, NormalizedSummary, Talker, UNKNOWN};
use serde::Serialize;

/// One bar: a label, its numeric height, and the text shown next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u64,
    pub display: String,
}

/// One row of the flows table, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowRow {
    pub src: String,
    pub dst: String,
    pub protocol: String,
    pub bytes: String,
    pub packets: String,
}

/// A headline figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

/// Everything the renderers draw, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub stats: Vec<StatCard>,
    pub protocols: Vec<ChartPoint>,
    pub talkers: Vec<ChartPoint>,
    pub flows: Vec<FlowRow>,
    pub alerts: Vec<String>,
}

impl ChartData {
    pub fn from_summary(summary: &NormalizedSummary) -> Self {
        Self {
            stats: stat_cards(summary),
            protocols: slice_list(&summary.protocols, PROTOCOL_LIMIT)
                .iter()
                .map(|p| ChartPoint {
                    label: p.name.clone(),
                    value: p.count.as_ref().map_or(0, Metric::as_u64_saturating),
                    display: count_text(p.count.as_ref()),
                })
                .collect(),
            talkers: slice_list(&summary.top_talkers, TALKER_LIMIT)
                .iter()
                .map(talker_point)
                .collect(),
            flows: slice_list(&summary.flows, FLOW_LIMIT)
                .iter()
                .map(|f| FlowRow {
                    src: f.src.clone(),
                    dst: f.dst.clone(),
                    protocol: f.protocol.clone(),
                    bytes: bytes_text(f.bytes.as_ref()),
                    packets: count_text(f.packets.as_ref()),
                })
                .collect(),
            alerts: slice_list(&summary.alerts, ALERT_LIMIT).to_vec(),
        }
    }

    /// Largest protocol count, for scaling bar charts.
    pub fn max_protocol_value(&self) -> u64 {
        self.protocols.iter().map(|p| p.value).max().unwrap_or(0)
    }

    pub fn max_talker_value(&self) -> u64 {
        self.talkers.iter().map(|t| t.value).max().unwrap_or(0)
    }
}

fn stat_cards(summary: &NormalizedSummary) -> Vec<StatCard> {
    let window = match (&summary.capture_start, &summary.capture_end) {
        (None, None) => PLACEHOLDER.to_string(),
        (start, end) => format!(
            "{} → {}",
            start.as_deref().unwrap_or(UNKNOWN),
            end.as_deref().unwrap_or(UNKNOWN)
        ),
    };
    vec![
        StatCard { label: "Packets", value: count_text(summary.packet_count.as_ref()) },
        StatCard { label: "Total bytes", value: bytes_text(summary.total_bytes.as_ref()) },
        StatCard { label: "Unique hosts", value: count_text(summary.unique_hosts.as_ref()) },
        StatCard {
            label: "Duration",
            value: summary
                .capture_duration()
                .map_or_else(|| PLACEHOLDER.to_string(), format_duration),
        },
        StatCard { label: "Capture window", value: window },
    ]
}

/// Talkers are charted by bytes; packet-only talkers are labelled as such.
fn talker_point(talker: &Talker) -> ChartPoint {
    let (value, display) = match (&talker.bytes, &talker.packets) {
        (Some(bytes), _) => (bytes.as_u64_saturating(), bytes_text(Some(bytes))),
        (None, Some(packets)) => (
            packets.as_u64_saturating(),
            format!("{} pkts", count_text(Some(packets))),
        ),
        (None, None) => (0, PLACEHOLDER.to_string()),
    };
    ChartPoint { label: talker.address.clone(), value, display }
}

fn count_text(metric: Option<&Metric>) -> String {
    metric.map_or_else(|| PLACEHOLDER.to_string(), |m| format_count_f64(m.as_f64()))
}

fn bytes_text(metric: Option<&Metric>) -> String {
    metric.map_or_else(|| PLACEHOLDER.to_string(), |m| format_bytes_f64(m.as_f64()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
