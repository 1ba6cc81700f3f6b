//! Normalizer — decodes the parser service's JSON into a [`NormalizedSummary`].
//!
//! The parser's response shape is best effort, so decoding is total: every
//! field has a named fallback and a default, and no input can make
//! [`normalize`] fail or panic.
//!
//! # Field rules
//!
//! | Target | Source keys (first usable wins) | Default |
//! |--------|---------------------------------|---------|
//! | `capture_start` / `capture_end` | same name, non-empty | absent |
//! | `packet_count` | `packet_count` | absent |
//! | `total_bytes` | `total_bytes`, `bytes` | absent |
//! | talker address | `ip`, `host` | `unknown` |
//! | talker volume | `bytes`, `packets` | absent |
//! | flow endpoints | `src`/`source`, `dst`/`destination` | `unknown` |
//! | flow protocol | `protocol`, `proto` | `unknown` |
//! | flow bytes | `bytes`, `total_bytes` | absent |
//! | protocol name / count | `name` / `count` | `unknown` / absent |
//!
//! Protocol list elements are never dropped, but their counts go through
//! the same numeric rule as every other metric: a count such as `"many"` is
//! absent and renders as `n/a`, it is not carried through as text.

use crate::types::{Flow, Metric, NormalizedSummary, ProtocolCount, Talker, UNKNOWN};
use serde_json::Value;

static NULL: Value = Value::Null;

/// Decode a raw parser response. Never fails.
pub fn normalize(raw: &Value) -> NormalizedSummary {
    let summary = raw.get("summary").unwrap_or(&NULL);

    let normalized = NormalizedSummary {
        capture_start: first_text(summary, &["capture_start"]),
        capture_end: first_text(summary, &["capture_end"]),
        packet_count: first_metric(summary, &["packet_count"]),
        total_bytes: first_metric(summary, &["total_bytes", "bytes"]),
        unique_hosts: first_metric(summary, &["unique_hosts"]),
        protocols: extract_protocols(summary),
        top_talkers: as_list(summary.get("top_talkers"))
            .iter()
            .map(decode_talker)
            .collect(),
        alerts: as_list(summary.get("alerts"))
            .iter()
            .filter_map(decode_alert)
            .collect(),
        flows: as_list(raw.get("flows")).iter().map(decode_flow).collect(),
    };

    tracing::debug!(
        protocols = normalized.protocols.len(),
        talkers = normalized.top_talkers.len(),
        alerts = normalized.alerts.len(),
        flows = normalized.flows.len(),
        "normalized parser response"
    );

    normalized
}

/// Extract the protocol distribution from a `summary` object.
///
/// Accepts either the list shape (`[{"name": "TCP", "count": 9000}]`), kept
/// element for element, or the map shape (`{"TCP": 9000}`), converted in the
/// map's own order. Anything else yields an empty list.
pub fn extract_protocols(summary: &Value) -> Vec<ProtocolCount> {
    match summary.get("protocols") {
        Some(Value::Array(items)) => items.iter().map(decode_protocol).collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, count)| ProtocolCount {
                name: name.clone(),
                count: Metric::from_value(count),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// The first `limit` items of `items`.
pub fn slice_list<T>(items: &[T], limit: usize) -> &[T] {
    &items[..items.len().min(limit)]
}

/// The first `limit` elements of a JSON array; empty for anything that is not
/// an array.
pub fn slice_json(value: &Value, limit: usize) -> &[Value] {
    slice_list(as_list(Some(value)), limit)
}

// ---------------------------------------------------------------------------
// Record decoders
// ---------------------------------------------------------------------------

fn decode_protocol(item: &Value) -> ProtocolCount {
    ProtocolCount {
        name: first_text(item, &["name"]).unwrap_or_else(|| UNKNOWN.to_string()),
        count: first_metric(item, &["count"]),
    }
}

fn decode_talker(item: &Value) -> Talker {
    Talker {
        address: first_text(item, &["ip", "host"]).unwrap_or_else(|| UNKNOWN.to_string()),
        bytes: first_metric(item, &["bytes"]),
        packets: first_metric(item, &["packets"]),
    }
}

fn decode_flow(item: &Value) -> Flow {
    let text = |keys: &[&str]| first_text(item, keys).unwrap_or_else(|| UNKNOWN.to_string());
    Flow {
        src: text(&["src", "source"]),
        dst: text(&["dst", "destination"]),
        protocol: text(&["protocol", "proto"]),
        bytes: first_metric(item, &["bytes", "total_bytes"]),
        packets: first_metric(item, &["packets"]),
    }
}

fn decode_alert(item: &Value) -> Option<String> {
    match item {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(msg)) => Some(msg.clone()),
            _ => Some(item.to_string()),
        },
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Field probes
// ---------------------------------------------------------------------------

fn as_list(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Strings as-is, numbers and booleans as their JSON text.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        _ => None,
    }
}

/// First key holding a non-empty scalar.
fn first_text(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| scalar_text(item.get(*key)))
        .find(|text| !text.is_empty())
}

/// First key holding a number (or numeric string).
fn first_metric(item: &Value, keys: &[&str]) -> Option<Metric> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .find_map(Metric::from_value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
