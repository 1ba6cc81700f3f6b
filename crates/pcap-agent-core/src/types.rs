//! Core types shared by the normalizer, the prompt builder and the renderers.
//!
//! Every type here is produced by [`crate::normalizer::normalize`]. String
//! fields of list records are defaulted to `unknown` while decoding; numeric
//! fields stay optional so charts can tell "zero" from "missing".

use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// Placeholder for a missing textual field.
pub const UNKNOWN: &str = "unknown";
/// Placeholder for a missing numeric field in list records.
pub const NOT_AVAILABLE: &str = "n/a";

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// A numeric value taken from the parser response.
///
/// Keeps the original JSON number so integers stay exact, and renders whole
/// floats without a trailing `.0` (`9876543.0` prints as `9876543`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metric(Number);

impl Metric {
    /// Decode a metric from a JSON number or a numeric string.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.clone())),
            Value::String(s) => s.trim().parse::<Number>().ok().map(Self),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }

    /// Value clamped into `u64`, for bar charts. Negative values become 0.
    pub fn as_u64_saturating(&self) -> u64 {
        if let Some(u) = self.0.as_u64() {
            return u;
        }
        let f = self.as_f64();
        if f.is_finite() && f > 0.0 {
            f.round() as u64
        } else {
            0
        }
    }
}

impl From<u64> for Metric {
    fn from(n: u64) -> Self {
        Self(Number::from(n))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(u) = self.0.as_u64() {
            write!(f, "{u}")
        } else if let Some(i) = self.0.as_i64() {
            write!(f, "{i}")
        } else {
            // f64's Display already drops the fractional part of whole numbers.
            write!(f, "{}", self.as_f64())
        }
    }
}

/// Render an optional metric, falling back to `placeholder`.
pub fn metric_or(metric: Option<&Metric>, placeholder: &str) -> String {
    metric.map_or_else(|| placeholder.to_string(), Metric::to_string)
}

// ---------------------------------------------------------------------------
// List records
// ---------------------------------------------------------------------------

/// One protocol and the number of packets that carried it.
///
/// Serializes back to `{ "name", "count" }`, the parser's own shape, so
/// feeding a serialized list through the normalizer again is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolCount {
    pub name: String,
    pub count: Option<Metric>,
}

/// A host ranked by the traffic it sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Talker {
    /// `ip`, else `host`, else `unknown`. Serialized as `ip`.
    #[serde(rename = "ip")]
    pub address: String,
    pub bytes: Option<Metric>,
    pub packets: Option<Metric>,
}

impl Talker {
    /// Bytes when the parser reported them, packets otherwise.
    pub fn volume(&self) -> Option<&Metric> {
        self.bytes.as_ref().or(self.packets.as_ref())
    }
}

/// Traffic between one source and one destination endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flow {
    /// `src`, else `source`.
    pub src: String,
    /// `dst`, else `destination`.
    pub dst: String,
    /// `protocol`, else `proto`.
    pub protocol: String,
    /// `bytes`, else `total_bytes`.
    pub bytes: Option<Metric>,
    pub packets: Option<Metric>,
}

// ---------------------------------------------------------------------------
// NormalizedSummary
// ---------------------------------------------------------------------------

/// Best-effort typed view of a parser response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedSummary {
    pub capture_start: Option<String>,
    pub capture_end: Option<String>,
    pub packet_count: Option<Metric>,
    /// `total_bytes`, falling back to `bytes`.
    pub total_bytes: Option<Metric>,
    pub unique_hosts: Option<Metric>,
    pub protocols: Vec<ProtocolCount>,
    pub top_talkers: Vec<Talker>,
    pub alerts: Vec<String>,
    pub flows: Vec<Flow>,
}

impl NormalizedSummary {
    /// Time between the first and last packet, when both timestamps are
    /// RFC 3339 and in order.
    pub fn capture_duration(&self) -> Option<chrono::TimeDelta> {
        let start = chrono::DateTime::parse_from_rfc3339(self.capture_start.as_deref()?).ok()?;
        let end = chrono::DateTime::parse_from_rfc3339(self.capture_end.as_deref()?).ok()?;
        let delta = end.signed_duration_since(start);
        (delta >= chrono::TimeDelta::zero()).then_some(delta)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
