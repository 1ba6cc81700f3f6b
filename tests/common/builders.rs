//! Test builders — fluent constructors for parser responses.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// ResponseBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for parser-service JSON.
///
/// # Example
///
/// ```rust
/// let raw = ResponseBuilder::new()
///     .packet_count(10)
///     .protocol("TCP", 7)
///     .alert("scan")
///     .build();
/// ```
#[derive(Default)]
pub struct ResponseBuilder {
    summary: Map<String, Value>,
    protocols: Map<String, Value>,
    talkers: Vec<Value>,
    alerts: Vec<Value>,
    flows: Vec<Value>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.summary.insert(key.to_string(), value.into());
        self
    }

    pub fn window(self, start: &str, end: &str) -> Self {
        self.field("capture_start", start).field("capture_end", end)
    }

    pub fn packet_count(self, n: u64) -> Self {
        self.field("packet_count", n)
    }

    pub fn total_bytes(self, n: u64) -> Self {
        self.field("total_bytes", n)
    }

    pub fn protocol(mut self, name: &str, count: u64) -> Self {
        self.protocols.insert(name.to_string(), json!(count));
        self
    }

    pub fn talker(mut self, ip: &str, bytes: u64) -> Self {
        self.talkers.push(json!({ "ip": ip, "bytes": bytes }));
        self
    }

    pub fn alert(mut self, alert: impl Into<Value>) -> Self {
        self.alerts.push(alert.into());
        self
    }

    /// `n` numbered alerts.
    pub fn alerts(self, n: usize) -> Self {
        (0..n).fold(self, |b, i| b.alert(format!("alert {i}")))
    }

    pub fn flow(mut self, src: &str, dst: &str, protocol: &str, bytes: u64) -> Self {
        self.flows
            .push(json!({ "src": src, "dst": dst, "protocol": protocol, "bytes": bytes }));
        self
    }

    pub fn build(self) -> Value {
        let mut summary = self.summary;
        if !self.protocols.is_empty() {
            summary.insert("protocols".into(), Value::Object(self.protocols));
        }
        if !self.talkers.is_empty() {
            summary.insert("top_talkers".into(), Value::Array(self.talkers));
        }
        if !self.alerts.is_empty() {
            summary.insert("alerts".into(), Value::Array(self.alerts));
        }
        let mut raw = json!({ "summary": summary });
        if !self.flows.is_empty() {
            raw["flows"] = Value::Array(self.flows);
        }
        raw
    }
}
