//! Human-readable number formatting for tables, charts and stat cards.
//!
//! Presentation only: nothing here feeds the LLM prompt, which always carries
//! the raw numbers. Every formatter accepts whatever JSON the parser sent and
//! answers non-numeric input with [`PLACEHOLDER`].

use serde_json::Value;

/// Rendered in place of a value that is missing or not a number.
pub const PLACEHOLDER: &str = "-";

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Scale a byte count to B/KB/MB/GB/TB (1024 steps).
///
/// One decimal place when the scaled value is below 10 and a unit above
/// bytes applies, none otherwise: `2048` → `2.0 KB`, `20480` → `20 KB`,
/// `512` → `512 B`.
pub fn format_bytes(value: &Value) -> String {
    numeric(value).map_or_else(|| PLACEHOLDER.to_string(), format_bytes_f64)
}

pub fn format_bytes_f64(bytes: f64) -> String {
    if !bytes.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let mut scaled = bytes;
    let mut unit = 0;
    while scaled.abs() >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let decimals = if unit > 0 && scaled.abs() < 10.0 { 1 } else { 0 };
    format!("{:.*} {}", decimals, scaled, BYTE_UNITS[unit])
}

/// Packet/host counts with thousands separators: `12345` → `12,345`.
pub fn format_count(value: &Value) -> String {
    numeric(value).map_or_else(|| PLACEHOLDER.to_string(), format_count_f64)
}

pub fn format_count_f64(count: f64) -> String {
    if !count.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let rounded = count.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `1h 02m 03s`, `4m 05s`, or `12.345s` for sub-minute spans.
pub fn format_duration(delta: chrono::TimeDelta) -> String {
    let total_ms = delta.num_milliseconds().max(0);
    let secs = total_ms / 1000;
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{}.{:03}s", s, total_ms % 1000)
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
