//! Canned parser responses in the shapes the parser service is known to emit.

use serde_json::{json, Value};

/// A well-formed response with every field populated.
pub fn office_capture() -> Value {
    json!({
        "summary": {
            "capture_start": "2024-05-01T09:00:00Z",
            "capture_end": "2024-05-01T09:14:32Z",
            "packet_count": 12345,
            "total_bytes": 9876543,
            "unique_hosts": 42,
            "protocols": { "TCP": 9000, "UDP": 2000, "DNS": 1200, "ICMP": 145 },
            "top_talkers": [
                { "ip": "10.0.0.5", "bytes": 4200000, "packets": 3100 },
                { "host": "printer.local", "packets": 800 },
                { "ip": "10.0.0.9" }
            ],
            "alerts": [
                "High DNS volume relative to total traffic.",
                "Possible port scan from 10.0.0.9"
            ]
        },
        "flows": [
            { "src": "10.0.0.1:1", "dst": "8.8.8.8:53", "protocol": "UDP", "bytes": 40000 },
            { "source": "10.0.0.5:443", "destination": "93.184.216.34:51000", "proto": "TCP", "total_bytes": 1200000, "packets": 900 }
        ]
    })
}

/// Protocols as a list of records and `bytes` instead of `total_bytes`.
pub fn list_shaped_capture() -> Value {
    json!({
        "summary": {
            "packet_count": 10,
            "bytes": 2048,
            "protocols": [
                { "name": "TCP", "count": 7 },
                { "name": "ARP", "count": 3 }
            ]
        }
    })
}

/// Wrong types everywhere; must still normalize without panicking.
pub fn hostile_capture() -> Value {
    json!({
        "summary": {
            "capture_start": 17,
            "packet_count": "lots",
            "total_bytes": [1, 2],
            "protocols": "TCP",
            "top_talkers": { "ip": "10.0.0.1" },
            "alerts": [null, 42, { "message": "odd TTL values" }, "plain"]
        },
        "flows": "none"
    })
}

/// Raw pcap magic number; the fake parser does not look past the header.
pub const PCAP_BYTES: &[u8] = &[0xd4, 0xc3, 0xb2, 0xa1, 0x02, 0x00, 0x04, 0x00];
