//! pcap-agent — packet capture in, traffic report out.
//!
//! The binary wires three layers together; this crate exposes the CLI surface
//! and the plain-text renderer so integration tests can drive them directly.
//!
//! # Architecture
//!
//! ```text
//! capture ──► parser service ──► normalize ──► prompt ──► LLM service
//!                                    │                        │
//!                                    └──► charts ──► text / json / TUI
//! ```
//!
//! Pure logic lives in `pcap-agent-core`, network clients in
//! `pcap-agent-services`, and the dashboard in `pcap-agent-tui`.

pub mod cli;
pub mod render;
