//! pcap-agent-core — response normalization and prompt construction.
//!
//! Everything in this crate is synchronous and free of I/O. The parser
//! service's JSON goes in, and a typed [`NormalizedSummary`], the LLM prompt
//! and chart-ready data come out.
//!
//! # Pipeline
//!
//! ```text
//! raw JSON ──► normalizer ──► NormalizedSummary ──► prompt ──► LLM service
//!                                    │
//!                                    └──► charts ──► dashboard / text output
//! ```
//!
//! Nothing here ever fails on malformed input. Missing or mistyped fields
//! degrade to `unknown`, `n/a`, `-` or an empty list.

pub mod charts;
pub mod config;
pub mod format;
pub mod normalizer;
pub mod prompt;
pub mod types;

pub use charts::ChartData;
pub use normalizer::{extract_protocols, normalize, slice_json, slice_list};
pub use prompt::{build_prompt, build_prompt_from_value, SYSTEM_MESSAGE};
pub use types::{Flow, Metric, NormalizedSummary, ProtocolCount, Talker};
