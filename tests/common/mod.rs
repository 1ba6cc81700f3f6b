//! Shared test utilities for pcap-agent integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. The fake services bind to 127.0.0.1 on a random port so
//! harnesses can run in parallel.

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod builders;
pub mod fake_llm_api;
pub mod fake_parser_api;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
