//! The analysis pipeline: upload → normalize → prompt → report.
//!
//! ```text
//! capture file ──► ParserClient ──► raw JSON ──► normalize ──► build_prompt ──► LlmClient
//!                                                    │
//!                                                    └──► ChartData
//! ```
//!
//! The two network calls are the only awaits; everything between them is
//! the pure core. [`Analyzer::upload`] and [`Analyzer::write_report`] are
//! exposed separately so callers can show statistics before the (slow) LLM
//! call completes or when it fails.

use crate::error::ServiceError;
use crate::llm::LlmClient;
use crate::parser::ParserClient;
use pcap_agent_core::config::Config;
use pcap_agent_core::{build_prompt, normalize, ChartData, NormalizedSummary};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Parser response exactly as received.
    pub raw: Value,
    pub summary: NormalizedSummary,
    pub charts: ChartData,
    pub prompt: String,
    /// Model output; `None` until [`Analyzer::write_report`] succeeds or
    /// when the LLM step is disabled.
    pub report: Option<String>,
}

impl Analysis {
    /// Everything derivable from a parser response without any I/O.
    pub fn offline(raw: Value) -> Self {
        let summary = normalize(&raw);
        let charts = ChartData::from_summary(&summary);
        let prompt = build_prompt(&summary);
        Self { raw, summary, charts, prompt, report: None }
    }

    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = Some(report.into());
        self
    }
}

/// Runs captures through the parser and LLM services.
pub struct Analyzer {
    parser: ParserClient,
    llm: Option<LlmClient>,
}

impl Analyzer {
    /// Build both clients from configuration. The LLM client is skipped when
    /// `llm.enabled` is false.
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let llm = if config.llm.enabled {
            Some(LlmClient::new(&config.llm)?)
        } else {
            tracing::info!("LLM step disabled");
            None
        };
        Ok(Self { parser: ParserClient::new(&config.parser)?, llm })
    }

    pub fn parser(&self) -> &ParserClient {
        &self.parser
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Upload `path` and derive summary, charts and prompt.
    pub async fn upload(&self, path: &Path) -> Result<Analysis, ServiceError> {
        let raw = self.parser.parse_file(path).await?;
        let analysis = Analysis::offline(raw);
        tracing::info!(
            protocols = analysis.summary.protocols.len(),
            flows = analysis.summary.flows.len(),
            prompt_chars = analysis.prompt.len(),
            "capture summarised"
        );
        Ok(analysis)
    }

    /// Ask the LLM for a report on `analysis`. No-op when the LLM step is
    /// disabled.
    pub async fn write_report(&self, analysis: &mut Analysis) -> Result<(), ServiceError> {
        if let Some(llm) = &self.llm {
            analysis.report = Some(llm.complete(&analysis.prompt).await?);
        }
        Ok(())
    }

    /// Both steps in sequence.
    pub async fn analyze(&self, path: &Path) -> Result<Analysis, ServiceError> {
        let mut analysis = self.upload(path).await?;
        self.write_report(&mut analysis).await?;
        Ok(analysis)
    }
}
