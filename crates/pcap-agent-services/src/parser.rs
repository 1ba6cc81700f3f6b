//! Parser service client — uploads a capture and returns its JSON summary.
//!
//! The service takes a multipart upload with the file under the `pcap` field
//! and answers with `{ "summary": {…}, "flows": […] }`. The body is returned
//! untouched; shaping it is the normalizer's job.

use crate::error::{Service, ServiceError};
use crate::http::{build_client, parse_url, read_json};
use pcap_agent_core::config::ParserConfig;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;

/// Multipart field name the parser service reads the capture from.
pub const FORM_FIELD: &str = "pcap";

const PCAP_MIME: &str = "application/vnd.tcpdump.pcap";
const FALLBACK_FILE_NAME: &str = "capture.pcap";

pub struct ParserClient {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl ParserClient {
    pub fn new(config: &ParserConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            client: build_client(Service::Parser, config.timeout_secs)?,
            url: parse_url(Service::Parser, &config.url)?,
        })
    }

    /// Upload endpoint in use.
    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Read a capture from disk and upload it.
    pub async fn parse_file(&self, path: &Path) -> Result<Value, ServiceError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ServiceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
        self.parse_bytes(file_name, bytes).await
    }

    /// Upload an in-memory capture.
    pub async fn parse_bytes(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Value, ServiceError> {
        let file_name = file_name.into();
        tracing::info!(file = %file_name, size = bytes.len(), url = %self.url, "uploading capture");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(PCAP_MIME)
            .map_err(ServiceError::http(Service::Parser))?;
        let form = Form::new().part(FORM_FIELD, part);

        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(ServiceError::http(Service::Parser))?;

        let body = read_json(Service::Parser, response).await?;
        tracing::debug!("parser response received");
        Ok(body)
    }

    /// Probe `GET /health` on the parser's origin. `Ok(false)` means the
    /// service answered but did not report `{"status": "ok"}`.
    pub async fn health(&self) -> Result<bool, ServiceError> {
        let url = self.url.join("/health").map_err(|e| ServiceError::InvalidUrl {
            service: Service::Parser,
            url: self.url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ServiceError::http(Service::Parser))?;

        if !response.status().is_success() {
            return Ok(false);
        }
        let body = read_json(Service::Parser, response).await?;
        Ok(body.get("status").and_then(Value::as_str) == Some("ok"))
    }
}
