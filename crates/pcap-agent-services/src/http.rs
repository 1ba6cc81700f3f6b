//! Plumbing shared by both clients.

use crate::error::{Service, ServiceError};
use serde_json::Value;
use std::time::Duration;

/// Longest error body kept in [`ServiceError::Status`].
const MAX_ERROR_BODY: usize = 512;

pub(crate) fn build_client(service: Service, timeout_secs: u64) -> Result<reqwest::Client, ServiceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("pcap-agent/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ServiceError::http(service))
}

pub(crate) fn parse_url(service: Service, url: &str) -> Result<reqwest::Url, ServiceError> {
    reqwest::Url::parse(url).map_err(|e| ServiceError::InvalidUrl {
        service,
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Require a 2xx status and decode the body as JSON.
pub(crate) async fn read_json(service: Service, response: reqwest::Response) -> Result<Value, ServiceError> {
    let status = response.status();
    let body = response.text().await.map_err(ServiceError::http(service))?;

    if !status.is_success() {
        tracing::warn!(%service, status = status.as_u16(), "non-success response");
        return Err(ServiceError::Status {
            service,
            status: status.as_u16(),
            body: truncate(body, MAX_ERROR_BODY),
        });
    }

    serde_json::from_str(&body).map_err(|source| ServiceError::MalformedResponse { service, source })
}

fn truncate(mut text: String, max: usize) -> String {
    if text.len() > max {
        let mut cut = max;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push('…');
    }
    text
}
