//! LLM service client — sends the prompt to a chat endpoint and returns the
//! report text.
//!
//! Two dialects are spoken:
//!
//! | Provider | Request body | Answer |
//! |----------|--------------|--------|
//! | `openai` | `{model, messages, temperature}` | `choices[0].message.content` |
//! | `ollama` | `{model, messages, stream: false}` | `message.content` |
//!
//! `messages` is always a fixed system message followed by the prompt as the
//! single user message.

use crate::error::{Service, ServiceError};
use crate::http::{build_client, parse_url, read_json};
use pcap_agent_core::config::{LlmConfig, LlmProvider};
use pcap_agent_core::SYSTEM_MESSAGE;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

pub struct LlmClient {
    client: reqwest::Client,
    url: reqwest::Url,
    provider: LlmProvider,
    model: String,
    temperature: f64,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, ServiceError> {
        let api_key = config.resolve_api_key();
        if api_key.is_none() && config.provider == LlmProvider::OpenAi {
            tracing::debug!(env = %config.api_key_env, "no API key configured; sending unauthenticated");
        }
        Ok(Self {
            client: build_client(Service::Llm, config.timeout_secs)?,
            url: parse_url(Service::Llm, &config.url)?,
            provider: config.provider,
            model: config.model.clone(),
            temperature: config.temperature,
            api_key,
        })
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Provider-specific request body for `prompt`.
    pub fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        let messages = [
            ChatMessage { role: "system", content: SYSTEM_MESSAGE },
            ChatMessage { role: "user", content: prompt },
        ];
        match self.provider {
            LlmProvider::OpenAi => ChatRequest {
                model: &self.model,
                messages,
                temperature: Some(self.temperature),
                stream: None,
            },
            LlmProvider::Ollama => ChatRequest {
                model: &self.model,
                messages,
                temperature: None,
                stream: Some(false),
            },
        }
    }

    /// Send `prompt` and return the model's answer.
    pub async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        tracing::info!(
            provider = %self.provider,
            model = %self.model,
            prompt_chars = prompt.len(),
            "requesting report"
        );

        let mut request = self.client.post(self.url.clone()).json(&self.request_body(prompt));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(ServiceError::http(Service::Llm))?;
        let body = read_json(Service::Llm, response).await?;

        let content = extract_content(self.provider, &body).ok_or(ServiceError::EmptyCompletion)?;
        tracing::debug!(report_chars = content.len(), "report received");
        Ok(content)
    }
}

/// Pull the assistant's text out of a chat response. `None` when the field
/// is missing, not a string, or blank.
pub fn extract_content(provider: LlmProvider, body: &Value) -> Option<String> {
    let pointer = match provider {
        LlmProvider::OpenAi => "/choices/0/message/content",
        LlmProvider::Ollama => "/message/content",
    };
    body.pointer(pointer)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}
