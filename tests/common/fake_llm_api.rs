//! Fake chat-completion service covering both provider dialects.
//!
//! Serves:
//! - `POST /v1/chat/completions` — OpenAI-style `choices[0].message.content`
//! - `POST /api/chat` — Ollama-style `message.content`
//!
//! Every request body and its `Authorization` header are recorded so tests
//! can assert on what the client sent.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: &'static str,
    pub authorization: Option<String>,
    pub body: Value,
}

struct ApiState {
    reply: String,
    status: StatusCode,
    requests: Vec<Recorded>,
}

pub struct FakeLlmApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeLlmApi {
    pub async fn start(reply: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            reply: reply.to_string(),
            status: StatusCode::OK,
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/v1/chat/completions", post(openai))
            .route("/api/chat", post(ollama))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn openai_url(&self) -> String {
        format!("http://{}/v1/chat/completions", self.addr)
    }

    pub fn ollama_url(&self) -> String {
        format!("http://{}/api/chat", self.addr)
    }

    pub async fn fail_with(&self, status: u16) {
        self.state.lock().await.status =
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    }

    pub async fn requests(&self) -> Vec<Recorded> {
        self.state.lock().await.requests.clone()
    }
}

async fn record(
    state: &Mutex<ApiState>,
    path: &'static str,
    headers: &HeaderMap,
    body: Value,
) -> Result<String, StatusCode> {
    let mut state = state.lock().await;
    state.requests.push(Recorded {
        path,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    if state.status.is_success() {
        Ok(state.reply.clone())
    } else {
        Err(state.status)
    }
}

async fn openai(
    State(state): State<Arc<Mutex<ApiState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    match record(&state, "/v1/chat/completions", &headers, body).await {
        Ok(reply) => Json(json!({
            "id": "chatcmpl-test",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": reply } }]
        }))
        .into_response(),
        Err(status) => (status, "upstream overloaded").into_response(),
    }
}

async fn ollama(
    State(state): State<Arc<Mutex<ApiState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    match record(&state, "/api/chat", &headers, body).await {
        Ok(reply) => Json(json!({
            "model": "llama3",
            "message": { "role": "assistant", "content": reply },
            "done": true
        }))
        .into_response(),
        Err(status) => (status, "upstream overloaded").into_response(),
    }
}
