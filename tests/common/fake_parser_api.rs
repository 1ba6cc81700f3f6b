//! Fake parser service for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `POST /api/pcap/parse` — accepts a multipart upload and replies with the
//!   configured JSON (or status)
//! - `GET /health` — `{"status":"ok"}` unless marked unhealthy
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeParserApi::start(office_capture()).await.unwrap();
//! let config = ParserConfig { url: api.parse_url(), ..Default::default() };
//! ```

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One multipart part the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

struct ApiState {
    response: Value,
    status: StatusCode,
    healthy: bool,
    uploads: Vec<Upload>,
}

/// Handle to the running fake parser service.
pub struct FakeParserApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeParserApi {
    /// Start the server; every successful upload is answered with `response`.
    pub async fn start(response: Value) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            response,
            status: StatusCode::OK,
            healthy: true,
            uploads: Vec::new(),
        }));

        let app = Router::new()
            .route("/api/pcap/parse", post(parse))
            .route("/health", get(health))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn parse_url(&self) -> String {
        format!("{}/api/pcap/parse", self.base_url())
    }

    /// Reply to uploads with `status` and a plain-text error body.
    pub async fn fail_with(&self, status: u16) {
        self.state.lock().await.status =
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    }

    pub async fn set_healthy(&self, healthy: bool) {
        self.state.lock().await.healthy = healthy;
    }

    pub async fn uploads(&self) -> Vec<Upload> {
        self.state.lock().await.uploads.clone()
    }
}

async fn parse(State(state): State<Arc<Mutex<ApiState>>>, mut multipart: Multipart) -> impl IntoResponse {
    let mut received = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let len = field.bytes().await.map(|b| b.len()).unwrap_or(0);
        received.push(Upload { field: name, file_name, content_type, len });
    }

    let mut state = state.lock().await;
    let has_pcap = received.iter().any(|u| u.field == "pcap");
    state.uploads.extend(received);

    if !state.status.is_success() {
        return (state.status, "parser exploded".to_string()).into_response();
    }
    if !has_pcap {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Missing pcap file" })))
            .into_response();
    }
    Json(state.response.clone()).into_response()
}

async fn health(State(state): State<Arc<Mutex<ApiState>>>) -> Json<Value> {
    let status = if state.lock().await.healthy { "ok" } else { "degraded" };
    Json(json!({ "status": status }))
}
