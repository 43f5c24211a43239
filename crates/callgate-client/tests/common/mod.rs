//! In-process mock of the WebRTC gateway.
//!
//! Responses are scripted per `(method, path?query)` and served in order.
//! Once a route's script runs out the mock falls back to a default response.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use callgate_client::{ClientConfig, GatewayClient, TransportConfig};
use serde_json::Value;
use tokio::net::TcpListener;

pub const TEST_API_KEY: &str = "test-api-key";

#[derive(Debug, Clone)]
pub struct Canned {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

impl Canned {
    pub fn json(status: u16, body: Value) -> Self {
        Self::raw(status, &body.to_string())
    }

    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    pub fn status(status: u16) -> Self {
        Self::raw(status, "")
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path and query without the leading slash
    pub target: String,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

struct MockState {
    scripts: Mutex<HashMap<(Method, String), VecDeque<Canned>>>,
    fallback: Mutex<Canned>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockGateway {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockGateway {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            scripts: Mutex::new(HashMap::new()),
            fallback: Mutex::new(Canned::status(404)),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock gateway");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state }
    }

    pub fn push(&self, method: Method, target: &str, canned: Canned) {
        self.state
            .scripts
            .lock()
            .unwrap()
            .entry((method, target.to_string()))
            .or_default()
            .push_back(canned);
    }

    pub fn set_fallback(&self, canned: Canned) {
        *self.state.fallback.lock().unwrap() = canned;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, target: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.target == target)
            .count()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(TEST_API_KEY, "http://127.0.0.1", self.addr.port())
    }

    /// Client with no pre-request delay so scripted loops finish quickly.
    pub fn client(&self) -> GatewayClient {
        self.client_with(TransportConfig {
            request_delay: Duration::ZERO,
            timeout: Duration::from_secs(5),
        })
    }

    pub fn client_with(&self, transport: TransportConfig) -> GatewayClient {
        GatewayClient::with_transport_config(self.config(), transport)
            .expect("Failed to build client")
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .trim_start_matches('/')
        .to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        target: target.clone(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let canned = state
        .scripts
        .lock()
        .unwrap()
        .get_mut(&(method, target))
        .and_then(|q| q.pop_front())
        .unwrap_or_else(|| state.fallback.lock().unwrap().clone());

    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response()
}
