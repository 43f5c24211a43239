//! Scripted stand-in for the gateway used by the flow tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use callgate_client::{ClientConfig, GatewayClient, TransportConfig};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    body: String,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: String::new(),
        }
    }
}

type Route = (Method, String);

#[derive(Default)]
struct Routes {
    scripted: HashMap<Route, VecDeque<Reply>>,
    standing: HashMap<Route, Reply>,
    log: Vec<Route>,
}

pub struct TestGateway {
    port: u16,
    routes: Arc<Mutex<Routes>>,
}

impl TestGateway {
    pub async fn start() -> Self {
        let routes = Arc::new(Mutex::new(Routes::default()));
        let app = Router::new().fallback(reply).with_state(routes.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test gateway");
        let port = listener.local_addr().expect("local addr").port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        Self { port, routes }
    }

    /// Queues a one-shot reply for `method target`.
    pub fn push(&self, method: Method, target: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .scripted
            .entry((method, target.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Reply used for `method target` once its queue is empty.
    pub fn always(&self, method: Method, target: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .standing
            .insert((method, target.to_string()), reply);
    }

    /// Scripts a successful peer registration followed by media allocation.
    pub fn script_session(&self, peer_id: &str, token: &str) {
        self.push(
            Method::POST,
            "peers",
            Reply::json(
                201,
                json!({
                    "command_type": "PEERS_CREATE",
                    "params": { "peer_id": peer_id, "token": token }
                }),
            ),
        );
        for (id, port) in [("vi-1", 50000), ("au-1", 50001)] {
            self.push(
                Method::POST,
                "media",
                Reply::json(
                    201,
                    json!({ "media_id": id, "port": port, "ip_v4": "10.0.0.2" }),
                ),
            );
        }
        for (id, port) in [("rc-1", 50010), ("rc-2", 50011)] {
            self.push(
                Method::POST,
                "media/rtcp",
                Reply::json(
                    201,
                    json!({ "rtcp_id": id, "port": port, "ip_v4": "10.0.0.2" }),
                ),
            );
        }
    }

    /// Requests seen so far, as `(method, path?query)`.
    pub fn log(&self) -> Vec<Route> {
        self.routes.lock().unwrap().log.clone()
    }

    pub fn count(&self, method: Method, target: &str) -> usize {
        self.log()
            .iter()
            .filter(|(m, t)| *m == method && t == target)
            .count()
    }

    pub fn client(&self) -> GatewayClient {
        let config = ClientConfig::new("test-key", "http://127.0.0.1", self.port);
        GatewayClient::with_transport_config(
            config,
            TransportConfig {
                request_delay: Duration::from_millis(5),
                timeout: Duration::from_secs(5),
            },
        )
        .expect("Failed to build client")
    }
}

async fn reply(State(routes): State<Arc<Mutex<Routes>>>, method: Method, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .trim_start_matches('/')
        .to_string();
    let route = (method, target);

    let reply = {
        let mut routes = routes.lock().unwrap();
        routes.log.push(route.clone());
        let queued = routes.scripted.get_mut(&route).and_then(VecDeque::pop_front);
        match queued {
            Some(reply) => reply,
            None => routes
                .standing
                .get(&route)
                .cloned()
                .unwrap_or_else(|| Reply::status(404)),
        }
    };

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}
