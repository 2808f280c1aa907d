//! Test harness for the Farm Direct client.
//!
//! [`TestServer`] is an in-process stand-in for the marketplace API. Tests
//! register canned responses per method and path, point a [`Gateway`] at the
//! server and then inspect what the client actually sent.
//!
//! ```rust,ignore
//! let server = TestServer::start().await;
//! server.respond_json(Method::GET, "/product/category", 200, json!({"data": {"categories": []}}));
//!
//! let api = MarketplaceClient::new(server.gateway());
//! assert!(api.list_categories().await.unwrap().is_empty());
//!
//! let request = server.last_request().unwrap();
//! assert_eq!(request.path, "/product/category");
//! ```
//!
//! Unregistered routes answer `404 {"detail": "Not Found"}`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use farm_direct_client::Gateway;

/// A request as the stub server received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path without the query string.
    pub path: String,
    /// Raw query string, if any.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    /// Value of a header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Every value sent for a header.
    #[must_use]
    pub fn header_all(&self, name: &str) -> Vec<String> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect()
    }

    /// Body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

/// A canned response.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
    pub delay: Option<Duration>,
}

impl StubResponse {
    /// JSON response with the given status.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
            delay: None,
        }
    }

    /// Plain text response with the given status.
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: "text/plain",
            delay: None,
        }
    }

    /// Hold the response back for `delay`.
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> StubResponse + Send + Sync>;

#[derive(Default)]
struct StubState {
    routes: Mutex<HashMap<(Method, String), Responder>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process stub of the marketplace API on an ephemeral port.
pub struct TestServer {
    addr: SocketAddr,
    state: Arc<StubState>,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// Root URL of the server, without a trailing slash.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A gateway rooted at this server.
    #[must_use]
    pub fn gateway(&self) -> Gateway {
        Gateway::new(self.url())
    }

    /// Answer `method path` with a computed response.
    pub fn respond_with<F>(&self, method: Method, path: &str, responder: F)
    where
        F: Fn(&RecordedRequest) -> StubResponse + Send + Sync + 'static,
    {
        self.state
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path.to_string()), Arc::new(responder));
    }

    /// Answer `method path` with a fixed response.
    pub fn respond(&self, method: Method, path: &str, response: StubResponse) {
        self.respond_with(method, path, move |_| response.clone());
    }

    /// Answer `method path` with a fixed JSON body.
    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.respond(method, path, StubResponse::json(status, &body));
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request = RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    };

    let responder = state
        .routes
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&(method, request.path.clone()))
        .cloned();

    let response = responder.map_or_else(
        || StubResponse::json(404, &serde_json::json!({"detail": "Not Found"})),
        |responder| responder(&request),
    );

    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request);

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut reply = (status, response.body).into_response();
    reply
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(response.content_type));
    reply
}
