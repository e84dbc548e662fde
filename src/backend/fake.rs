//! In-process stand-in for the managed backend, for tests.
//!
//! Serves JSON documents keyed by request path on `127.0.0.1:0`.
//! `POST` stores the request's `data` object under a generated `$id`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Default)]
struct FakeState {
    documents: HashMap<String, Value>,
    last_headers: HashMap<String, String>,
    requests: usize,
    fail_with: Option<u16>,
}

#[derive(Clone)]
pub(crate) struct FakeBackend {
    addr: SocketAddr,
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub(crate) async fn start() -> Self {
        let state = Arc::new(Mutex::new(FakeState::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// Endpoint to hand to `BackendConfig`.
    pub(crate) fn endpoint(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub(crate) fn insert(&self, path: &str, document: Value) {
        self.state
            .lock()
            .unwrap()
            .documents
            .insert(path.to_string(), document);
    }

    pub(crate) fn document(&self, path: &str) -> Option<Value> {
        self.state.lock().unwrap().documents.get(path).cloned()
    }

    /// Answer every request with this status from now on.
    pub(crate) fn fail_with(&self, status: u16) {
        self.state.lock().unwrap().fail_with = Some(status);
    }

    pub(crate) fn last_headers(&self) -> HashMap<String, String> {
        self.state.lock().unwrap().last_headers.clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests
    }
}

fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("{path} not found"), "code": 404, "type": "document_not_found"})),
    )
        .into_response()
}

async fn handle(
    State(state): State<Arc<Mutex<FakeState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests += 1;
    state.last_headers = headers
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();

    if let Some(status) = state.fail_with {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, Json(json!({"message": "injected failure", "code": status.as_u16()})))
            .into_response();
    }

    let path = uri.path().to_string();
    match method {
        Method::GET => match state.documents.get(&path) {
            Some(doc) => Json(doc.clone()).into_response(),
            None => not_found(&path),
        },
        Method::POST => {
            let request: Value = match serde_json::from_slice(&body) {
                Ok(v) => v,
                Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            };
            let id = match request["documentId"].as_str() {
                Some("unique()") | None => uuid::Uuid::new_v4().simple().to_string(),
                Some(id) => id.to_string(),
            };
            let mut doc = request["data"].clone();
            doc["$id"] = Value::String(id.clone());
            state.documents.insert(format!("{path}/{id}"), doc.clone());
            (StatusCode::CREATED, Json(doc)).into_response()
        }
        _ => not_found(&path),
    }
}
