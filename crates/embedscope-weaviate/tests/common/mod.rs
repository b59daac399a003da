#![allow(dead_code)]

//! In-process mock of the Weaviate REST endpoints used by embedscope.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const API_KEY: &str = "test-api-key";

struct MockState {
    objects: Vec<Value>,
    ready_status: StatusCode,
    hits: AtomicUsize,
    cursors: Mutex<Vec<Option<String>>>,
}

/// A local HTTP server answering `/v1/.well-known/ready`, `/v1/meta` and
/// `/v1/objects` from a fixed object list.
pub struct MockWeaviate {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MockWeaviate {
    pub async fn start(objects: Vec<Value>) -> Self {
        Self::start_with_ready(objects, StatusCode::OK).await
    }

    pub async fn start_with_ready(mut objects: Vec<Value>, ready_status: StatusCode) -> Self {
        objects.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));

        let state = Arc::new(MockState {
            objects,
            ready_status,
            hits: AtomicUsize::new(0),
            cursors: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/.well-known/ready", get(handle_ready))
            .route("/v1/meta", get(handle_meta))
            .route("/v1/objects", get(handle_objects))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let addr = listener.local_addr().expect("failed to read local address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Total number of requests received on any endpoint.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// The `after` cursor of every object listing, in arrival order.
    pub fn cursors(&self) -> Vec<Option<String>> {
        self.state.cursors.lock().unwrap().clone()
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

fn authorized(state: &MockState, headers: &HeaderMap) -> bool {
    state.hits.fetch_add(1, Ordering::SeqCst);
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {API_KEY}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "code": 401, "message": "anonymous access not enabled" })),
    )
        .into_response()
}

async fn handle_ready(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    state.ready_status.into_response()
}

async fn handle_meta(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    Json(json!({ "version": "1.28.2", "hostname": "http://[::]:8080", "modules": {} }))
        .into_response()
}

async fn handle_objects(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    let after = params.get("after").cloned();
    state.cursors.lock().unwrap().push(after.clone());

    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(25);
    let include_vector = params.get("include").is_some_and(|i| i == "vector");

    let objects: Vec<Value> = state
        .objects
        .iter()
        .filter(|o| match &after {
            Some(after) => o["id"].as_str().is_some_and(|id| id > after.as_str()),
            None => true,
        })
        .take(limit)
        .map(|o| {
            let mut o = o.clone();
            if !include_vector {
                if let Some(map) = o.as_object_mut() {
                    map.remove("vector");
                    map.remove("vectors");
                }
            }
            o
        })
        .collect();

    Json(json!({ "objects": objects, "totalResults": objects.len() })).into_response()
}

pub fn object_id(i: usize) -> String {
    format!("00000000-0000-0000-0000-{i:012}")
}

pub fn vector(i: usize, dims: usize) -> Vec<f32> {
    (0..dims)
        .map(|j| ((i * 31 + j * 7) % 17) as f32 / 17.0)
        .collect()
}

/// An object with a flat vector and a `category` property.
pub fn flat_object(i: usize, dims: usize, category: &str) -> Value {
    json!({
        "id": object_id(i),
        "class": "FAQ",
        "properties": { "category": category, "question": format!("question {i}") },
        "vector": vector(i, dims),
    })
}

/// An object with named vectors.
pub fn named_object(i: usize, dims: usize, name: &str) -> Value {
    let mut vectors = serde_json::Map::new();
    vectors.insert(name.to_owned(), json!(vector(i, dims)));

    json!({
        "id": object_id(i),
        "class": "FAQ",
        "properties": { "category": "billing" },
        "vectors": vectors,
    })
}
