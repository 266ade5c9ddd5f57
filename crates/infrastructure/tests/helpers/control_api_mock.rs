#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex, RwLock};

/// Builds one wire query log entry.
pub fn wire_entry(time: &str, host: &str, reason: &str, filter_id: i64) -> Value {
    json!({
        "time": time,
        "question": { "host": host, "type": "A", "class": "IN" },
        "answer": [{ "type": "A", "value": "93.184.216.34", "ttl": 300 }],
        "client": "192.168.1.10",
        "reason": reason,
        "filterId": filter_id,
        "rule": "",
        "status": "NOERROR",
        "elapsedMs": "0.52"
    })
}

/// `{ data, oldest }` body with `oldest` taken from the last entry.
pub fn querylog_body(entries: Vec<Value>) -> Value {
    let oldest = entries
        .last()
        .and_then(|e| e["time"].as_str())
        .unwrap_or("")
        .to_string();
    json!({ "data": entries, "oldest": oldest })
}

pub struct MockState {
    pub log_pages: Mutex<VecDeque<Value>>,
    pub older_than_params: Mutex<Vec<Option<String>>>,
    pub raw_querylog: RwLock<Option<String>>,
    pub logs_enabled: RwLock<bool>,
    pub rules: RwLock<String>,
    pub rules_as_lines: RwLock<bool>,
    pub filters: RwLock<Value>,
    pub status_code: RwLock<StatusCode>,
    pub reject_rules: RwLock<bool>,
    pub set_rules_bodies: Mutex<Vec<String>>,
    pub delay: RwLock<Option<Duration>>,
    pub clients: RwLock<Value>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            log_pages: Mutex::new(VecDeque::new()),
            older_than_params: Mutex::new(Vec::new()),
            raw_querylog: RwLock::new(None),
            logs_enabled: RwLock::new(true),
            rules: RwLock::new(String::new()),
            rules_as_lines: RwLock::new(false),
            filters: RwLock::new(Value::Null),
            status_code: RwLock::new(StatusCode::OK),
            reject_rules: RwLock::new(false),
            set_rules_bodies: Mutex::new(Vec::new()),
            delay: RwLock::new(None),
            clients: RwLock::new(json!({ "clients": [], "auto_clients": [] })),
        }
    }
}

/// In-process control API serving canned responses.
pub struct MockControlApi {
    addr: SocketAddr,
    pub state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockControlApi {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/control/querylog", get(querylog))
            .route("/control/querylog_info", get(querylog_info))
            .route("/control/filtering/status", get(filtering_status))
            .route("/control/filtering/set_rules", post(set_rules))
            .route("/control/clients", get(clients))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn push_page(&self, body: Value) {
        self.state.log_pages.lock().await.push_back(body);
    }

    pub async fn set_rules(&self, rules: &str) {
        *self.state.rules.write().await = rules.to_string();
    }

    pub async fn rules(&self) -> String {
        self.state.rules.read().await.clone()
    }

    pub async fn older_than_params(&self) -> Vec<Option<String>> {
        self.state.older_than_params.lock().await.clone()
    }
}

impl Drop for MockControlApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn querylog(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state
        .older_than_params
        .lock()
        .await
        .push(params.get("older_than").cloned());

    if let Some(delay) = *state.delay.read().await {
        tokio::time::sleep(delay).await;
    }

    if let Some(raw) = state.raw_querylog.read().await.clone() {
        return (StatusCode::OK, raw).into_response();
    }

    let body = state
        .log_pages
        .lock()
        .await
        .pop_front()
        .unwrap_or_else(|| json!({ "data": [], "oldest": "" }));
    Json(body).into_response()
}

async fn querylog_info(State(state): State<Arc<MockState>>) -> Json<Value> {
    Json(json!({
        "enabled": *state.logs_enabled.read().await,
        "interval": 7
    }))
}

async fn filtering_status(State(state): State<Arc<MockState>>) -> Response {
    let status = *state.status_code.read().await;
    if !status.is_success() {
        return (status, "filtering unavailable").into_response();
    }

    let rules = state.rules.read().await.clone();
    let user_rules = if *state.rules_as_lines.read().await {
        json!(rules.lines().collect::<Vec<_>>())
    } else {
        json!(rules)
    };

    Json(json!({
        "enabled": true,
        "interval": 24,
        "filters": state.filters.read().await.clone(),
        "user_rules": user_rules
    }))
    .into_response()
}

async fn set_rules(State(state): State<Arc<MockState>>, body: String) -> Response {
    state.set_rules_bodies.lock().await.push(body.clone());

    if *state.reject_rules.read().await {
        return (StatusCode::BAD_REQUEST, "could not parse rules").into_response();
    }

    *state.rules.write().await = body;
    StatusCode::OK.into_response()
}

async fn clients(State(state): State<Arc<MockState>>) -> Json<Value> {
    Json(state.clients.read().await.clone())
}
