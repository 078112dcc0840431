#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Multipart, Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use medibot_client::{ApiRequest, ApiResponse, ClientError, Transport};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct StoredReminder {
    id: String,
    name: String,
    time: String,
    completed: bool,
}

#[derive(Debug, Default)]
struct BackendData {
    next_id: u64,
    reminders: Vec<StoredReminder>,
    notes: Vec<String>,
    water: BTreeMap<String, u64>,
}

/// In-memory stand-in for the assistant backend.
#[derive(Clone, Default)]
pub struct BackendState {
    data: Arc<Mutex<BackendData>>,
    requests: Arc<AtomicUsize>,
    reject_writes: Arc<AtomicBool>,
    today: Arc<std::sync::Mutex<Option<String>>>,
}

impl BackendState {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Inserts a reminder with a caller-chosen id, bypassing the API.
    pub async fn seed_reminder(&self, id: &str, name: &str, time: &str) {
        self.data.lock().await.reminders.push(StoredReminder {
            id: id.to_string(),
            name: name.to_string(),
            time: time.to_string(),
            completed: false,
        });
    }

    /// Overrides the date the backend treats as today.
    pub fn set_today(&self, date: &str) {
        *self.today.lock().unwrap() = Some(date.to_string());
    }

    fn today(&self) -> String {
        self.today
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| chrono::Local::now().date_naive().to_string())
    }

    pub async fn water(&self, date: &str) -> u64 {
        self.data.lock().await.water.get(date).copied().unwrap_or(0)
    }

    fn writes_rejected(&self) -> bool {
        self.reject_writes.load(Ordering::SeqCst)
    }
}

pub struct Backend {
    pub base_url: String,
    pub state: BackendState,
}

pub async fn spawn_backend() -> Backend {
    let state = BackendState::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind random port");
    let addr = listener.local_addr().expect("local addr");
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub backend");
    });

    Backend {
        base_url: format!("http://{addr}"),
        state,
    }
}

fn router(state: BackendState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/summarize", post(summarize))
        .route("/api/daily_summary", get(daily_summary))
        .route("/api/upload_image", post(upload_image))
        .route("/api/analyze_local", post(analyze_local))
        .route("/api/reminder", post(add_reminder))
        .route("/api/reminders", get(list_reminders))
        .route("/api/reminder/:id/complete", post(complete_reminder))
        .route("/api/reminders/completed", delete(delete_completed))
        .route("/api/notes", get(list_notes).post(add_note))
        .route("/api/water", get(get_water).post(add_water))
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .with_state(state)
}

async fn count_requests(State(state): State<BackendState>, request: Request, next: Next) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn chat(Json(payload): Json<Value>) -> Response {
    let message = payload["message"].as_str().unwrap_or("").trim().to_string();
    if message.is_empty() {
        return error(StatusCode::BAD_REQUEST, "empty");
    }
    Json(json!({ "reply": format!("echo: {message}") })).into_response()
}

async fn summarize(Json(payload): Json<Value>) -> Response {
    let text = payload["text"].as_str().unwrap_or("").trim().to_string();
    if text.is_empty() {
        return error(StatusCode::BAD_REQUEST, "empty");
    }
    Json(json!({ "summary": format!("{} words", text.split_whitespace().count()) })).into_response()
}

async fn daily_summary(State(state): State<BackendState>) -> Json<Value> {
    let data = state.data.lock().await;
    Json(json!({
        "summary": format!("{} notes, {} reminders", data.notes.len(), data.reminders.len())
    }))
}

async fn upload_image(mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            let file_name = field.file_name().unwrap_or("").to_string();
            let size = field.bytes().await.map(|bytes| bytes.len()).unwrap_or(0);
            return Json(json!({
                "local_description": format!("{file_name}: {size} bytes"),
                "gemini_description": "looks fine"
            }))
            .into_response();
        }
    }
    error(StatusCode::BAD_REQUEST, "no file")
}

async fn analyze_local(Json(payload): Json<Value>) -> Response {
    match payload["path"].as_str() {
        Some(path) if !path.is_empty() => {
            Json(json!({ "description": format!("analyzed {path}") })).into_response()
        }
        _ => error(StatusCode::BAD_REQUEST, "path missing or not found"),
    }
}

async fn add_reminder(State(state): State<BackendState>, Json(payload): Json<Value>) -> Response {
    if state.writes_rejected() {
        return error(StatusCode::SERVICE_UNAVAILABLE, "read only");
    }
    let name = payload["name"].as_str().unwrap_or("");
    let time = payload["time"].as_str().unwrap_or("");
    if name.is_empty() || time.is_empty() {
        return error(StatusCode::BAD_REQUEST, "missing fields");
    }

    let mut data = state.data.lock().await;
    data.next_id += 1;
    let id = data.next_id.to_string();
    data.reminders.push(StoredReminder {
        id,
        name: name.to_string(),
        time: time.to_string(),
        completed: false,
    });
    Json(json!({ "ok": true })).into_response()
}

async fn list_reminders(State(state): State<BackendState>) -> Json<Value> {
    let data = state.data.lock().await;
    let reminders: Vec<Value> = data
        .reminders
        .iter()
        .rev()
        .map(|reminder| {
            json!({
                "id": reminder.id,
                "name": reminder.name,
                "time": reminder.time,
                "completed": reminder.completed,
            })
        })
        .collect();
    Json(json!({ "reminders": reminders }))
}

async fn complete_reminder(State(state): State<BackendState>, Path(id): Path<String>) -> Response {
    if state.writes_rejected() {
        return error(StatusCode::SERVICE_UNAVAILABLE, "read only");
    }
    let mut data = state.data.lock().await;
    match data.reminders.iter_mut().find(|reminder| reminder.id == id) {
        Some(reminder) => {
            reminder.completed = true;
            Json(json!({ "ok": true })).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "no such reminder"),
    }
}

async fn delete_completed(State(state): State<BackendState>) -> Response {
    if state.writes_rejected() {
        return error(StatusCode::SERVICE_UNAVAILABLE, "read only");
    }
    let mut data = state.data.lock().await;
    data.reminders.retain(|reminder| !reminder.completed);
    Json(json!({ "ok": true })).into_response()
}

async fn add_note(State(state): State<BackendState>, Json(payload): Json<Value>) -> Response {
    if state.writes_rejected() {
        return error(StatusCode::SERVICE_UNAVAILABLE, "read only");
    }
    let content = payload["content"].as_str().unwrap_or("").trim().to_string();
    if content.is_empty() {
        return error(StatusCode::BAD_REQUEST, "empty");
    }
    state.data.lock().await.notes.push(content);
    Json(json!({ "ok": true })).into_response()
}

async fn list_notes(State(state): State<BackendState>) -> Json<Value> {
    let data = state.data.lock().await;
    let notes: Vec<Value> = data
        .notes
        .iter()
        .rev()
        .map(|content| json!({ "content": content }))
        .collect();
    Json(json!({ "notes": notes }))
}

async fn get_water(
    State(state): State<BackendState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(date) = params.get("date") else {
        return error(StatusCode::BAD_REQUEST, "missing date");
    };
    let count = state.water(date).await;
    Json(json!({ "count": count })).into_response()
}

// An empty body increments today's count on the server; `{date, count}`
// overwrites the stored total.
async fn add_water(State(state): State<BackendState>, body: Bytes) -> Response {
    if state.writes_rejected() {
        return error(StatusCode::SERVICE_UNAVAILABLE, "read only");
    }
    let today = state.today();
    let mut data = state.data.lock().await;
    if body.is_empty() {
        let entry = data.water.entry(today.clone()).or_default();
        *entry += 1;
        return Json(json!({ "ok": true, "date": today, "count": *entry })).into_response();
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => return error(StatusCode::BAD_REQUEST, "invalid body"),
    };
    let Some(date) = payload["date"].as_str() else {
        return error(StatusCode::BAD_REQUEST, "missing date");
    };
    let count = payload["count"].as_u64().unwrap_or(0);
    data.water.insert(date.to_string(), count);
    Json(json!({ "ok": true, "count": count })).into_response()
}

/// Wraps a transport and fails every request with a transport error while
/// switched offline.
pub struct Flaky<T> {
    pub inner: T,
    offline: AtomicBool,
}

impl<T> Flaky<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            offline: AtomicBool::new(false),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

impl<T: Transport> Transport for Flaky<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::transport("simulated outage"));
        }
        self.inner.send(request).await
    }
}
