#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use time::OffsetDateTime;
use tower::ServiceExt;

use ciel_admin::config::AppConfig;
use ciel_admin::domain::session::Session;
use ciel_admin::infra::session_store::MemorySessionStore;
use ciel_admin::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";
pub const SESSION_TOKEN: &str = "test-session-token";
pub const LOGIN_REQUIRED_REDIRECT: &str = "/login?warning=Please+login+to+continue";

// ---------------------------------------------------------------------------
// Fake admin API
// ---------------------------------------------------------------------------

/// What the fake admin API holds and what it was asked for.
#[derive(Default)]
pub struct Backend {
    pub reports: Mutex<Vec<Value>>,
    pub users: Mutex<Vec<Value>>,
    pub entities: Mutex<HashMap<String, Value>>,
    pub messages: Mutex<HashMap<String, Vec<Value>>>,
    /// Endpoints (last path segment before any id) that answer with a 500.
    pub failing: Mutex<HashSet<String>>,
    /// Endpoints that succeed without data.
    pub empty: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    authorization: Mutex<Option<String>>,
}

impl Backend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, call: &str) -> bool {
        self.calls().iter().any(|recorded| recorded == call)
    }

    pub fn called_with(&self, method: &str) -> bool {
        self.calls().iter().any(|recorded| recorded.starts_with(method))
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.authorization.lock().unwrap().clone()
    }

    pub fn fail(&self, endpoint: &str) {
        self.failing.lock().unwrap().insert(endpoint.to_string());
    }

    pub fn answer_null(&self, endpoint: &str) {
        self.empty.lock().unwrap().insert(endpoint.to_string());
    }

    pub fn add_report(&self, report: Value) {
        self.reports.lock().unwrap().push(report);
    }

    pub fn add_user(&self, user: Value) {
        self.users.lock().unwrap().push(user);
    }

    pub fn set_entity(&self, entity_id: &str, entity: Value) {
        self.entities.lock().unwrap().insert(entity_id.to_string(), entity);
    }

    pub fn set_messages(&self, chat_id: &str, messages: Vec<Value>) {
        self.messages.lock().unwrap().insert(chat_id.to_string(), messages);
    }
}

fn envelope(data: Value) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

async fn record(State(backend): State<Arc<Backend>>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    backend
        .calls
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method(), path));
    *backend.authorization.lock().unwrap() = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let endpoint = path
        .trim_start_matches("/api/v1/admin/")
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();
    if backend.failing.lock().unwrap().contains(&endpoint) {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, &format!("{endpoint} is down"));
    }
    if backend.empty.lock().unwrap().contains(&endpoint) {
        return envelope(Value::Null);
    }

    next.run(request).await
}

async fn dashboard() -> Response {
    envelope(json!({
        "posts": { "total": 1250, "videos": 250 },
        "likes": { "total": 4000, "change": 12.5 },
        "comments": { "total": 300, "change": -3.0 }
    }))
}

async fn user_stats(State(backend): State<Arc<Backend>>) -> Response {
    let users = backend.users.lock().unwrap();
    let unverified = users
        .iter()
        .filter(|user| !user["isMailVerified"].as_bool().unwrap_or(false))
        .count();
    envelope(json!({
        "total": users.len(),
        "unverified": unverified,
        "active": { "current": 1, "change": 5.0 },
        "connected": { "total": 1, "change": null }
    }))
}

async fn reports_overview(State(backend): State<Arc<Backend>>) -> Response {
    let mut distribution: HashMap<String, i64> = HashMap::new();
    for report in backend.reports.lock().unwrap().iter() {
        let kind = report["kind"].as_str().unwrap_or("unknown").to_string();
        *distribution.entry(kind).or_default() += 1;
    }
    envelope(json!({ "distribution": distribution }))
}

async fn report_analytics(Query(query): Query<HashMap<String, String>>) -> Response {
    let period = query.get("period").cloned().unwrap_or_default();
    envelope(json!({
        "trend": [{ "_id": format!("{period}-1"), "count": 3 }],
        "distribution": [{ "_id": "post", "count": 3 }]
    }))
}

async fn growth(Query(query): Query<HashMap<String, String>>) -> Response {
    let period = query.get("query").cloned().unwrap_or_default();
    envelope(json!({
        "user": [{ "_id": format!("{period}-users"), "count": 7 }],
        "post": [{ "_id": format!("{period}-posts"), "count": 9 }]
    }))
}

async fn analytics() -> Response {
    envelope(json!({
        "engagement": { "likes": 1200, "comments": 300 },
        "registrations": { "newRegistrations": 48, "percentage": 20.0 },
        "chats": { "direct": 70, "group": 5 }
    }))
}

async fn message_analytics() -> Response {
    envelope(json!({
        "trend": [{ "_id": "2024-02-01", "count": 120 }, { "_id": "2024-03-01", "count": 150 }],
        "type": [{ "_id": "text", "count": 260 }, { "_id": "voice", "count": 10 }]
    }))
}

async fn content_distribution() -> Response {
    envelope(json!({
        "posts": 40,
        "videos": 12,
        "comments": 300,
        "calls": 9,
        "callsDistribution": { "audio": 6, "video": 3 }
    }))
}

async fn list_reports(State(backend): State<Arc<Backend>>) -> Response {
    envelope(Value::Array(backend.reports.lock().unwrap().clone()))
}

async fn update_report(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut reports = backend.reports.lock().unwrap();
    match reports.iter_mut().find(|report| report["_id"] == id.as_str()) {
        Some(report) => {
            report["status"] = body["status"].clone();
            envelope(report.clone())
        }
        None => failure(StatusCode::NOT_FOUND, "Report not found"),
    }
}

async fn delete_report(State(backend): State<Arc<Backend>>, Path(id): Path<String>) -> Response {
    let mut reports = backend.reports.lock().unwrap();
    let before = reports.len();
    reports.retain(|report| report["_id"] != id.as_str());
    if reports.len() == before {
        return failure(StatusCode::NOT_FOUND, "Report not found");
    }
    envelope(Value::Null)
}

async fn entity(
    State(backend): State<Arc<Backend>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let entity_id = query.get("entityId").cloned().unwrap_or_default();
    let entity = backend.entities.lock().unwrap().get(&entity_id).cloned();
    envelope(entity.unwrap_or(Value::Null))
}

async fn messages(State(backend): State<Arc<Backend>>, Path(chat_id): Path<String>) -> Response {
    let messages = backend
        .messages
        .lock()
        .unwrap()
        .get(&chat_id)
        .cloned()
        .unwrap_or_default();
    envelope(Value::Array(messages))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == ADMIN_USERNAME && body["password"] == ADMIN_PASSWORD {
        return envelope(json!({ "token": SESSION_TOKEN }));
    }
    failure(StatusCode::UNAUTHORIZED, "Invalid credentials")
}

async fn logout() -> Response {
    envelope(Value::Null)
}

async fn list_users(State(backend): State<Arc<Backend>>) -> Response {
    envelope(Value::Array(backend.users.lock().unwrap().clone()))
}

async fn remove_unverified(State(backend): State<Arc<Backend>>) -> Response {
    backend
        .users
        .lock()
        .unwrap()
        .retain(|user| user["isMailVerified"].as_bool().unwrap_or(false));
    envelope(Value::Null)
}

/// Serves the fake admin API on an ephemeral port and returns its origin.
async fn serve(backend: Arc<Backend>) -> String {
    let admin = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/user-stats", get(user_stats))
        .route("/reports-overview", get(reports_overview))
        .route("/report-analytics", get(report_analytics))
        .route("/growth", get(growth))
        .route("/analytics", get(analytics))
        .route("/message-analytics", get(message_analytics))
        .route("/content-distribution", get(content_distribution))
        .route("/reports", get(list_reports))
        .route("/reports/:id", put(update_report).delete(delete_report))
        .route("/entity", get(entity))
        .route("/messages/:chat_id", get(messages))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/users", get(list_users))
        .route("/unverified-users", delete(remove_unverified));

    let router = Router::new()
        .nest("/api/v1/admin", admin)
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fake admin api");
    let addr = listener.local_addr().expect("fake admin api has no address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn report_json(id: &str, kind: &str, status: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "entityId": format!("entity-{id}"),
        "kind": kind,
        "title": title,
        "description": "Reported from the app",
        "images": [],
        "user": { "_id": "reporter", "username": "reporter", "avatar": "" },
        "status": status,
        "createdAt": "2024-03-05T14:07:00.000Z"
    })
}

pub fn user_json(id: &str, email: &str, verified: bool, login_type: &str) -> Value {
    json!({
        "_id": id,
        "username": id,
        "email": email,
        "avatar": "",
        "createdAt": "2024-01-02T08:00:00.000Z",
        "isMailVerified": verified,
        "loginType": login_type,
        "sessions": 2
    })
}

// ---------------------------------------------------------------------------
// TestApp
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub backend: Arc<Backend>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestApp {
    pub async fn logged_out() -> Self {
        Self::start(MemorySessionStore::default()).await
    }

    pub async fn logged_in() -> Self {
        let session = Session::issue(SESSION_TOKEN.to_string(), OffsetDateTime::now_utc());
        Self::start(MemorySessionStore::with_session(session)).await
    }

    async fn start(store: MemorySessionStore) -> Self {
        let backend = Arc::new(Backend::default());
        let api_base_url = serve(backend.clone()).await;

        let config = AppConfig {
            http_addr: "127.0.0.1:0".into(),
            api_base_url,
            public_web_url: "https://ciel.test".into(),
            maps_api_key: "maps-key".into(),
            session_path: std::env::temp_dir().join("ciel-admin-test-session.json"),
            api_timeout_seconds: 5,
            list_cache_ttl_seconds: 60,
        };
        let state = AppState::build(&config, store).expect("failed to build app state");
        let router = ciel_admin::http::router(state.clone());

        Self {
            router,
            state,
            backend,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
