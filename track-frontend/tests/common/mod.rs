#![allow(dead_code)]

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use track_core::config::{Config as ServerSettings, TelemetryConfig};
use track_frontend::config::{BackendSettings, Settings};
use track_frontend::models::user::{USER_ID_HEADER, USER_NAME_HEADER, USER_ROLE_HEADER};
use track_frontend::startup::Application;

pub struct TestUser {
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
}

pub const EMPLOYEE: TestUser = TestUser {
    id: "u-1",
    name: "Asha",
    role: "employee",
};

pub const OTHER_EMPLOYEE: TestUser = TestUser {
    id: "u-2",
    name: "Ravi",
    role: "employee",
};

pub const HR: TestUser = TestUser {
    id: "u-9",
    name: "Kiran",
    role: "hr",
};

/// Canned failure returned by the next backend call.
pub struct Failure {
    pub status: StatusCode,
    pub body: String,
}

/// In-memory stand-in for the operations backend.
#[derive(Default)]
pub struct BackendState {
    pub expenses: Vec<Value>,
    pub reimbursements: Vec<Value>,
    pub complaints: Vec<Value>,
    pub assets: Vec<Value>,
    pub next_id: u64,
    pub fail_next: Option<Failure>,
    /// List endpoints answer with a body that is not JSON.
    pub malformed_lists: bool,
    /// Expense creation fails with a 500 until cleared.
    pub reject_expense_posts: bool,
}

pub type SharedBackend = Arc<Mutex<BackendState>>;

impl BackendState {
    fn assign_id(&mut self, record: &mut Value) {
        self.next_id += 1;
        record["id"] = json!(self.next_id);
    }
}

fn take_failure(backend: &SharedBackend) -> Option<Response> {
    backend
        .lock()
        .unwrap()
        .fail_next
        .take()
        .map(|f| (f.status, [(CONTENT_TYPE, "application/json")], f.body).into_response())
}

fn list(backend: &SharedBackend, pick: fn(&BackendState) -> &Vec<Value>) -> Response {
    if let Some(failure) = take_failure(backend) {
        return failure;
    }
    let state = backend.lock().unwrap();
    if state.malformed_lists {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    Json(pick(&state).clone()).into_response()
}

fn same_id(record: &Value, id: &str) -> bool {
    match &record["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

/// Accepts the JSON or multipart bodies the dashboard posts.
async fn read_record(request: Request) -> Result<Value, Response> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if !is_multipart {
        let Json(value) = Json::<Value>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        return Ok(value);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(IntoResponse::into_response)?;

    let mut record = Map::new();
    let mut attachments = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(IntoResponse::into_response)? {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name().map(str::to_string) {
            attachments.push(json!({ "fileName": file_name }));
            continue;
        }
        let text = field.text().await.map_err(IntoResponse::into_response)?;
        let value = match name.as_str() {
            "amount" => text.parse::<f64>().map(|n| json!(n)).unwrap_or(json!(text)),
            _ => json!(text),
        };
        record.insert(name, value);
    }
    record.insert("attachments".to_string(), Value::Array(attachments));
    Ok(Value::Object(record))
}

async fn list_expenses(State(backend): State<SharedBackend>) -> Response {
    list(&backend, |s| &s.expenses)
}

async fn create_expense(State(backend): State<SharedBackend>, request: Request) -> Response {
    if let Some(failure) = take_failure(&backend) {
        return failure;
    }
    if backend.lock().unwrap().reject_expense_posts {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Ledger is locked for month end" })),
        )
            .into_response();
    }
    let mut record = match read_record(request).await {
        Ok(record) => record,
        Err(rejection) => return rejection,
    };
    let mut state = backend.lock().unwrap();
    state.assign_id(&mut record);
    state.expenses.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

/// Stores the full record and answers without a body.
async fn update_expense(
    State(backend): State<SharedBackend>,
    Path(id): Path<String>,
    Json(record): Json<Value>,
) -> Response {
    if let Some(failure) = take_failure(&backend) {
        return failure;
    }
    let mut state = backend.lock().unwrap();
    match state.expenses.iter_mut().find(|r| same_id(r, &id)) {
        Some(existing) => {
            *existing = record;
            StatusCode::NO_CONTENT.into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Expense not found" }))).into_response(),
    }
}

async fn list_reimbursements(State(backend): State<SharedBackend>) -> Response {
    list(&backend, |s| &s.reimbursements)
}

async fn create_reimbursement(State(backend): State<SharedBackend>, request: Request) -> Response {
    if let Some(failure) = take_failure(&backend) {
        return failure;
    }
    let mut record = match read_record(request).await {
        Ok(record) => record,
        Err(rejection) => return rejection,
    };
    let mut state = backend.lock().unwrap();
    state.assign_id(&mut record);
    state.reimbursements.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update_reimbursement_status(
    State(backend): State<SharedBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(failure) = take_failure(&backend) {
        return failure;
    }
    let mut state = backend.lock().unwrap();
    match state.reimbursements.iter_mut().find(|r| same_id(r, &id)) {
        Some(existing) => {
            existing["status"] = body["status"].clone();
            if let Some(charged_to) = body.get("chargedTo") {
                existing["chargedTo"] = charged_to.clone();
            }
            Json(existing.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!("Reimbursement not found"))).into_response(),
    }
}

async fn delete_reimbursement(State(backend): State<SharedBackend>, Path(id): Path<String>) -> Response {
    if let Some(failure) = take_failure(&backend) {
        return failure;
    }
    let mut state = backend.lock().unwrap();
    let before = state.reimbursements.len();
    state.reimbursements.retain(|r| !same_id(r, &id));
    if state.reimbursements.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!("Reimbursement not found"))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_complaints(State(backend): State<SharedBackend>) -> Response {
    list(&backend, |s| &s.complaints)
}

async fn create_complaint(State(backend): State<SharedBackend>, Json(mut record): Json<Value>) -> Response {
    if let Some(failure) = take_failure(&backend) {
        return failure;
    }
    let mut state = backend.lock().unwrap();
    state.assign_id(&mut record);
    state.complaints.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

/// Updates go to the collection path with the id in the body.
async fn update_complaint(State(backend): State<SharedBackend>, Json(record): Json<Value>) -> Response {
    if let Some(failure) = take_failure(&backend) {
        return failure;
    }
    let id = match &record["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let mut state = backend.lock().unwrap();
    match state.complaints.iter_mut().find(|r| same_id(r, &id)) {
        Some(existing) => {
            *existing = record;
            Json(existing.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response(),
    }
}

async fn list_assets(State(backend): State<SharedBackend>) -> Response {
    list(&backend, |s| &s.assets)
}

async fn create_asset(State(backend): State<SharedBackend>, Json(mut record): Json<Value>) -> Response {
    if let Some(failure) = take_failure(&backend) {
        return failure;
    }
    let mut state = backend.lock().unwrap();
    state.assign_id(&mut record);
    state.assets.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

fn mock_backend(backend: SharedBackend) -> Router {
    let api = Router::new()
        .route("/Expense", get(list_expenses).post(create_expense))
        .route("/Expense/:id", put(update_expense))
        .route(
            "/Asset/reimbursements",
            get(list_reimbursements).post(create_reimbursement),
        )
        .route("/Asset/reimbursements/:id", axum::routing::delete(delete_reimbursement))
        .route("/Asset/reimbursements/:id/status", put(update_reimbursement_status))
        .route(
            "/ComplaintsSuggestions",
            get(list_complaints)
                .post(create_complaint)
                .put(update_complaint),
        )
        .route("/assets", get(list_assets).post(create_asset))
        .with_state(backend);

    Router::new().nest("/api", api)
}

pub struct TestApp {
    pub address: String,
    pub backend: SharedBackend,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = SharedBackend::default();

        let backend_listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let backend_address = backend_listener.local_addr().unwrap();
        let router = mock_backend(backend.clone());
        tokio::spawn(async move {
            axum::serve(backend_listener, router).await.ok();
        });

        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: TelemetryConfig::default(),
            backend: BackendSettings {
                base_url: format!("http://{}/api", backend_address),
                timeout_secs: 5,
            },
            buildings: vec!["Building A".to_string(), "Building B".to_string()],
        };

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            backend,
            client,
        }
    }

    pub fn request(&self, method: reqwest::Method, path: &str, user: &TestUser) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.address, path))
            .header(USER_ID_HEADER, user.id)
            .header(USER_NAME_HEADER, user.name)
            .header(USER_ROLE_HEADER, user.role)
    }

    pub async fn get_json(&self, path: &str, user: &TestUser) -> (StatusCode, Value) {
        let response = self
            .request(reqwest::Method::GET, path, user)
            .send()
            .await
            .expect("Failed to execute request");
        into_parts(response).await
    }

    pub fn seed(&self, pick: fn(&mut BackendState) -> &mut Vec<Value>, record: Value) {
        let mut state = self.backend.lock().unwrap();
        pick(&mut state).push(record);
    }

    pub fn fail_next(&self, status: StatusCode, body: &str) {
        self.backend.lock().unwrap().fail_next = Some(Failure {
            status,
            body: body.to_string(),
        });
    }
}

pub async fn into_parts(response: reqwest::Response) -> (StatusCode, Value) {
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

pub fn expense(id: u64, user: &str, name: &str, amount: f64, status: &str, building: &str, date: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "amount": amount,
        "user": user,
        "building": building,
        "date": date,
        "category": "Travel",
        "status": status
    })
}
