#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use realestate_api::auth::{generate_jwt, hash_password, Claims, UserDirectory};
use realestate_api::config::AppConfig;
use realestate_api::database::models::User;
use realestate_api::database::DocumentStore;
use realestate_api::state::AppState;

pub const ADMIN_TEMAN: &str = "admin-teman-token";
pub const MEMBER_TEMAN: &str = "member-teman-token";

pub struct TestApp {
    pub router: Router,
    pub data_path: PathBuf,
    pub admin_token: String,
    pub member_token: String,
    pub stranger_token: String,
    pub config: AppConfig,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.data_path);
    }
}

pub fn users() -> Vec<User> {
    vec![
        User {
            username: "admin".to_string(),
            password_hash: hash_password("admin-pw"),
            is_admin: true,
            token_teman: Some(ADMIN_TEMAN.to_string()),
        },
        User {
            username: "member".to_string(),
            password_hash: hash_password("member-pw"),
            is_admin: false,
            token_teman: Some(MEMBER_TEMAN.to_string()),
        },
        User {
            username: "no-teman".to_string(),
            password_hash: hash_password("pw"),
            is_admin: false,
            token_teman: None,
        },
    ]
}

pub fn listing(name: &str) -> Value {
    json!({
        "name": name,
        "address": "Jl. Asia Afrika 8",
        "location": "Bandung",
        "price": 750000000,
        "area": 90,
        "bedroom": 3,
        "bathroom": 2,
        "description": "Close to the city centre",
        "image": "https://example.com/house.jpg",
        "type": "house",
        "status": "available"
    })
}

pub fn demographic(location: &str, population: i64) -> Value {
    json!({ "location": location, "population": population, "populationDensity": population / 100 })
}

/// Build the full router over a fresh data file seeded with `document`
pub async fn spawn_app(document: Value, upstream_base: &str) -> Result<TestApp> {
    let data_path = std::env::temp_dir().join(format!("realestate-it-{}.json", uuid::Uuid::new_v4()));
    tokio::fs::write(&data_path, serde_json::to_vec_pretty(&document)?).await?;

    let config = AppConfig::for_paths(&data_path, "unused-users.json").with_upstream(upstream_base);
    let store = DocumentStore::open(&data_path).await?;
    let directory = users();

    let token_for = |name: &str| -> Result<String> {
        let user = directory.iter().find(|u| u.username == name).context("unknown test user")?;
        Ok(generate_jwt(&Claims::new(user, 1), &config.security)?)
    };
    let admin_token = token_for("admin")?;
    let member_token = token_for("member")?;
    let stranger_token = token_for("no-teman")?;

    let state = AppState::new(config.clone(), store, UserDirectory::new(directory))?;

    Ok(TestApp {
        router: realestate_api::app(state),
        data_path,
        admin_token,
        member_token,
        stranger_token,
        config,
    })
}

pub async fn spawn_empty_app() -> Result<TestApp> {
    spawn_app(json!({ "realEstate": [], "demographicData": [] }), "http://127.0.0.1:9").await
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let (status, _, bytes) = self.request_raw(method, uri, token, body).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Ok((status, value))
    }

    /// Same as `request`, but hands back headers and the undecoded body
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, HeaderMap, Bytes)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, headers, bytes))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn stored(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&tokio::fs::read(&self.data_path).await?)?)
    }
}

/// In-process stand-in for the electricity usage service
#[derive(Clone)]
pub struct FakeUpstream {
    pub base_url: String,
    pub readings: Arc<Mutex<Vec<Value>>>,
    pub writes: Arc<AtomicUsize>,
}

impl FakeUpstream {
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Value> {
        self.readings.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

pub fn reading(username: &str, usage: f64) -> Value {
    json!({ "username": username, "date": "2024-06-01", "hour": 8, "usage": usage })
}

pub async fn spawn_upstream(initial: Vec<Value>) -> Result<FakeUpstream> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;

    let upstream = FakeUpstream {
        base_url: format!("http://127.0.0.1:{}", port),
        readings: Arc::new(Mutex::new(initial)),
        writes: Arc::new(AtomicUsize::new(0)),
    };

    let router = Router::new()
        .route("/dataListrik", get(upstream_list).post(upstream_create))
        .route("/dataListrik/:username", put(upstream_update).delete(upstream_delete))
        .with_state(upstream.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(upstream)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", ADMIN_TEMAN) || v == format!("Bearer {}", MEMBER_TEMAN))
        .unwrap_or(false)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "invalid teman token" })))
}

async fn upstream_list(State(up): State<FakeUpstream>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(Value::Array(up.snapshot())))
}

async fn upstream_create(
    State(up): State<FakeUpstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    up.writes.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut readings) = up.readings.lock() {
        readings.push(body.clone());
    }
    (StatusCode::CREATED, Json(body))
}

async fn upstream_update(
    State(up): State<FakeUpstream>,
    Path(username): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    if body["hour"].as_i64().map(|h| !(0..24).contains(&h)).unwrap_or(true) {
        return (StatusCode::UNPROCESSABLE_ENTITY, "hour must be between 0 and 23").into_response();
    }

    up.writes.fetch_add(1, Ordering::SeqCst);
    let Ok(mut readings) = up.readings.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    match readings.iter_mut().find(|r| r["username"] == username.as_str()) {
        Some(slot) => {
            // Fields missing from the body keep their stored values
            if let (Some(stored), Value::Object(fields)) = (slot.as_object_mut(), body) {
                stored.extend(fields);
            }
            (StatusCode::OK, Json(slot.clone())).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response(),
    }
}

/// Replies in plain text on success
async fn upstream_delete(
    State(up): State<FakeUpstream>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    if !authorized(&headers) {
        return unauthorized().into_response();
    }

    up.writes.fetch_add(1, Ordering::SeqCst);
    let Ok(mut readings) = up.readings.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let before = readings.len();
    readings.retain(|r| r["username"] != username.as_str());
    if readings.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response();
    }
    (StatusCode::OK, format!("{} deleted", username)).into_response()
}
