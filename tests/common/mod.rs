// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

#![allow(dead_code)]

use automeet::config::Config;
use automeet::routes::create_router;
use automeet::services::GeocodeService;
use automeet::AppState;
use axum::{
    body::Body,
    extract::Query,
    http::{header, HeaderMap, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Create a test app with no backend and an unreachable geocoder.
/// Returns the router and the shared state.
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.geocoder_url = "http://127.0.0.1:9/search".to_string();
    build_app(config)
}

/// Fake hosted services for one test.
pub struct FakeServices {
    pub backend_url: String,
    pub geocoder_url: String,
    pub geocoder_hits: Arc<AtomicUsize>,
}

impl FakeServices {
    pub fn geocoder_hits(&self) -> usize {
        self.geocoder_hits.load(Ordering::SeqCst)
    }
}

/// Create a test app wired to a fake backend and a fake geocoder.
pub async fn create_test_app_with_backend() -> (Router, Arc<AppState>, FakeServices) {
    let fakes = spawn_fakes().await;

    let mut config = Config::test_default();
    config.supabase_url = Some(fakes.backend_url.clone());
    config.supabase_anon_key = Some("anon-key".to_string());
    config.geocoder_url = fakes.geocoder_url.clone();

    let (app, state) = build_app(config);
    (app, state, fakes)
}

fn build_app(config: Config) -> (Router, Arc<AppState>) {
    let mut state = AppState::from_config(config).expect("in-memory state");
    state.geocoder = GeocodeService::new(
        &state.config.geocoder_url,
        &state.config.geocoder_user_agent,
        state.storage.clone(),
    )
    .with_politeness_delay(Duration::ZERO);

    let state = Arc::new(state);
    (create_router(state.clone()), state)
}

/// Drives the router like a browser: keeps the session cookie between calls.
pub struct TestClient {
    app: Router,
    pub cookie: Option<String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send("GET", uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn send(&mut self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Sign in against the fake backend.
    pub async fn login(&mut self, email: &str) -> TestResponse {
        self.post(
            "/api/auth/login",
            json!({ "email": email, "password": FAKE_PASSWORD }),
        )
        .await
    }
}

pub const FAKE_PASSWORD: &str = "secret123";

fn fake_user(email: &str) -> Value {
    let (id, name, role) = match email {
        "admin@example.com" => ("admin", "Alice Admin", Some("admin")),
        _ => ("u1", "Jean Dupont", None),
    };
    json!({
        "id": id,
        "email": email,
        "user_metadata": { "full_name": name },
        "app_metadata": { "role": role },
    })
}

fn fake_profile(id: &str) -> Option<Value> {
    match id {
        "u1" => Some(json!({
            "id": "u1",
            "email": "jean@example.com",
            "full_name": "Jean Dupont",
            "avatar_url": null
        })),
        "admin" => Some(json!({
            "id": "admin",
            "email": "admin@example.com",
            "full_name": "Alice Admin",
            "avatar_url": null
        })),
        _ => None,
    }
}

async fn fake_token(
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if params.get("grant_type").map(String::as_str) != Some("password")
        || password != FAKE_PASSWORD
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })),
        );
    }
    let user = fake_user(email);
    let token = format!("token-{}", user["id"].as_str().unwrap_or_default());
    (
        StatusCode::OK,
        Json(json!({
            "access_token": token,
            "refresh_token": "refresh",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": user,
        })),
    )
}

async fn fake_signup(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    if email == "taken@example.com" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "code": 422, "msg": "User already registered" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": "u-new",
            "email": email,
            "user_metadata": { "full_name": body["data"]["full_name"] },
        })),
    )
}

async fn fake_user_lookup(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    match bearer {
        "Bearer token-u1" => (StatusCode::OK, Json(fake_user("jean@example.com"))),
        "Bearer token-admin" => (StatusCode::OK, Json(fake_user("admin@example.com"))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "invalid JWT" })),
        ),
    }
}

async fn fake_profiles(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let id = params
        .get("id")
        .and_then(|v| v.strip_prefix("eq."))
        .unwrap_or_default();
    if id == "boom" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database exploded" })),
        );
    }
    let rows: Vec<Value> = fake_profile(id).into_iter().collect();
    (StatusCode::OK, Json(Value::Array(rows)))
}

/// Profile id whose upsert the fake backend always rejects.
pub const LOCKED_PROFILE_ID: &str = "locked";

async fn fake_upsert(headers: HeaderMap, Json(rows): Json<Value>) -> (StatusCode, Json<Value>) {
    let prefer = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !prefer.contains("return=representation") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "bad prefer" })));
    }
    if rows[0]["id"] == LOCKED_PROFILE_ID {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "row is locked" })),
        );
    }
    (StatusCode::CREATED, Json(rows))
}

async fn fake_geocode(
    hits: Arc<AtomicUsize>,
    params: HashMap<String, String>,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    let q = params.get("q").map(String::as_str).unwrap_or_default();
    let hit = if q.starts_with("Esplanade du Trocadéro") {
        json!([{ "lat": "48.8616", "lon": "2.2893" }])
    } else if q.starts_with("Circuit des 24 Heures") {
        json!([{ "lat": "47.9560", "lon": "0.2076" }])
    } else if q.starts_with("Grimaldi Forum") {
        json!([{ "lat": "43.7443", "lon": "7.4317" }])
    } else if q.starts_with("Hôtel des Ventes") {
        json!([{ "lat": "somewhere", "lon": "4.83" }])
    } else {
        json!([])
    };
    Json(hit)
}

async fn spawn_fakes() -> FakeServices {
    let geocoder_hits = Arc::new(AtomicUsize::new(0));
    let hits = geocoder_hits.clone();

    let app = Router::new()
        .route("/auth/v1/token", post(fake_token))
        .route("/auth/v1/signup", post(fake_signup))
        .route("/auth/v1/user", get(fake_user_lookup))
        .route("/auth/v1/logout", post(|| async { StatusCode::NO_CONTENT }))
        .route("/rest/v1/profiles", get(fake_profiles).post(fake_upsert))
        .route(
            "/search",
            get(move |Query(params): Query<HashMap<String, String>>| {
                fake_geocode(hits.clone(), params)
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeServices {
        backend_url: format!("http://{}", addr),
        geocoder_url: format!("http://{}/search", addr),
        geocoder_hits,
    }
}
