#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// In-memory database with the full schema applied. A single connection so
/// every handler sees the same memory database.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub async fn create_test_app() -> (Router, SqlitePool) {
    let pool = setup_test_db().await;
    let app = microblog::create_app(pool.clone());
    (app, pool)
}

/// Drive one request through the router and decode the JSON response.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Send a body that is not valid JSON, for 400-path tests.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: &'static str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

/// Insert an article row directly, bypassing the API, with a known id.
pub async fn seed_article(pool: &SqlitePool, id: &str, user_id: &str) {
    sqlx::query(
        "INSERT INTO articles (id, user_id, content, likes) VALUES (?1, ?2, 'seed content', 0)",
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();
}

/// Insert a user row directly with a known id.
pub async fn seed_user(pool: &SqlitePool, id: &str, email: &str) {
    sqlx::query("INSERT INTO users (id, email, firstname, lastname) VALUES (?1, ?2, 'Ada', 'L')")
        .bind(id)
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
}
