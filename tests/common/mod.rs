#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use letterbox::libs::server::state::State;
use letterbox::{router, Settings};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// A store rooted in its own temporary directory, removed on drop.
pub struct TestEnv {
    pub dir: TempDir,
    pub state: Arc<State>,
}

impl TestEnv {
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Names of the body files currently on disk, sorted.
    pub fn letter_files(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.state.letters.root()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn test_settings(dir: &TempDir) -> Settings {
    Settings {
        port: 0,
        database_path: dir.path().join("mail.db").to_string_lossy().into_owned(),
        letters_dir: dir.path().join("letters").to_string_lossy().into_owned(),
    }
}

pub fn setup() -> TestEnv {
    let dir = tempfile::tempdir().expect("Failed to create test directory");
    let state = State::new(test_settings(&dir)).expect("Failed to initialise store");
    TestEnv { dir, state }
}

pub fn ivan_to_anna() -> Value {
    json!({
        "senderFirst": "Ivan",
        "senderLast": "Petrov",
        "senderAddress": "Moscow",
        "recipientFirst": "Anna",
        "recipientLast": "Smith",
        "recipientAddress": "Boston",
        "body": "Hello"
    })
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn post_mail(router: Router, payload: &Value) -> (StatusCode, Value) {
    post_raw(router, payload.to_string()).await
}

pub async fn post_raw(router: Router, payload: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/mails")
        .header("content-type", "application/json")
        .body(Body::from(payload))
        .unwrap();
    send(router, request).await
}

pub async fn list_mails(router: Router) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri("/api/mails")
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}
