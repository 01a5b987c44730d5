//! Shared helpers for survey-api integration tests.

#![allow(dead_code)]

use survey_api::{build_router, AppState, ServerConfig};

/// Bind the full router on an ephemeral port and return its base URL.
pub async fn spawn_app(config: ServerConfig) -> String {
    let state = AppState::new(config).expect("Failed to build app state");
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Router with forwarding disabled.
pub async fn spawn_default_app() -> String {
    spawn_app(ServerConfig::default()).await
}

/// Router forwarding to `webhook_url`.
pub async fn spawn_app_with_webhook(webhook_url: &str) -> String {
    spawn_app(ServerConfig {
        webhook_url: Some(webhook_url.to_string()),
        webhook_timeout: std::time::Duration::from_secs(2),
        ..ServerConfig::default()
    })
    .await
}

/// POST a raw body to the submit endpoint.
pub async fn post_raw(base_url: &str, body: impl Into<reqwest::Body>) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/submit", base_url))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("request failed")
}

/// POST a JSON value to the submit endpoint.
pub async fn post_json(base_url: &str, body: &serde_json::Value) -> reqwest::Response {
    post_raw(base_url, body.to_string()).await
}
