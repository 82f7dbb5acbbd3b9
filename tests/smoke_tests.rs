//! Smoke tests for the full path: Radarr request -> adapter -> HTTP Watcher3.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use watcharr::clients::watcher3::{SourceApi, SourceError, WatcherClient};
use watcharr::config::{Config, Watcher3Config};

const API_KEY: &str = "smoke-test-key";

async fn fake_watcher3(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.get("apikey").map(String::as_str) != Some(API_KEY) {
        return Json(json!({ "response": false, "error": "Incorrect API key." }));
    }

    Json(match params.get("mode").map(String::as_str) {
        Some("getconfig") => json!({
            "response": true,
            "config": {
                "Postprocessing": { "moverpath": "/nonexistent/smoke/movies/{title}" },
                "Quality": { "Profiles": { "Default": { "Sources": { "WebDL-720P": [true, 3] } } } }
            }
        }),
        Some("liststatus") => json!({
            "response": true,
            "movies": [{
                "tmdbid": params.get("tmdbid").cloned().unwrap_or_else(|| "11".to_string()),
                "imdbid": "tt0076759",
                "title": "Star Wars",
                "year": 1977
            }]
        }),
        Some("version") => json!({ "response": true, "version": "3.0.1" }),
        _ => json!({ "response": false, "error": "Invalid mode" }),
    })
}

/// Serves a minimal Watcher3 `/api` on a free local port.
async fn spawn_watcher3() -> Watcher3Config {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let app = Router::new().route("/api", get(fake_watcher3));
        axum::serve(listener, app).await.unwrap();
    });

    Watcher3Config {
        host: "127.0.0.1".to_string(),
        port,
        apikey: API_KEY.to_string(),
        request_timeout_seconds: 5,
        ..Watcher3Config::default()
    }
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_adapter_against_http_watcher3() {
    let watcher3 = spawn_watcher3().await;

    let (client, watcher_config) = WatcherClient::connect(&watcher3).await.unwrap();
    assert_eq!(watcher_config.root_folder(), "/nonexistent/smoke/movies");

    let mut config = Config::default();
    config.watcher3 = watcher3;
    let state = watcharr::api::create_app_state(Arc::new(client), watcher_config, &config);
    let app = watcharr::api::router(state);

    let (status, body) = get_json(&app, "/api/v3/system/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "version": "3.0.1" }));

    let (status, body) = get_json(&app, "/api/v3/movie/11").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tmdbId"], 11);
    assert_eq!(body["year"], 1977);

    let (status, body) = get_json(&app, "/api/v3/qualityProfile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["items"][0]["quality"]["resolution"], 720);

    let (status, body) = get_json(&app, "/api/v3/rootfolder").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["path"], "/nonexistent/smoke/movies");
}

#[tokio::test]
async fn test_connect_requires_configuration() {
    let mut watcher3 = spawn_watcher3().await;
    watcher3.apikey = "wrong-key".to_string();

    let result = WatcherClient::connect(&watcher3).await;
    assert!(matches!(result, Err(SourceError::MissingPayload(_))));
}

#[tokio::test]
async fn test_unparseable_body_is_returned_as_text() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let app = Router::new().route("/api", get(|| async { "<html>Bad Gateway</html>" }));
        axum::serve(listener, app).await.unwrap();
    });

    let client = WatcherClient::new(&Watcher3Config {
        host: "127.0.0.1".to_string(),
        port,
        ..Watcher3Config::default()
    })
    .unwrap();

    let response = client.get_data("version", &[]).await.unwrap();
    assert!(!response.is_success());
    assert_eq!(response.error_message(), Some("<html>Bad Gateway</html>"));
}
