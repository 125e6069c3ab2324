//! Integration tests for the /api/history routes.
//!
//! Drives the full axum router with in-process requests, round-tripping
//! the history cookie between responses and follow-up requests the way
//! a browser would.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use modelstudio::config::Config;
use modelstudio::server::{router, AppState};
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(Arc::new(Config::load())))
}

fn json_request(method: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/api/history")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request_with_cookie(method: &str, body: Value, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/api/history")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Extracts the `name=value` pair from a Set-Cookie header, the part a
/// browser would send back.
fn cookie_pair(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set the history cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

fn chair_payload() -> Value {
    json!({
        "modelType": "chair",
        "keywords": ["wood", "modern"],
        "prompt": "a wooden chair"
    })
}

#[tokio::test]
async fn test_get_without_cookie_returns_empty_array() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_create_returns_stored_entry_and_sets_cookie() {
    let response = app()
        .oneshot(json_request("POST", chair_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("create should set the history cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("searchHistory="));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=604800"));

    let entry = body_json(response).await;
    assert!(!entry["id"].as_str().unwrap().is_empty());
    assert_eq!(entry["modelType"], "chair");
    assert_eq!(entry["keywords"], json!(["wood", "modern"]));
    assert_eq!(entry["prompt"], "a wooden chair");
    assert!(entry["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_create_then_list_round_trips() {
    let created = app()
        .oneshot(json_request("POST", chair_payload()))
        .await
        .unwrap();
    let cookie = cookie_pair(&created);
    let entry = body_json(created).await;

    let listed = app()
        .oneshot(
            Request::builder()
                .uri("/api/history")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(listed.status(), StatusCode::OK);
    let entries = body_json(listed).await;
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0], entry);
}

#[tokio::test]
async fn test_update_unknown_id_returns_not_found() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            json!({ "id": "no-such-entry", "prompt": "new text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "History entry not found" })
    );
}

#[tokio::test]
async fn test_update_merges_and_preserves_other_fields() {
    let created = app()
        .oneshot(json_request("POST", chair_payload()))
        .await
        .unwrap();
    let cookie = cookie_pair(&created);
    let entry = body_json(created).await;
    let id = entry["id"].as_str().unwrap();

    let updated = app()
        .oneshot(json_request_with_cookie(
            "PUT",
            json!({ "id": id, "prompt": "new text" }),
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(updated.status(), StatusCode::OK);
    let merged_cookie = cookie_pair(&updated);
    let merged = body_json(updated).await;
    assert_eq!(merged["prompt"], "new text");
    assert_eq!(merged["modelType"], "chair");
    assert_eq!(merged["timestamp"], entry["timestamp"]);

    // The refreshed cookie carries the merged entry.
    let listed = app()
        .oneshot(
            Request::builder()
                .uri("/api/history")
                .header(header::COOKIE, &merged_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let entries = body_json(listed).await;
    assert_eq!(entries[0]["prompt"], "new text");
}

#[tokio::test]
async fn test_delete_unknown_id_still_succeeds() {
    let response = app()
        .oneshot(json_request("DELETE", json!({ "id": "nonexistent" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn test_delete_removes_entry_from_subsequent_list() {
    let created = app()
        .oneshot(json_request("POST", chair_payload()))
        .await
        .unwrap();
    let cookie = cookie_pair(&created);
    let id = body_json(created).await["id"].as_str().unwrap().to_string();

    let deleted = app()
        .oneshot(json_request_with_cookie(
            "DELETE",
            json!({ "id": id }),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    let emptied_cookie = cookie_pair(&deleted);

    let listed = app()
        .oneshot(
            Request::builder()
                .uri("/api/history")
                .header(header::COOKIE, &emptied_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(listed).await, json!([]));
}

#[tokio::test]
async fn test_corrupt_cookie_is_served_as_empty_history() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/history")
                .header(header::COOKIE, "searchHistory=not%20json%20at%20all")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

/// Malformed request bodies are rejected client-side, not served as 500s.
#[rstest]
#[case::invalid_json("POST", "{not json")]
#[case::wrong_shape("POST", r#"{"keywords": 7}"#)]
#[case::missing_id_on_update("PUT", r#"{"prompt": "text"}"#)]
#[case::missing_id_on_delete("DELETE", "{}")]
#[tokio::test]
async fn test_malformed_bodies_are_client_errors(#[case] method: &str, #[case] body: &str) {
    let response = app()
        .oneshot(
            Request::builder()
                .method(method)
                .uri("/api/history")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
