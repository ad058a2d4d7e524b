//! Endpoint tests for the deploy webhook and form test handlers.
//!
//! Drives the full router with `oneshot`, so the CORS middleware, method
//! fallbacks and error mapping are all exercised together.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use site_health_hooks::api::routes::{DEPLOY_PATH, FORM_TEST_PATH};
use site_health_hooks::api::{create_router, AppState};
use site_health_hooks::validation::{EMAIL_ERROR, MESSAGE_ERROR, NAME_ERROR};
use site_health_hooks::Config;
use tower::ServiceExt;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

fn test_config() -> Config {
    Config {
        site_id: "site-123".to_string(),
        site_name: "docs".to_string(),
        environment: "staging".to_string(),
        ..Config::default()
    }
}

async fn send(method: Method, uri: &str, body: Body) -> Response {
    let app = create_router(AppState::new(test_config()));
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    app.oneshot(request).await.expect("failed to make request")
}

async fn post_json(uri: &str, payload: Value) -> Response {
    send(Method::POST, uri, Body::from(payload.to_string())).await
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("response should be valid JSON")
}

fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

fn assert_cors(response: &Response) {
    assert_eq!(header(response, "access-control-allow-origin"), Some("*"));
    assert_eq!(
        header(response, "access-control-allow-methods"),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        header(response, "access-control-allow-headers"),
        Some("Content-Type")
    );
}

fn assert_iso_millis(stamp: &str) {
    let format = time::macros::format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );
    assert!(
        time::PrimitiveDateTime::parse(stamp, format).is_ok(),
        "not an ISO timestamp: {}",
        stamp
    );
}

// === CORS preamble ===

#[tokio::test]
async fn options_is_204_with_cors_headers_on_both_endpoints() {
    for path in [DEPLOY_PATH, FORM_TEST_PATH] {
        let response = send(Method::OPTIONS, path, Body::empty()).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_cors(&response);
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn options_ignores_body() {
    let response = send(Method::OPTIONS, FORM_TEST_PATH, Body::from("{not json")).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// === Method handling ===

#[tokio::test]
async fn other_methods_are_405_on_both_endpoints() {
    for path in [DEPLOY_PATH, FORM_TEST_PATH] {
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let response = send(method.clone(), path, Body::empty()).await;

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, path);
            assert_cors(&response);
            assert!(header(&response, "cache-control").is_none());
            assert_eq!(body_json(response).await, json!({"error": "Method not allowed"}));
        }
    }
}

// === Deploy webhook ===

#[tokio::test]
async fn deploy_event_is_acknowledged() {
    let response = post_json(
        DEPLOY_PATH,
        json!({
            "type": "deployment.succeeded",
            "payload": {"deployment": {"id": "dep_1", "url": "https://x.example"}}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(header(&response, "cache-control"), Some(NO_CACHE));

    let body = body_json(response).await;
    assert_eq!(body["status"], "received");
    assert_eq!(body["event_type"], "deployment.succeeded");
    assert_iso_millis(body["received_at"].as_str().expect("received_at is a string"));
}

#[tokio::test]
async fn deploy_without_payload_is_still_acknowledged() {
    let response = post_json(DEPLOY_PATH, json!({"type": "created"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["event_type"], "created");
}

#[tokio::test]
async fn deploy_accepts_unknown_types_and_extra_fields() {
    let response = post_json(
        DEPLOY_PATH,
        json!({"type": "deployment.rolled_back", "payload": {"other": 1}, "extra": true}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["event_type"], "deployment.rolled_back");
}

#[tokio::test]
async fn deploy_without_type_omits_event_type() {
    let response = post_json(DEPLOY_PATH, json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "received");
    assert!(body.get("event_type").is_none());
}

#[tokio::test]
async fn deploy_accepts_numeric_deployment_id() {
    let response = post_json(
        DEPLOY_PATH,
        json!({
            "type": "deployment.succeeded",
            "payload": {"deployment": {"id": 12345, "url": "https://x.example"}}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["event_type"], "deployment.succeeded");
}

#[tokio::test]
async fn deploy_echoes_non_string_type() {
    let response = post_json(DEPLOY_PATH, json!({"type": 42})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "received");
    assert_eq!(body["event_type"], json!(42));
}

#[tokio::test]
async fn deploy_accepts_non_object_payload() {
    for payload in [json!("oops"), json!(7), json!([1, 2]), json!(null)] {
        let response = post_json(DEPLOY_PATH, json!({"type": "created", "payload": payload})).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["event_type"], "created");
    }
}

#[tokio::test]
async fn deploy_accepts_non_object_deployment() {
    let response = post_json(
        DEPLOY_PATH,
        json!({"type": "ready", "payload": {"deployment": "dep_1"}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn deploy_non_object_body_is_500() {
    for raw in ["null", "[]", "42"] {
        let response = send(Method::POST, DEPLOY_PATH, Body::from(raw)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "body {}", raw);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert!(!body["error"].as_str().unwrap_or_default().is_empty());
    }
}

#[tokio::test]
async fn deploy_malformed_body_is_500() {
    let response = send(Method::POST, DEPLOY_PATH, Body::from("{\"type\":")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    assert!(header(&response, "cache-control").is_none());

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn deploy_empty_body_is_500() {
    let response = send(Method::POST, DEPLOY_PATH, Body::empty()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["status"], "error");
}

// === Form test ===

#[tokio::test]
async fn boundary_submission_passes() {
    let response = post_json(
        FORM_TEST_PATH,
        json!({"name": "Al", "email": "a@b.com", "message": "1234567890"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(header(&response, "cache-control"), Some(NO_CACHE));

    let body = body_json(response).await;
    assert_eq!(body["status"], "validation_passed");
    assert_eq!(body["message"], "Test submission would succeed");
    assert_iso_millis(body["validated_at"].as_str().expect("validated_at is a string"));
}

#[tokio::test]
async fn invalid_submission_lists_every_error_in_order() {
    let response = post_json(
        FORM_TEST_PATH,
        json!({"name": "A", "email": "not-an-email", "message": "short"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert!(header(&response, "cache-control").is_none());

    let body = body_json(response).await;
    assert_eq!(body["status"], "validation_failed");
    assert_eq!(body["errors"], json!([NAME_ERROR, EMAIL_ERROR, MESSAGE_ERROR]));
    assert_iso_millis(body["validated_at"].as_str().expect("validated_at is a string"));
}

#[tokio::test]
async fn missing_fields_fail_validation() {
    let response = post_json(FORM_TEST_PATH, json!({"email": "a@b.com"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"], json!([NAME_ERROR, MESSAGE_ERROR]));
}

#[tokio::test]
async fn unparsable_form_body_is_500() {
    for raw in ["not json", "null", "[]"] {
        let response = send(Method::POST, FORM_TEST_PATH, Body::from(raw)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "body {}", raw);
        assert_cors(&response);

        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert!(!body["error"].as_str().unwrap_or_default().is_empty());
    }
}

#[tokio::test]
async fn non_string_form_fields_fail_validation() {
    let response = post_json(
        FORM_TEST_PATH,
        json!({"name": "Al", "email": 5, "message": "1234567890"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"], json!([EMAIL_ERROR]));

    let response = post_json(FORM_TEST_PATH, json!({"name": 5, "email": "a@b.com", "message": null})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"], json!([NAME_ERROR, MESSAGE_ERROR]));
}

// === Idempotence ===

#[tokio::test]
async fn repeated_requests_have_identical_status_and_shape() {
    fn keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<String> = value
            .as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    let cases = [
        (DEPLOY_PATH, json!({"type": "deployment.ready"})),
        (FORM_TEST_PATH, json!({"name": "Al", "email": "a@b.com", "message": "1234567890"})),
        (FORM_TEST_PATH, json!({"name": "A", "email": "x", "message": "y"})),
    ];

    for (path, payload) in cases {
        let first = post_json(path, payload.clone()).await;
        let second = post_json(path, payload).await;

        assert_eq!(first.status(), second.status());

        let first = body_json(first).await;
        let second = body_json(second).await;
        assert_eq!(keys(&first), keys(&second));
        assert_eq!(first["status"], second["status"]);
    }
}
