//! Integration tests for the request gateway.
//!
//! Each test runs the gateway against a fresh stub server and checks both
//! what came back and what went over the wire.

#![allow(clippy::unwrap_used)]

use axum::http::Method;
use farm_direct_client::{GatewayError, RequestOptions};
use farm_direct_integration_tests::{StubResponse, TestServer};
use serde_json::{Value, json};

async fn rejected(server: &TestServer, response: StubResponse) -> GatewayError {
    server.respond(Method::GET, "/fail", response);
    server
        .gateway()
        .request::<Value>("/fail", RequestOptions::get())
        .await
        .unwrap_err()
}

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn test_success_body_returned_unchanged() {
    let server = TestServer::start().await;
    let body = json!({
        "success": true,
        "message": "Request Success",
        "data": {"products": [{"id": 1, "name": "Eggs", "price": 3.25}]}
    });
    server.respond_json(Method::GET, "/product", 200, body.clone());

    let value: Value = server
        .gateway()
        .request("/product", RequestOptions::get())
        .await
        .unwrap();

    assert_eq!(value, body);
}

#[tokio::test]
async fn test_url_is_root_plus_endpoint() {
    let server = TestServer::start().await;
    server.respond_json(Method::GET, "/product", 200, json!({}));

    let _: Value = server
        .gateway()
        .request("/product?offset=10&limit=5", RequestOptions::get())
        .await
        .unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.path, "/product");
    assert_eq!(request.query.as_deref(), Some("offset=10&limit=5"));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = TestServer::start().await;
    server.respond(Method::DELETE, "/product/4", StubResponse::text(204, ""));

    let value: Value = server
        .gateway()
        .request("/product/4", RequestOptions::delete())
        .await
        .unwrap();

    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_method_and_body_are_sent() {
    let server = TestServer::start().await;
    server.respond_json(Method::PATCH, "/bulk-request/3", 200, json!({"success": true}));

    let options = RequestOptions::patch().json(&json!({"status": "closed"})).unwrap();
    let _: Value = server
        .gateway()
        .request("/bulk-request/3", options)
        .await
        .unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.json(), json!({"status": "closed"}));
}

// =============================================================================
// Error Messages
// =============================================================================

#[tokio::test]
async fn test_message_field_wins() {
    let server = TestServer::start().await;
    let err = rejected(
        &server,
        StubResponse::json(400, &json!({"message": "A", "detail": "B"})),
    )
    .await;

    assert_eq!(err.to_string(), "A");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_detail_field_used_without_message() {
    let server = TestServer::start().await;
    let err = rejected(&server, StubResponse::json(401, &json!({"detail": "B"}))).await;

    assert_eq!(err.to_string(), "B");
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_status_fallback_for_empty_object() {
    let server = TestServer::start().await;
    let err = rejected(&server, StubResponse::json(500, &json!({}))).await;

    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_non_json_error_body_uses_status_fallback() {
    let server = TestServer::start().await;
    let err = rejected(&server, StubResponse::text(502, "<html>Bad Gateway</html>")).await;

    assert_eq!(err.to_string(), "HTTP error! status: 502");
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_validation_errors_are_joined() {
    let server = TestServer::start().await;
    let body = json!({
        "detail": [
            {"loc": ["body", "price"], "msg": "Input should be greater than 0", "type": "greater_than"},
            {"loc": ["body", "name"], "msg": "Field required", "type": "missing"}
        ]
    });
    let err = rejected(&server, StubResponse::json(422, &body)).await;

    assert_eq!(
        err.to_string(),
        "Input should be greater than 0; Field required"
    );
}

#[tokio::test]
async fn test_unknown_route_reports_detail() {
    let server = TestServer::start().await;
    let err = server
        .gateway()
        .request::<Value>("/nowhere", RequestOptions::get())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Not Found");
    assert_eq!(err.status(), Some(404));
}

// =============================================================================
// Headers
// =============================================================================

#[tokio::test]
async fn test_default_content_type_is_json() {
    let server = TestServer::start().await;
    server.respond_json(Method::GET, "/product/category", 200, json!({}));

    let _: Value = server
        .gateway()
        .request("/product/category", RequestOptions::get())
        .await
        .unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_caller_header_overrides_default() {
    let server = TestServer::start().await;
    server.respond_json(Method::POST, "/upload", 200, json!({}));

    let options = RequestOptions::post()
        .header("Content-Type", "text/plain")
        .unwrap()
        .header("X-Request-Source", "cli")
        .unwrap()
        .body("raw");
    let _: Value = server.gateway().request("/upload", options).await.unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.header_all("content-type"), vec!["text/plain"]);
    assert_eq!(request.header("x-request-source"), Some("cli"));
    assert_eq!(request.body, "raw");
}

#[tokio::test]
async fn test_plain_request_sends_no_authorization() {
    let server = TestServer::start().await;
    server.respond_json(Method::GET, "/product", 200, json!({}));
    let gateway = server.gateway();

    let _: Value = gateway.request("/product", RequestOptions::get()).await.unwrap();
    assert!(server.last_request().unwrap().header("authorization").is_none());

    let _: Value = gateway
        .authenticated_request("/product", RequestOptions::get(), None)
        .await
        .unwrap();
    assert!(server.last_request().unwrap().header("authorization").is_none());

    let _: Value = gateway
        .authenticated_request("/product", RequestOptions::get(), Some(""))
        .await
        .unwrap();
    assert!(server.last_request().unwrap().header("authorization").is_none());
}

#[tokio::test]
async fn test_token_overrides_caller_authorization() {
    let server = TestServer::start().await;
    server.respond_json(Method::GET, "/product/user-products", 200, json!({}));

    let options = RequestOptions::get()
        .header("authorization", "Basic Zm9vOmJhcg==")
        .unwrap();
    let _: Value = server
        .gateway()
        .authenticated_request("/product/user-products", options, Some("t1"))
        .await
        .unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.header_all("authorization"), vec!["Bearer t1"]);
}

#[tokio::test]
async fn test_caller_authorization_kept_without_token() {
    let server = TestServer::start().await;
    server.respond_json(Method::GET, "/product", 200, json!({}));

    let options = RequestOptions::get()
        .header("Authorization", "Bearer from-caller")
        .unwrap();
    let _: Value = server
        .gateway()
        .authenticated_request("/product", options, None)
        .await
        .unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.header("authorization"), Some("Bearer from-caller"));
}
