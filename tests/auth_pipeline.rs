//! End-to-end tests for the route guard.
//!
//! Drives the composed pipeline (header extraction → JWKS verification →
//! permission check) through a real axum router with locally signed RS256
//! tokens and a preloaded key set. No network, no database: the handler
//! behind the guard just echoes the claims it received.

mod common;

use axum::{Json, Router, http::StatusCode, routing::get};
use coffeeshop_api::api::v1::extractors::AuthClaims;
use coffeeshop_api::middleware::auth::access;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{authenticator, base_claims, read_json, request, sign};

async fn echo_claims(AuthClaims(claims): AuthClaims) -> Json<Value> {
    Json(json!({
        "success": true,
        "sub": claims.sub,
        "permissions": claims.permissions,
    }))
}

fn app(permission: &'static str) -> Router {
    let auth = authenticator();
    Router::new().route(
        "/drinks-detail",
        access::require(get(echo_claims), &auth, permission),
    )
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let response = app("get:drinks-detail")
        .oneshot(request("/drinks-detail", None))
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(401));
    assert_eq!(body["message"], json!("authorization header is expected"));
}

#[tokio::test]
async fn basic_scheme_is_unauthorized() {
    let response = app("get:drinks-detail")
        .oneshot(request("/drinks-detail", Some("Basic abc123")))
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        json!("authorization header must use the Bearer scheme")
    );
}

#[tokio::test]
async fn undecodable_token_is_unauthorized() {
    let response = app("get:drinks-detail")
        .oneshot(request("/drinks-detail", Some("Bearer abc.def.ghi")))
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("unable to parse authentication token"));
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let mut claims = base_claims(Some(vec!["get:drinks-detail"]));
    claims["exp"] = json!(chrono::Utc::now().timestamp() - 3600);
    let token = sign(&claims);

    let response = app("get:drinks-detail")
        .oneshot(request("/drinks-detail", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("token is expired"));
}

#[tokio::test]
async fn token_without_permissions_claim_is_unauthorized() {
    let token = sign(&base_claims(None));

    let response = app("get:drinks-detail")
        .oneshot(request("/drinks-detail", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("permissions not included in token"));
}

#[tokio::test]
async fn missing_permission_is_forbidden_and_idempotent() {
    let token = sign(&base_claims(Some(vec!["get:drinks-detail"])));
    let app = app("delete:drinks");

    // Same request, same failure, no matter how often it is repeated.
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request("/drinks-detail", Some(&format!("Bearer {token}"))))
            .await
            .unwrap();

        let (status, body) = read_json(response).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!(403));
        assert_eq!(body["message"], json!("permission not found"));
    }
}

#[tokio::test]
async fn valid_token_reaches_the_handler_with_its_claims() {
    let token = sign(&base_claims(Some(vec!["get:drinks-detail", "post:drinks"])));

    let response = app("get:drinks-detail")
        .oneshot(request("/drinks-detail", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["sub"], json!("auth0|barista"));
    assert_eq!(
        body["permissions"],
        json!(["get:drinks-detail", "post:drinks"])
    );
}
