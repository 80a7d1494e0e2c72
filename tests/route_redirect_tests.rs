// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route-layer gating tests.
//!
//! These run against the offline mock store: every case here must resolve
//! before any database call would happen.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[tokio::test]
async fn test_secrets_redirects_to_login_without_session() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(get("/secrets")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_submit_form_redirects_to_login_without_session() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(get("/submit")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_submit_post_redirects_to_login_without_session() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(post_form("/submit", "secret=psst"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_public_pages_render() {
    let (app, _) = common::create_test_app();

    for uri in ["/", "/login", "/register", "/health"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {} should be 200", uri);
    }
}

#[tokio::test]
async fn test_login_page_shows_error_banner() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(get("/login?error=invalid_credentials"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Invalid username or password."));
}

#[tokio::test]
async fn test_register_validation_redirects_back() {
    let (app, _) = common::create_test_app();

    // Password below the minimum length never reaches the store
    let response = app
        .oneshot(post_form("/register", "username=alice&password=short"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/register?error=invalid");
}

#[tokio::test]
async fn test_logout_without_session_is_noop_redirect() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(get("/logout")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");

    // The cookie is cleared either way
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(set_cookie.starts_with("whisperwall_session="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_google_start_redirects_to_provider() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(get("/auth/google")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let target = location(&response);
    assert!(target.starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
    assert!(target.contains("state="));
}

#[tokio::test]
async fn test_google_callback_provider_error_bounces_to_login() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(get("/auth/google/secrets?error=access_denied"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login?error=google");
}

#[tokio::test]
async fn test_google_callback_rejects_forged_state() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(get("/auth/google/secrets?code=abc&state=forged"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login?error=google");
}
