// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie lifecycle tests against the router.
//!
//! GET /submit renders without touching the store, so these exercise the
//! session middleware end to end with the offline mock database.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;
use whisperwall::services::SESSION_COOKIE;

mod common;

fn get_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
        .body(Body::empty())
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
async fn test_valid_session_reaches_protected_page() {
    let (app, state) = common::create_test_app();
    let token = state.sessions.establish("local:alice").unwrap();

    let response = app
        .oneshot(get_with_cookie("/submit", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_token_redirects_to_login() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(get_with_cookie("/submit", "never-issued-token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_logout_invalidates_replayed_token() {
    let (app, state) = common::create_test_app();
    let token = state.sessions.establish("local:alice").unwrap();

    // Session works before logout
    let response = app
        .clone()
        .oneshot(get_with_cookie("/submit", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Logout terminates the session and clears the cookie
    let response = app
        .clone()
        .oneshot(get_with_cookie("/logout", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(set_cookie.starts_with(&format!("{}=", SESSION_COOKIE)));
    assert!(set_cookie.contains("Max-Age=0"));

    // Replaying the old token stays unauthenticated
    let response = app
        .oneshot(get_with_cookie("/submit", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_terminated_session_redirects_to_login() {
    let (app, state) = common::create_test_app();
    let token = state.sessions.establish("local:alice").unwrap();

    state.sessions.terminate(&token);

    let response = app
        .oneshot(get_with_cookie("/submit", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_logout_cookie_removal_attributes() {
    let (app, state) = common::create_test_app();
    let token = state.sessions.establish("local:alice").unwrap();

    let response = app
        .oneshot(get_with_cookie("/logout", &token))
        .await
        .unwrap();

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=0"));
    // Removal attributes must match creation: localhost config stays non-Secure
    assert!(!set_cookie.contains("Secure"));
}
