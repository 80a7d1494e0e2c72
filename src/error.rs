// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with redirect-based recovery.
//!
//! Auth failures are never surfaced as structured payloads; the route layer
//! recovers them into 302 redirects back to the originating form. Store and
//! internal failures become a minimal 500 page.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username is already registered")]
    Conflict,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("External authentication failed: {0}")]
    ExternalAuth(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 302 Found redirect.
///
/// axum's `Redirect` only offers 303/307/308; browser form flows use 302.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidCredentials => found("/login?error=invalid_credentials"),
            AppError::Conflict => found("/register?error=username_taken"),
            AppError::Unauthenticated => found("/login"),
            AppError::ExternalAuth(msg) => {
                tracing::warn!(error = %msg, "External authentication failed");
                found("/login?error=google")
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                error_page()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                error_page()
            }
        }
    }
}

fn error_page() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(
            "<!DOCTYPE html><html><body><h1>Something went wrong</h1>\
             <p><a href=\"/\">Home</a></p></body></html>"
                .to_string(),
        ),
    )
        .into_response()
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
