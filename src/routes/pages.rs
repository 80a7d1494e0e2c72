// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public page routes.

use axum::{extract::Query, response::Html, routing::get, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::views;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/login", get(login_page))
        .route("/register", get(register_page))
}

/// Error code carried back to a form after a failed attempt.
#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    error: Option<String>,
}

async fn home() -> Html<String> {
    views::home()
}

async fn login_page(Query(query): Query<PageQuery>) -> Html<String> {
    views::login(query.error.as_deref())
}

async fn register_page(Query(query): Query<PageQuery>) -> Html<String> {
    views::register(query.error.as_deref())
}
