// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Secrets board routes (session required).
//!
//! The session middleware is applied in routes/mod.rs for these routes.

use axum::{
    extract::State,
    response::{Html, Response},
    routing::get,
    Extension, Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{found, Result};
use crate::middleware::auth::AuthUser;
use crate::views;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/secrets", get(list_secrets))
        .route("/submit", get(submit_page).post(submit_secret))
}

/// List every submitted secret. Only the secret text is rendered; the
/// owning accounts stay anonymous.
async fn list_secrets(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let secrets = state.db.list_secrets().await?;
    Ok(views::secrets(&secrets))
}

async fn submit_page() -> Html<String> {
    views::submit()
}

#[derive(Deserialize)]
pub struct SubmitForm {
    secret: String,
}

/// Overwrite the caller's own secret, then back to the board.
async fn submit_secret(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Form(form): Form<SubmitForm>,
) -> Result<Response> {
    let secret = form.secret.trim();
    if secret.is_empty() {
        return Ok(found("/submit"));
    }

    state.db.set_secret(&user.user_id, secret).await?;
    tracing::info!(user_id = %user.user_id, "Secret submitted");

    Ok(found("/secrets"))
}
