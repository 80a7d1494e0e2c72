// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login, logout and the Google OAuth flow.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use validator::Validate;

use crate::error::{found, AppError, Result};
use crate::services::{google, Credential, SESSION_COOKIE};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/auth/google", get(google_start))
        .route("/auth/google/secrets", get(google_callback))
}

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// OAuth state older than this is rejected at the callback.
const STATE_MAX_AGE_MS: u128 = 10 * 60 * 1000;

// ─── Local Accounts ──────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 3, max = 32))]
    username: String,
    #[validate(length(min = 8, max = 128))]
    password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

/// Create an account, establish a session, and land on the secrets board.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    if form.validate().is_err() {
        return Ok(found("/register?error=invalid"));
    }

    let user = state.auth.register(&form.username, &form.password).await?;
    establish_session(&state, jar, &user.id)
}

/// Verify credentials and establish a session.
///
/// Verification always goes through the credential verifier; a session is
/// only ever established for a password that matched the stored hash.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let user = state
        .auth
        .authenticate(Credential::Local {
            username: form.username,
            password: form.password,
        })
        .await?;

    establish_session(&state, jar, &user.id)
}

/// Terminate the session and clear the cookie. No-op without a session.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.terminate(cookie.value());
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (jar, found("/")).into_response()
}

/// Bind a fresh session token into the cookie jar and redirect to /secrets.
fn establish_session(state: &AppState, jar: CookieJar, user_id: &str) -> Result<Response> {
    let token = state.sessions.establish(user_id)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookies_secure())
        .max_age(time::Duration::hours(state.config.session_ttl_hours))
        .build();

    Ok((jar.add(cookie), found("/secrets")).into_response())
}

// ─── Google OAuth ────────────────────────────────────────────

/// Start the OAuth flow - redirect to Google authorization.
async fn google_start(State(state): State<Arc<AppState>>) -> Result<Response> {
    let oauth_state = sign_state(&state.config.oauth_state_key)?;
    let url = state
        .google
        .authorize_url(&state.config.oauth_callback_url(), &oauth_state);

    tracing::info!("Starting OAuth flow, redirecting to Google");
    Ok(found(&url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code, find-or-create the user, create session.
async fn google_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<Response> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        return Ok(found("/login?error=google"));
    }

    let (Some(code), Some(oauth_state)) = (params.code, params.state) else {
        tracing::warn!("OAuth callback missing code or state");
        return Ok(found("/login?error=google"));
    };

    if !verify_state(&oauth_state, &state.config.oauth_state_key) {
        tracing::warn!("Invalid, tampered or expired OAuth state parameter");
        return Ok(found("/login?error=google"));
    }

    tracing::info!("Exchanging authorization code for tokens");
    let tokens = state
        .google
        .exchange_code(&code, &state.config.oauth_callback_url())
        .await?;
    let profile = state.google.fetch_profile(&tokens.access_token).await?;

    let user = state
        .auth
        .authenticate(Credential::ExternalOAuth {
            provider: google::PROVIDER.to_string(),
            subject: profile.sub,
        })
        .await?;

    establish_session(&state, jar, &user.id)
}

/// Sign a timestamped OAuth state parameter.
///
/// Format before encoding: "timestamp_hex|signature_hex", base64url-encoded
/// for the URL.
fn sign_state(secret: &[u8]) -> Result<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    let payload = format!("{:x}", timestamp);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    let signed_state = format!("{}|{}", payload, hex::encode(signature));
    Ok(URL_SAFE_NO_PAD.encode(signed_state.as_bytes()))
}

/// Verify the HMAC signature and freshness of an OAuth state parameter.
fn verify_state(state: &str, secret: &[u8]) -> bool {
    let Some(timestamp_ms) = verify_and_decode_state(state, secret) else {
        return false;
    };

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    now_ms.saturating_sub(timestamp_ms) <= STATE_MAX_AGE_MS
}

/// Verify the signature and decode the timestamp from the state parameter.
fn verify_and_decode_state(state: &str, secret: &[u8]) -> Option<u128> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // Format is "timestamp_hex|signature_hex"
    let parts: Vec<&str> = state_str.splitn(2, '|').collect();
    if parts.len() != 2 {
        return None;
    }

    let timestamp_hex = parts[0];
    let signature_hex = parts[1];

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(timestamp_hex.as_bytes());

    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if signature_hex != expected_signature {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    u128::from_str_radix(timestamp_hex, 16).ok()
}
