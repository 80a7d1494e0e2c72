// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth client.
//!
//! Handles:
//! - Building the authorization redirect URL
//! - Exchanging an authorization code for tokens
//! - Fetching the OpenID userinfo profile

use serde::Deserialize;

use crate::error::AppError;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Provider name recorded on OAuth-provisioned accounts.
pub const PROVIDER: &str = "google";

/// Google OAuth client.
#[derive(Clone)]
pub struct GoogleOAuthService {
    http: reqwest::Client,
    auth_url: String,
    token_url: String,
    userinfo_url: String,
    client_id: String,
    client_secret: String,
}

impl GoogleOAuthService {
    /// Create a new client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            userinfo_url: USERINFO_URL.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Build the authorization URL the browser is redirected to.
    ///
    /// `state` must already be signed; it round-trips through Google
    /// unchanged and is verified at the callback.
    pub fn authorize_url(&self, callback_url: &str, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope=openid&state={}",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(callback_url),
            state
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        callback_url: &str,
    ) -> Result<GoogleTokens, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", callback_url),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalAuth(format!("Token exchange request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Fetch the authenticated user's OpenID profile.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<GoogleProfile, AppError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalAuth(format!("Userinfo request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalAuth(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalAuth(format!("JSON parse error: {}", e)))
    }
}

/// Token response from Google's token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokens {
    pub access_token: String,
}

/// OpenID userinfo profile.
///
/// `sub` is the provider-assigned subject ID; it is stable per Google
/// account and is all the provisioning path needs.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    pub sub: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_encodes_callback() {
        let google =
            GoogleOAuthService::new("client-123".to_string(), "hunter2-secret".to_string());
        let url = google.authorize_url("http://localhost:3000/auth/google/secrets", "st4te");

        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgoogle%2Fsecrets"));
        assert!(url.contains("state=st4te"));
        assert!(url.contains("response_type=code"));
        // The client secret belongs to the token exchange, never the redirect
        assert!(!url.contains("hunter2"));
    }
}
