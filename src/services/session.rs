// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process session store.
//!
//! Sessions map an opaque token (held by the client in a cookie) to a user
//! identity with an expiry. Tokens are 32 bytes from the system CSPRNG,
//! URL-safe base64 encoded; they carry no user information themselves.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::AppError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "whisperwall_session";

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
struct Session {
    user_id: String,
    expires_at: DateTime<Utc>,
}

/// Issues, resolves and terminates session tokens.
pub struct SessionManager {
    sessions: DashMap<String, Session>,
    ttl: Duration,
    rng: SystemRandom,
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            rng: SystemRandom::new(),
        }
    }

    /// Create a new session bound to `user_id` and return its token.
    pub fn establish(&self, user_id: &str) -> Result<String, AppError> {
        self.sweep();

        let mut bytes = [0u8; TOKEN_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("session token generation failed")))?;
        let token = URL_SAFE_NO_PAD.encode(bytes);

        self.sessions.insert(
            token.clone(),
            Session {
                user_id: user_id.to_string(),
                expires_at: Utc::now() + self.ttl,
            },
        );

        Ok(token)
    }

    /// Resolve a token to the bound user identity.
    ///
    /// Expired tokens are treated as absent and evicted.
    pub fn current_identity(&self, token: &str) -> Option<String> {
        let session = self.sessions.get(token)?;
        if session.expires_at > Utc::now() {
            return Some(session.user_id.clone());
        }
        drop(session);
        self.sessions.remove(token);
        None
    }

    /// Invalidate a session. Terminating an unknown or already-terminated
    /// token is not an error.
    pub fn terminate(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Drop all expired sessions. Runs opportunistically on establish.
    fn sweep(&self) {
        let now = Utc::now();
        self.sessions.retain(|_, session| session.expires_at > now);
    }
}
