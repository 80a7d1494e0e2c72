// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Service layer.

pub mod auth;
pub mod google;
pub mod session;

pub use auth::{AuthService, Credential};
pub use google::GoogleOAuthService;
pub use session::{SessionManager, SESSION_COOKIE};
