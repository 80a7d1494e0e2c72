// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Whisperwall: an anonymous secrets board.
//!
//! This crate provides a small web application with local and Google
//! sign-in against a Firestore user store, and a secrets feature gated
//! behind a session cookie.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

use config::Config;
use db::FirestoreDb;
use services::{AuthService, GoogleOAuthService, SessionManager};

/// Shared application state.
///
/// Constructed once at startup and handed to the route layer; nothing here
/// is a process-global.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub sessions: SessionManager,
    pub auth: AuthService,
    pub google: GoogleOAuthService,
}
