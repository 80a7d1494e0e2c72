// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;
use whisperwall::config::Config;
use whisperwall::db::FirestoreDb;
use whisperwall::routes::create_router;
use whisperwall::services::{AuthService, GoogleOAuthService, SessionManager};
use whisperwall::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Build the app around a given database.
/// Returns the router and the shared state.
pub fn build_app(db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let sessions = SessionManager::new(chrono::Duration::hours(config.session_ttl_hours));
    let auth = AuthService::new(db.clone());
    let google = GoogleOAuthService::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    );

    let state = Arc::new(AppState {
        config,
        db,
        sessions,
        auth,
        google,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with offline mock dependencies.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(test_db_offline())
}

/// Create a test app against the Firestore emulator.
#[allow(dead_code)]
pub async fn create_test_app_with_emulator() -> (axum::Router, Arc<AppState>) {
    build_app(test_db().await)
}
