// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential verification and account provisioning.
//!
//! Both login paths resolve through one entry point: a [`Credential`] is
//! either a local username/password pair or a verified external OAuth
//! identity, and `authenticate` turns it into a user record or an error.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::User;

/// A claim of identity presented by a client.
pub enum Credential {
    /// Username/password pair from the login form.
    Local { username: String, password: String },
    /// Identity assertion already verified with an external provider.
    ExternalOAuth { provider: String, subject: String },
}

/// Verifies credentials and provisions accounts against the user store.
#[derive(Clone)]
pub struct AuthService {
    db: FirestoreDb,
}

impl AuthService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Register a new local account.
    ///
    /// The plaintext password never reaches the store; a fresh random salt
    /// and Argon2id hash are derived first. A taken username surfaces as
    /// `Conflict` from the store's create-only insert, leaving the existing
    /// record untouched.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        let password_hash = hash_password(password.to_string()).await?;
        let user = User::new_local(username, password_hash);
        self.db.create_user(&user).await?;

        tracing::info!(user_id = %user.id, "Registered new local account");
        Ok(user)
    }

    /// Resolve a credential to a user record.
    pub async fn authenticate(&self, credential: Credential) -> Result<User, AppError> {
        match credential {
            Credential::Local { username, password } => {
                self.verify_local(&username, password).await
            }
            Credential::ExternalOAuth { provider, subject } => {
                self.find_or_create_external(&provider, &subject).await
            }
        }
    }

    /// Verify a username/password pair.
    ///
    /// An unknown username and a wrong password are indistinguishable to
    /// the caller; both come back as `InvalidCredentials`. No writes.
    async fn verify_local(&self, username: &str, password: String) -> Result<User, AppError> {
        let user = self
            .db
            .get_user(&User::local_doc_id(username))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hash = user
            .password_hash
            .clone()
            .ok_or(AppError::InvalidCredentials)?;

        if verify_password(password, hash).await? {
            Ok(user)
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    /// Find or create an account for an external identity.
    ///
    /// The store's create-only insert on the `{provider}:{subject}`
    /// document ID is the arbiter under concurrent first logins: the loser
    /// of the race reads back the winner's document.
    async fn find_or_create_external(
        &self,
        provider: &str,
        subject: &str,
    ) -> Result<User, AppError> {
        let user_id = User::external_doc_id(provider, subject);

        if let Some(user) = self.db.get_user(&user_id).await? {
            return Ok(user);
        }

        let user = User::new_external(provider, subject);
        match self.db.create_user(&user).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "Provisioned account from OAuth identity");
                Ok(user)
            }
            Err(AppError::Conflict) => {
                self.db.get_user(&user_id).await?.ok_or_else(|| {
                    AppError::Database(format!("User {} vanished after insert conflict", user_id))
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// Argon2 is CPU-bound; both helpers run on the blocking pool so request
/// tasks keep yielding.
async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("hashing task failed: {}", e)))?
    .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {}", e)))
}

/// Verify a password against a stored PHC hash string.
async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("verification task failed: {}", e)))?
    .map_err(|e| AppError::Internal(anyhow::anyhow!("password verification failed: {}", e)))
}
