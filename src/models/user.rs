//! User model for storage.

use serde::{Deserialize, Serialize};

/// User account stored in Firestore.
///
/// The document ID is the local identity: `local:{username}` for
/// form-registered accounts, `{provider}:{subject}` for OAuth-provisioned
/// ones. Firestore's create-only insert on that ID is what enforces the
/// uniqueness of usernames and of (provider, subject) pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID (also the session-bound user identity)
    pub id: String,
    /// Login name (present only for locally-registered accounts)
    pub username: Option<String>,
    /// Argon2id PHC hash string (present only for locally-registered accounts)
    pub password_hash: Option<String>,
    /// External identity provider (present only for OAuth accounts)
    pub provider: Option<String>,
    /// Provider-assigned subject ID (present only for OAuth accounts)
    pub provider_subject: Option<String>,
    /// Free-text secret, null until the user submits one
    pub secret: Option<String>,
    /// When the account was created
    pub created_at: String,
}

impl User {
    /// Document ID for a locally-registered account.
    pub fn local_doc_id(username: &str) -> String {
        format!("local:{}", username)
    }

    /// Document ID for an OAuth-provisioned account.
    pub fn external_doc_id(provider: &str, subject: &str) -> String {
        format!("{}:{}", provider, subject)
    }

    /// Build a new locally-registered user. No local password is stored in
    /// the clear; callers pass the Argon2 hash.
    pub fn new_local(username: &str, password_hash: String) -> Self {
        Self {
            id: Self::local_doc_id(username),
            username: Some(username.to_string()),
            password_hash: Some(password_hash),
            provider: None,
            provider_subject: None,
            secret: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Build a new OAuth-provisioned user. These accounts have no local
    /// password.
    pub fn new_external(provider: &str, subject: &str) -> Self {
        Self {
            id: Self::external_doc_id(provider, subject),
            username: None,
            password_hash: None,
            provider: Some(provider.to_string()),
            provider_subject: Some(subject.to_string()),
            secret: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_user_shape() {
        let user = User::new_local("alice", "$argon2id$fake".to_string());
        assert_eq!(user.id, "local:alice");
        assert_eq!(user.username.as_deref(), Some("alice"));
        assert!(user.password_hash.is_some());
        assert!(user.provider.is_none());
        assert!(user.secret.is_none());
    }

    #[test]
    fn test_external_user_has_no_password() {
        let user = User::new_external("google", "108204");
        assert_eq!(user.id, "google:108204");
        assert!(user.username.is_none());
        assert!(user.password_hash.is_none());
        assert_eq!(user.provider.as_deref(), Some("google"));
        assert_eq!(user.provider_subject.as_deref(), Some("108204"));
    }
}
