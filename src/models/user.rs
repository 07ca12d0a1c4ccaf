//! User identity and session models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity record stored in Firestore, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Id issued by the login provider (also the document ID)
    pub id: String,
    pub email: String,
    /// Display name
    pub name: String,
    /// Profile picture URL
    #[serde(default)]
    pub picture: Option<String>,
    /// When the user first logged in
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
}

/// Login session, keyed by the SHA-256 of its bearer token.
///
/// The raw token is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    /// Hex SHA-256 of the session token (also the document ID)
    pub token_hash: String,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub expires_at: DateTime<Utc>,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Sessions are valid only while `expires_at` is in the future.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
