// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication: login completion, token resolution and logout.
//!
//! Sessions are stored under the SHA-256 of their bearer token. Expiry is
//! checked on every lookup; expired rows are left in place.

use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Session, User};
use crate::services::login_exchange::LoginExchangeClient;

/// How long a new session stays valid.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Document key for a session token.
pub fn token_key(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Session lifecycle on top of the login provider and the database.
#[derive(Clone)]
pub struct SessionService {
    db: FirestoreDb,
    exchange: LoginExchangeClient,
}

impl SessionService {
    pub fn new(db: FirestoreDb, exchange: LoginExchangeClient) -> Self {
        Self { db, exchange }
    }

    /// Resolve a bearer token to its user.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        if token.is_empty() {
            return Err(AppError::Unauthenticated);
        }

        let session = self
            .db
            .get_session(&token_key(token))
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if session.is_expired_at(Utc::now()) {
            tracing::debug!(user_id = %session.user_id, "Rejected expired session");
            return Err(AppError::SessionExpired);
        }

        self.db.get_user(&session.user_id).await?.ok_or_else(|| {
            tracing::warn!(user_id = %session.user_id, "Session references missing user");
            AppError::UserNotFound
        })
    }

    /// Complete a login: exchange the provider's session id, find or create
    /// the user by email, and open a new session.
    ///
    /// Returns the user and the bearer token to hand to the client. An
    /// existing user record is reused as-is.
    pub async fn login(&self, session_id: &str) -> Result<(User, String)> {
        let external = self.exchange.exchange(session_id).await?;

        let user = match self.db.find_user_by_email(&external.email).await? {
            Some(existing) => existing,
            None => {
                let candidate = User {
                    id: external.id,
                    email: external.email,
                    name: external.name,
                    picture: external.picture,
                    created_at: Utc::now(),
                };
                let user = self.db.create_user(&candidate).await?;
                if user.email == candidate.email {
                    tracing::info!(user_id = %user.id, "Created user on first login");
                } else {
                    tracing::warn!(
                        user_id = %user.id,
                        "Provider id already stored under another email; keeping stored user"
                    );
                }
                user
            }
        };

        let now = Utc::now();
        let session = Session {
            user_id: user.id.clone(),
            token_hash: token_key(&external.session_token),
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
            created_at: now,
        };
        self.db.insert_session(&session).await?;

        tracing::info!(user_id = %user.id, "Session created");
        Ok((user, external.session_token))
    }

    /// Delete the session for `token`. Succeeds if it is already gone.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.db.delete_session(&token_key(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(db: &FirestoreDb) -> SessionService {
        SessionService::new(
            db.clone(),
            LoginExchangeClient::new("http://127.0.0.1:9/session-data".to_string()),
        )
    }

    async fn seed(db: &FirestoreDb, token: &str, expires_in: Duration, with_user: bool) {
        let now = Utc::now();
        if with_user {
            db.upsert_user(&User {
                id: "u1".to_string(),
                email: "a@example.com".to_string(),
                name: "A".to_string(),
                picture: None,
                created_at: now,
            })
            .await
            .unwrap();
        }
        db.insert_session(&Session {
            user_id: "u1".to_string(),
            token_hash: token_key(token),
            expires_at: now + expires_in,
            created_at: now,
        })
        .await
        .unwrap();
    }

    #[test]
    fn test_token_key_is_stable_hex() {
        let key = token_key("abc");
        assert_eq!(key.len(), 64);
        assert_eq!(key, token_key("abc"));
        assert_ne!(key, token_key("abd"));
    }

    #[tokio::test]
    async fn test_authenticate_valid_session() {
        let db = FirestoreDb::new_in_memory();
        seed(&db, "tok", Duration::days(1), true).await;

        let user = service(&db).authenticate("tok").await.unwrap();
        assert_eq!(user.id, "u1");
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let db = FirestoreDb::new_in_memory();
        let err = service(&db).authenticate("nope").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_but_kept() {
        let db = FirestoreDb::new_in_memory();
        seed(&db, "old", -Duration::minutes(1), true).await;

        let err = service(&db).authenticate("old").await.unwrap_err();
        assert!(matches!(err, AppError::SessionExpired));
        assert!(db.get_session(&token_key("old")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_orphaned_session_is_user_not_found() {
        let db = FirestoreDb::new_in_memory();
        seed(&db, "orphan", Duration::days(1), false).await;

        let err = service(&db).authenticate("orphan").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let db = FirestoreDb::new_in_memory();
        seed(&db, "tok", Duration::days(1), true).await;
        let sessions = service(&db);

        sessions.logout("tok").await.unwrap();
        sessions.logout("tok").await.unwrap();

        let err = sessions.authenticate("tok").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }
}
