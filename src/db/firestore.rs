// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users and login sessions
//! - Profiles (including the stored Prakriti analysis)
//! - Materialized diet plans and daily schedules
//! - Follow-up log entries
//!
//! The same operations run against [`MemoryStore`] when the handle is
//! created with [`FirestoreDb::new_in_memory`].

use crate::db::{collections, MemoryStore};
use crate::error::AppError;
use crate::models::{
    DailySchedule, DietPlan, Dosha, FollowUp, PrakritiAnalysis, Session, User, UserProfile,
};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;

/// Profile fields written by a questionnaire submission.
const ANALYSIS_FIELDS: [&str; 4] = ["user_id", "prakriti_type", "prakriti_analysis", "updated_at"];

/// Result row of a count aggregation.
#[derive(Deserialize)]
struct CountRow {
    #[serde(default)]
    count: u64,
}

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(Arc<MemoryStore>),
}

/// Process-wide database handle. Cheap to clone.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

fn db_err(e: impl std::fmt::Display) -> AppError {
    AppError::Database(e.to_string())
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, database_id: &str) -> Result<Self, AppError> {
        let options = firestore::FirestoreDbOptions::new(project_id.to_string())
            .with_database_id(database_id.to_string());

        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id, options).await;
        }

        let client = firestore::FirestoreDb::with_options(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(
            project = project_id,
            database = database_id,
            "Connected to Firestore"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(
        project_id: &str,
        options: firestore::FirestoreDbOptions,
    ) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a database backed by an in-process document store.
    ///
    /// Used by tests and offline development; contents live as long as the handle.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    // ─── Generic Document Operations ─────────────────────────────

    async fn get_doc<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collection)
                .obj()
                .one(id)
                .await
                .map_err(db_err),
            Backend::Memory(store) => store.get(collection, id),
        }
    }

    async fn set_doc<T>(&self, collection: &str, id: &str, obj: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(client) => {
                let _: T = client
                    .fluent()
                    .update()
                    .in_col(collection)
                    .document_id(id)
                    .object(obj)
                    .execute()
                    .await
                    .map_err(db_err)?;
                Ok(())
            }
            Backend::Memory(store) => store.set(collection, id, obj),
        }
    }

    /// Create a document unless one already exists. Returns `false` on conflict.
    async fn create_doc<T>(&self, collection: &str, id: &str, obj: &T) -> Result<bool, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(client) => {
                let result: Result<T, _> = client
                    .fluent()
                    .insert()
                    .into(collection)
                    .document_id(id)
                    .object(obj)
                    .execute()
                    .await;
                match result {
                    Ok(_) => Ok(true),
                    Err(firestore::errors::FirestoreError::DataConflictError(_)) => Ok(false),
                    Err(e) => Err(db_err(e)),
                }
            }
            Backend::Memory(store) => store.create(collection, id, obj),
        }
    }

    /// Create-if-absent, returning whichever document ends up stored.
    async fn create_or_get<T>(&self, collection: &str, id: &str, obj: &T) -> Result<T, AppError>
    where
        T: Clone + Serialize + DeserializeOwned + Send + Sync,
    {
        if self.create_doc(collection, id, obj).await? {
            return Ok(obj.clone());
        }
        tracing::debug!(collection, id, "Document already existed, returning stored copy");
        self.get_doc(collection, id).await?.ok_or_else(|| {
            AppError::Database(format!("{}/{} missing after create conflict", collection, id))
        })
    }

    /// Upsert only the named fields of `obj`.
    async fn merge_doc<T>(
        &self,
        collection: &str,
        id: &str,
        obj: &T,
        fields: &[&str],
    ) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(client) => {
                let _: T = client
                    .fluent()
                    .update()
                    .fields(fields.iter().copied())
                    .in_col(collection)
                    .document_id(id)
                    .object(obj)
                    .execute()
                    .await
                    .map_err(db_err)?;
                Ok(())
            }
            Backend::Memory(store) => store.merge(collection, id, obj, fields),
        }
    }

    async fn delete_doc(&self, collection: &str, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(id)
                    .execute()
                    .await
                    .map_err(db_err)?;
                Ok(())
            }
            Backend::Memory(store) => {
                store.delete(collection, id);
                Ok(())
            }
        }
    }

    /// Query a collection with an optional equality filter, descending
    /// order on one field and a result cap.
    async fn query_docs<T>(
        &self,
        collection: &'static str,
        filter: Option<(&'static str, String)>,
        order_desc: Option<&'static str>,
        limit: Option<u32>,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match &self.backend {
            Backend::Firestore(client) => {
                let order: Vec<(&str, firestore::FirestoreQueryDirection)> = order_desc
                    .into_iter()
                    .map(|field| (field, firestore::FirestoreQueryDirection::Descending))
                    .collect();

                let mut query = client
                    .fluent()
                    .select()
                    .from(collection)
                    .filter(move |q| match &filter {
                        Some((field, value)) => q.field(*field).eq(value.clone()),
                        None => None,
                    })
                    .order_by(order);

                if let Some(limit) = limit {
                    query = query.limit(limit);
                }

                query.obj().query().await.map_err(db_err)
            }
            Backend::Memory(store) => store.query(
                collection,
                filter.as_ref().map(|(field, value)| (*field, value.as_str())),
                order_desc,
                limit,
            ),
        }
    }

    /// Count documents, optionally restricted by an equality filter.
    ///
    /// Firestore runs this as a server-side aggregation; no documents are
    /// transferred.
    async fn count_docs(
        &self,
        collection: &'static str,
        filter: Option<(&'static str, String)>,
    ) -> Result<u64, AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let rows: Vec<CountRow> = client
                    .fluent()
                    .select()
                    .from(collection)
                    .filter(move |q| match &filter {
                        Some((field, value)) => q.field(*field).eq(value.clone()),
                        None => None,
                    })
                    .aggregate(|a| a.fields([a.field("count").count()]))
                    .obj()
                    .query()
                    .await
                    .map_err(db_err)?;
                Ok(rows.first().map(|row| row.count).unwrap_or(0))
            }
            Backend::Memory(store) => Ok(store.count(
                collection,
                filter.as_ref().map(|(field, value)| (*field, value.as_str())),
            ) as u64),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_doc(collections::USERS, user_id).await
    }

    /// Find a user by email address.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .query_docs(
                collections::USERS,
                Some(("email", email.to_string())),
                None,
                Some(1),
            )
            .await?;
        Ok(users.into_iter().next())
    }

    /// Store a new user unless the id is taken; returns the stored record.
    ///
    /// An existing record is returned unchanged.
    pub async fn create_user(&self, user: &User) -> Result<User, AppError> {
        self.create_or_get(collections::USERS, &user.id, user).await
    }

    /// Create or overwrite a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.set_doc(collections::USERS, &user.id, user).await
    }

    /// Newest users first, capped at `limit`.
    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, AppError> {
        self.query_docs(collections::USERS, None, Some("created_at"), Some(limit))
            .await
    }

    pub async fn count_users(&self) -> Result<u64, AppError> {
        self.count_docs(collections::USERS, None).await
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Store a login session (document ID is the token hash).
    pub async fn insert_session(&self, session: &Session) -> Result<(), AppError> {
        self.set_doc(collections::SESSIONS, &session.token_hash, session)
            .await
    }

    pub async fn get_session(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        self.get_doc(collections::SESSIONS, token_hash).await
    }

    /// Delete a session. Succeeds if it is already gone.
    pub async fn delete_session(&self, token_hash: &str) -> Result<(), AppError> {
        self.delete_doc(collections::SESSIONS, token_hash).await
    }

    // ─── Profile Operations ──────────────────────────────────────

    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_doc(collections::PROFILES, user_id).await
    }

    /// Get the user's profile, creating an empty one if absent.
    pub async fn get_or_create_profile(&self, user_id: &str) -> Result<UserProfile, AppError> {
        if let Some(profile) = self.get_profile(user_id).await? {
            return Ok(profile);
        }
        self.create_or_get(collections::PROFILES, user_id, &UserProfile::empty(user_id))
            .await
    }

    /// Upsert the given profile fields (plus `user_id` and `updated_at`).
    pub async fn merge_profile(
        &self,
        profile: &UserProfile,
        fields: &[&str],
    ) -> Result<(), AppError> {
        let mut mask: Vec<&str> = vec!["user_id", "updated_at"];
        for field in fields {
            if !mask.contains(field) {
                mask.push(field);
            }
        }

        self.merge_doc(collections::PROFILES, &profile.user_id, profile, &mask)
            .await
    }

    /// Record a questionnaire result on the user's profile in a single upsert.
    pub async fn save_prakriti_analysis(
        &self,
        user_id: &str,
        analysis: &PrakritiAnalysis,
    ) -> Result<(), AppError> {
        let mut profile = UserProfile::empty(user_id);
        profile.prakriti_type = Some(analysis.prakriti_type);
        profile.prakriti_analysis = Some(analysis.clone());
        profile.updated_at = Utc::now();

        self.merge_doc(collections::PROFILES, user_id, &profile, &ANALYSIS_FIELDS)
            .await?;

        tracing::info!(
            user_id,
            prakriti_type = %analysis.prakriti_type,
            "Prakriti analysis stored"
        );
        Ok(())
    }

    /// Number of profiles classified as `dosha`.
    pub async fn count_profiles_by_type(&self, dosha: Dosha) -> Result<u64, AppError> {
        self.count_docs(
            collections::PROFILES,
            Some(("prakriti_type", dosha.as_str().to_string())),
        )
        .await
    }

    // ─── Recommendation Operations ───────────────────────────────

    pub async fn get_diet_plan(&self, user_id: &str) -> Result<Option<DietPlan>, AppError> {
        self.get_doc(collections::DIET_PLANS, user_id).await
    }

    /// Store a diet plan unless the user already has one; returns the stored plan.
    pub async fn create_diet_plan(&self, plan: &DietPlan) -> Result<DietPlan, AppError> {
        self.create_or_get(collections::DIET_PLANS, &plan.user_id, plan)
            .await
    }

    pub async fn get_daily_schedule(
        &self,
        user_id: &str,
    ) -> Result<Option<DailySchedule>, AppError> {
        self.get_doc(collections::DAILY_SCHEDULES, user_id).await
    }

    /// Store a schedule unless the user already has one; returns the stored schedule.
    pub async fn create_daily_schedule(
        &self,
        schedule: &DailySchedule,
    ) -> Result<DailySchedule, AppError> {
        self.create_or_get(collections::DAILY_SCHEDULES, &schedule.user_id, schedule)
            .await
    }

    // ─── Follow-up Operations ────────────────────────────────────

    pub async fn insert_follow_up(&self, follow_up: &FollowUp) -> Result<(), AppError> {
        self.set_doc(collections::FOLLOW_UPS, &follow_up.id, follow_up)
            .await
    }

    /// Most recent follow-ups for a user (by `date`, descending).
    pub async fn list_follow_ups(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<FollowUp>, AppError> {
        self.query_docs(
            collections::FOLLOW_UPS,
            Some(("user_id", user_id.to_string())),
            Some("date"),
            Some(limit),
        )
        .await
    }

    pub async fn count_follow_ups(&self) -> Result<u64, AppError> {
        self.count_docs(collections::FOLLOW_UPS, None).await
    }
}
