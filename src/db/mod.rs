//! Database layer (Firestore, with an in-memory backend for tests).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Keyed by SHA-256 of the session token
    pub const SESSIONS: &str = "user_sessions";
    pub const PROFILES: &str = "user_profiles";
    pub const DIET_PLANS: &str = "diet_plans";
    pub const DAILY_SCHEDULES: &str = "daily_schedules";
    pub const FOLLOW_UPS: &str = "follow_ups";
}
