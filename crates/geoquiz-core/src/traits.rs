//! Collaborator traits for identity and remote progress storage.
//!
//! These async traits are implemented by the `geoquiz-backend` crate. The
//! engine treats the remote side as an eventually-consistent mirror of its
//! local state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Domain;

// ---------------------------------------------------------------------------
// Progress storage
// ---------------------------------------------------------------------------

/// One stored level result, keyed by (user, domain, level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: Uuid,
    pub domain: Domain,
    pub level: u8,
    /// Score of the attempt that wrote this record.
    pub score: u8,
    pub updated_at: DateTime<Utc>,
}

/// Remote store for level results.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Human-readable backend name (e.g. "supabase").
    fn name(&self) -> &str;

    /// Every record stored for a user.
    async fn load_progress(&self, user_id: Uuid) -> anyhow::Result<Vec<ProgressRecord>>;

    /// Insert or replace the record for (user, domain, level).
    async fn save_progress(&self, record: &ProgressRecord) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub email: String,
    /// Bearer token for subsequent requests.
    #[serde(default)]
    pub access_token: String,
}

/// Public profile row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    /// Unique handle.
    #[serde(rename = "pseudo")]
    pub handle: Option<String>,
    pub email: Option<String>,
}

/// Hosted authentication and profile storage.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create an account. The handle is stored as user metadata.
    async fn sign_up(&self, email: &str, password: &str, handle: &str) -> anyhow::Result<()>;

    /// Password sign-in by email.
    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<AuthSession>;

    /// Profile owning a handle, compared case-insensitively.
    async fn find_profile_by_handle(&self, handle: &str) -> anyhow::Result<Option<Profile>>;

    async fn fetch_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;

    async fn upsert_profile(&self, profile: &Profile) -> anyhow::Result<()>;
}
