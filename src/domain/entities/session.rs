//! Refresh session entity and repository trait.
//!
//! Maps to the `user_sessions` table in the database schema.
//! Each row backs one refresh token; only the token's SHA-256 digest is stored.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents a login session for refresh token management.
///
/// Maps to the `user_sessions` table:
/// - id: UUID PRIMARY KEY
/// - user_id: BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// - refresh_token_hash: VARCHAR(64) NOT NULL UNIQUE (SHA-256 hex)
/// - expires_at: TIMESTAMPTZ NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - last_used_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - revoked_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,

    pub user_id: i64,

    /// SHA-256 hash of the refresh token (never store raw tokens)
    #[serde(skip_serializing)]
    pub refresh_token_hash: String,

    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    /// When the refresh token was last rotated
    pub last_used_at: DateTime<Utc>,

    /// When the session was revoked (None if active)
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a new session.
    pub fn new(user_id: i64, refresh_token_hash: String, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            refresh_token_hash,
            expires_at,
            created_at: now,
            last_used_at: now,
            revoked_at: None,
        }
    }

    /// Check if the session is currently active (not expired, not revoked).
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Repository trait for refresh session persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session.
    async fn create(&self, session: &Session) -> Result<Session, AppError>;

    /// Find a session by the hash of its refresh token.
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Swap the refresh token of an active session, but only while it still
    /// holds `old_token_hash`. Returns false when nothing was swapped.
    async fn rotate(
        &self,
        id: Uuid,
        old_token_hash: &str,
        new_token_hash: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// Revoke a single session.
    async fn revoke(&self, id: Uuid) -> Result<(), AppError>;

    /// Revoke every active session of a user. Returns how many were revoked.
    async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64, AppError>;
}
