use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
/// The single active session a user may hold; replaced on each login.
pub struct Session {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
/// A token invalidated ahead of its natural expiry (logout). A token present
/// here must never authenticate, even if structurally valid.
pub struct RevokedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
