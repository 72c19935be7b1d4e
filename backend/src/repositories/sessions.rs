use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::session::Session;

/// Creates or replaces the user's single active session.
pub async fn upsert_session(
    pool: &PgPool,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<Session, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (user_id, created_at, expires_at)
        VALUES ($1, NOW(), $2)
        ON CONFLICT (user_id)
        DO UPDATE SET created_at = NOW(), expires_at = EXCLUDED.expires_at
        RETURNING user_id, created_at, expires_at
        "#,
    )
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

/// The user's active session, if any. Expired rows are invisible here even
/// before the cleanup binary reaps them.
pub async fn find_active_session(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        "SELECT user_id, created_at, expires_at FROM sessions \
         WHERE user_id = $1 AND expires_at > NOW()",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_session(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn cleanup_expired_sessions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
