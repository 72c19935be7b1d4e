use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::session::RevokedToken;

/// Marks a token invalid. The row's expiry matches the token's remaining
/// lifetime, bounding blacklist growth.
pub async fn revoke_token(
    pool: &PgPool,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO revoked_tokens (token, expires_at)
        VALUES ($1, $2)
        ON CONFLICT (token) DO NOTHING
        "#,
    )
    .bind(token)
    .bind(expires_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn is_token_revoked(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_as::<_, RevokedToken>(
        "SELECT token, expires_at FROM revoked_tokens WHERE token = $1 AND expires_at > NOW()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

pub async fn cleanup_expired_tokens(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
