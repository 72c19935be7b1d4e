use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::models::ml::InsightDocument;

async fn upsert(
    pool: &PgPool,
    table: &str,
    user_id: Uuid,
    payload: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        "INSERT INTO {table} (user_id, payload, generated_at) VALUES ($1, $2, NOW()) \
         ON CONFLICT (user_id) \
         DO UPDATE SET payload = EXCLUDED.payload, generated_at = NOW()",
    ))
    .bind(user_id)
    .bind(Json(payload.clone()))
    .execute(pool)
    .await
    .map(|_| ())
}

async fn get(
    pool: &PgPool,
    table: &str,
    user_id: Uuid,
) -> Result<Option<InsightDocument>, sqlx::Error> {
    sqlx::query_as::<_, InsightDocument>(&format!(
        "SELECT user_id, payload, generated_at FROM {table} WHERE user_id = $1",
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    payload: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    upsert(pool, "ml_profiles", user_id, payload).await
}

pub async fn get_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<InsightDocument>, sqlx::Error> {
    get(pool, "ml_profiles", user_id).await
}

pub async fn upsert_recommendations(
    pool: &PgPool,
    user_id: Uuid,
    payload: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    upsert(pool, "ml_recommendations", user_id, payload).await
}

pub async fn get_recommendations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<InsightDocument>, sqlx::Error> {
    get(pool, "ml_recommendations", user_id).await
}
