use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
/// Cached output of the external insight service: one document per user,
/// overwritten on each regeneration. Backs both profiles and
/// recommendations (separate tables, same shape).
pub struct InsightDocument {
    pub user_id: Uuid,
    pub payload: Json<serde_json::Value>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateResponse {
    pub message: String,
    pub payload: serde_json::Value,
}
