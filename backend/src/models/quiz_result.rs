use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
/// Audit record of one quiz submission. Attempts accumulate; rows are never
/// updated. "Passed" for gating purposes means any row with passed = true.
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub module_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub passed: bool,
    /// Wall-clock seconds since the latest quiz_start event; null when no
    /// start event was recorded.
    pub duration_secs: Option<i32>,
    pub submitted_at: DateTime<Utc>,
}
