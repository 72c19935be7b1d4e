use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Module {
    pub id: Uuid,
    pub title: String,
    /// Free-text lesson content. Ordering lives on the course, not here.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateModulePayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
/// Course context accompanying module start/complete and quiz start calls.
pub struct ModuleContextRequest {
    pub course_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    NotStarted,
    InProgress,
    Completed,
    CompletedNotPassed,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleStatusResponse {
    pub status: ModuleStatus,
    pub quiz_result: Option<crate::models::quiz_result::QuizResult>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Snapshot returned after a module completion write.
pub struct ModuleCompletionResponse {
    pub message: String,
    pub progress: i32,
    pub is_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_status_serializes_snake_case() {
        let json = serde_json::to_value(ModuleStatus::CompletedNotPassed).unwrap();
        assert_eq!(json, "completed_not_passed");
        let json = serde_json::to_value(ModuleStatus::NotStarted).unwrap();
        assert_eq!(json, "not_started");
    }
}
