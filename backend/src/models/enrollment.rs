use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
/// A user's tracked relationship to a course. This snapshot (driven by
/// explicit module completions) is one of two progress signals; the
/// quiz-derived view in the course progress endpoint is the other.
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub completed_modules: Vec<Uuid>,
    pub progress: i32,
    pub is_completed: bool,
    /// Embedded append-only log of quiz attempt summaries.
    pub quiz_history: Json<Vec<QuizAttempt>>,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Summary of one quiz attempt, appended to the enrollment's history log on
/// every submission (the detailed record lives in quiz_results).
pub struct QuizAttempt {
    pub module_id: Uuid,
    pub correct: u32,
    pub total: u32,
    pub score: u32,
    pub passed: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Enrollment-snapshot progress view returned by /users/me/progress. An
/// un-enrolled user receives the zero snapshot, not an error.
pub struct MyProgressResponse {
    pub progress: i32,
    pub is_completed: bool,
    pub completed_modules: Vec<Uuid>,
    pub quiz_results: Vec<QuizAttempt>,
}

impl MyProgressResponse {
    pub fn empty() -> Self {
        Self {
            progress: 0,
            is_completed: false,
            completed_modules: Vec::new(),
            quiz_results: Vec::new(),
        }
    }
}

impl From<Enrollment> for MyProgressResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            progress: enrollment.progress,
            is_completed: enrollment.is_completed,
            completed_modules: enrollment.completed_modules,
            quiz_results: enrollment.quiz_history.0,
        }
    }
}
