use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, FromRow)]
/// Quiz metadata; exactly one quiz exists per module.
pub struct Quiz {
    pub id: Uuid,
    pub module_id: Uuid,
    pub deadline_at: Option<DateTime<Utc>>,
    pub maximum_duration_secs: i32,
}

#[derive(Debug, Clone, FromRow)]
/// A question with its four options and the zero-based correct index.
/// Never serialized to clients as-is: the answer must not leak.
pub struct QuizQuestion {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub position: i32,
    pub question: String,
    pub options: Vec<String>,
    pub answer: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuizPayload {
    pub module_id: Uuid,
    pub deadline_at: Option<DateTime<Utc>>,
    pub maximum_duration_secs: Option<i32>,
    #[validate(length(min = 1), nested)]
    pub questions: Vec<CreateQuestionPayload>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionPayload {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(custom(function = "validate_options"))]
    pub options: Vec<String>,
    pub answer: i32,
}

fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.len() != 4 {
        return Err(ValidationError::new("exactly_four_options_required"));
    }
    Ok(())
}

#[derive(Debug, Serialize, ToSchema)]
/// Quiz as presented to a learner: options re-labeled A..D, answers omitted.
pub struct QuizStartResponse {
    pub module_id: Uuid,
    pub deadline_at: Option<DateTime<Utc>>,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionView {
    pub question_id: Uuid,
    pub question: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OptionView {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitQuizRequest {
    pub course_id: Uuid,
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
/// A single submitted answer. `question_id` stays a free-form string so that
/// answers referencing unknown questions are skipped during scoring instead
/// of failing deserialization.
pub struct SubmittedAnswer {
    pub question_id: String,
    pub selected_option: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitQuizResponse {
    pub message: String,
    pub correct: u32,
    pub total: u32,
    pub score: u32,
    pub passed: bool,
}
