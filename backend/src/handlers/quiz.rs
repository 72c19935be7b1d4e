use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        activity::{ActivityType, NewActivity},
        enrollment::QuizAttempt,
        module::ModuleContextRequest,
        quiz::{
            CreateQuizPayload, OptionView, QuestionView, Quiz, QuizQuestion, QuizStartResponse,
            SubmitQuizRequest, SubmitQuizResponse,
        },
        quiz_result::QuizResult,
        user::User,
    },
    repositories::{activities, enrollments, modules, quiz_results, quizzes},
    services::quiz::{option_label, score_submission},
    state::AppState,
};

/// Presents the quiz for a module with options re-labeled A..D. The correct
/// answer index never leaves the server. The quiz_start event recorded here
/// anchors the attempt duration at submission time.
pub async fn start_quiz(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<ModuleContextRequest>,
) -> Result<Json<QuizStartResponse>, AppError> {
    let quiz = quizzes::find_quiz_by_module(&state.pool, module_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

    let questions = quizzes::quiz_questions(&state.pool, quiz.id).await?;

    activities::record(
        &state.pool,
        &NewActivity::new(user.id, ActivityType::QuizStart)
            .course(payload.course_id)
            .module(module_id),
    )
    .await?;

    let views: Vec<QuestionView> = questions
        .iter()
        .map(|q| QuestionView {
            question_id: q.id,
            question: q.question.clone(),
            options: q
                .options
                .iter()
                .enumerate()
                .map(|(index, text)| OptionView {
                    label: option_label(index),
                    text: text.clone(),
                })
                .collect(),
        })
        .collect();

    let total_questions = views.len();
    Ok(Json(QuizStartResponse {
        module_id,
        deadline_at: quiz.deadline_at,
        questions: views,
        total_questions,
    }))
}

/// Scores a submission, records the attempt in both histories (the
/// quiz_results audit table and the enrollment's embedded log), and logs a
/// quiz_submit event carrying the outcome.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<Json<SubmitQuizResponse>, AppError> {
    if payload.answers.is_empty() {
        return Err(AppError::BadRequest(
            "answers array is required and cannot be empty".to_string(),
        ));
    }

    let quiz = quizzes::find_quiz_by_module(&state.pool, module_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

    let questions = quizzes::quiz_questions(&state.pool, quiz.id).await?;
    let outcome = score_submission(&questions, &payload.answers);

    let now = Utc::now();
    let duration_secs = activities::latest_quiz_start(
        &state.pool,
        user.id,
        module_id,
        payload.course_id,
    )
    .await?
    .map(|started_at| (now - started_at).num_seconds().max(0) as i32);

    let result = QuizResult {
        id: Uuid::new_v4(),
        user_id: user.id,
        module_id,
        quiz_id: quiz.id,
        score: outcome.score as i32,
        total_questions: outcome.total as i32,
        passed: outcome.passed,
        duration_secs,
        submitted_at: now,
    };
    quiz_results::insert_result(&state.pool, &result).await?;

    let attempt = QuizAttempt {
        module_id,
        correct: outcome.correct,
        total: outcome.total,
        score: outcome.score,
        passed: outcome.passed,
        timestamp: now,
    };
    enrollments::append_quiz_attempt(&state.pool, user.id, payload.course_id, &attempt).await?;

    activities::record(
        &state.pool,
        &NewActivity::new(user.id, ActivityType::QuizSubmit)
            .course(payload.course_id)
            .module(module_id)
            .metadata(json!({
                "score": outcome.score,
                "passed": outcome.passed,
                "quiz_result_id": result.id,
            })),
    )
    .await?;

    Ok(Json(SubmitQuizResponse {
        message: "Quiz submitted".to_string(),
        correct: outcome.correct,
        total: outcome.total,
        score: outcome.score,
        passed: outcome.passed,
    }))
}

pub async fn create_quiz(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuizPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;

    if modules::find_module(&state.pool, payload.module_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Module not found".to_string()));
    }
    if quizzes::find_quiz_by_module(&state.pool, payload.module_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "A quiz already exists for this module".to_string(),
        ));
    }

    let quiz = Quiz {
        id: Uuid::new_v4(),
        module_id: payload.module_id,
        deadline_at: payload.deadline_at,
        maximum_duration_secs: payload.maximum_duration_secs.unwrap_or(600),
    };
    let questions: Vec<QuizQuestion> = payload
        .questions
        .iter()
        .enumerate()
        .map(|(position, q)| QuizQuestion {
            id: Uuid::new_v4(),
            quiz_id: quiz.id,
            position: position as i32,
            question: q.question.clone(),
            options: q.options.clone(),
            answer: q.answer,
        })
        .collect();

    quizzes::insert_quiz(&state.pool, &quiz, &questions).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Quiz created", "quiz": quiz })),
    ))
}
