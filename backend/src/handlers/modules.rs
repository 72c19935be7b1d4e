use std::collections::HashSet;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        activity::{ActivityType, NewActivity},
        module::{
            CreateModulePayload, Module, ModuleCompletionResponse, ModuleContextRequest,
            ModuleStatusResponse,
        },
        user::User,
    },
    middleware::auth::OptionalUser,
    repositories::{activities, courses, enrollments, modules, quiz_results},
    services::progression::{self, AccessDecision},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ModuleQuery {
    pub course_id: Option<Uuid>,
}

/// Module content. Ungated when fetched without course context; with a
/// course, the prerequisite and enrollment rules both apply (so an
/// anonymous caller with course context always fails the enrollment check).
pub async fn get_module(
    State(state): State<AppState>,
    Extension(OptionalUser(user)): Extension<OptionalUser>,
    Path(module_id): Path<Uuid>,
    Query(params): Query<ModuleQuery>,
) -> Result<Json<Module>, AppError> {
    let module = modules::find_module(&state.pool, module_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Module not found".to_string()))?;

    if let Some(course_id) = params.course_id {
        if courses::find_course(&state.pool, course_id).await?.is_none() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        let links = courses::course_module_links(&state.pool, course_id).await?;
        let ordered = progression::order_modules(links);

        let (passed, enrolled) = match user.as_ref() {
            Some(user) => {
                let module_ids: Vec<Uuid> = ordered.iter().map(|link| link.module_id).collect();
                let passed: HashSet<Uuid> =
                    quiz_results::passing_module_ids(&state.pool, user.id, &module_ids)
                        .await?
                        .into_iter()
                        .collect();
                let enrolled = enrollments::find_enrollment(&state.pool, user.id, course_id)
                    .await?
                    .is_some();
                (passed, enrolled)
            }
            None => (HashSet::new(), false),
        };

        match progression::check_access(&ordered, module_id, &passed, enrolled) {
            AccessDecision::PrerequisiteNotMet => {
                return Err(AppError::Forbidden(
                    "You must complete the quiz of the previous module first.".to_string(),
                ));
            }
            AccessDecision::NotEnrolled => {
                return Err(AppError::Forbidden(
                    "Enroll to this course first".to_string(),
                ));
            }
            AccessDecision::Granted => {}
        }

        if let Some(user) = user {
            activities::record(
                &state.pool,
                &NewActivity::new(user.id, ActivityType::View)
                    .course(course_id)
                    .module(module_id),
            )
            .await?;
        }
    }

    Ok(Json(module))
}

pub async fn start_module(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<ModuleContextRequest>,
) -> Result<Json<Value>, AppError> {
    if modules::find_module(&state.pool, module_id).await?.is_none() {
        return Err(AppError::NotFound("Module not found".to_string()));
    }
    if courses::find_course(&state.pool, payload.course_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Course not found".to_string()));
    }
    if enrollments::find_enrollment(&state.pool, user.id, payload.course_id)
        .await?
        .is_none()
    {
        return Err(AppError::Forbidden(
            "Enroll to this course first".to_string(),
        ));
    }

    activities::record(
        &state.pool,
        &NewActivity::new(user.id, ActivityType::ModuleStart)
            .course(payload.course_id)
            .module(module_id),
    )
    .await?;

    Ok(Json(json!({ "message": "Module started" })))
}

/// Marks a module completed in the enrollment snapshot. Idempotent on the
/// completed-set; the snapshot is recomputed against the course's current
/// module count, and a module_complete event is recorded regardless.
pub async fn complete_module(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<ModuleContextRequest>,
) -> Result<Json<ModuleCompletionResponse>, AppError> {
    if modules::find_module(&state.pool, module_id).await?.is_none() {
        return Err(AppError::NotFound("Module not found".to_string()));
    }

    // Distinct from the start path: a missing enrollment here is a 400.
    let enrollment = enrollments::find_enrollment(&state.pool, user.id, payload.course_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("User not enrolled in this course".to_string()))?;

    if courses::find_course(&state.pool, payload.course_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    let mut completed = enrollment.completed_modules.clone();
    if !completed.contains(&module_id) {
        completed.push(module_id);
    }

    let total_modules = courses::course_module_links(&state.pool, payload.course_id)
        .await?
        .len();
    let progress = progression::progress_percentage(completed.len(), total_modules);
    let is_completed = progression::is_course_completed(completed.len(), total_modules);

    enrollments::update_progress(&state.pool, enrollment.id, &completed, progress, is_completed)
        .await?;

    activities::record(
        &state.pool,
        &NewActivity::new(user.id, ActivityType::ModuleComplete)
            .course(payload.course_id)
            .module(module_id),
    )
    .await?;

    Ok(Json(ModuleCompletionResponse {
        message: "Module completed".to_string(),
        progress,
        is_completed,
    }))
}

pub async fn module_status(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(module_id): Path<Uuid>,
) -> Result<Json<ModuleStatusResponse>, AppError> {
    let events = activities::module_event_types(&state.pool, user.id, module_id).await?;
    let latest = quiz_results::latest_for_module(&state.pool, user.id, module_id).await?;

    let status = progression::module_status(&events, latest.as_ref().map(|r| r.passed));

    Ok(Json(ModuleStatusResponse {
        status,
        quiz_result: latest,
    }))
}

pub async fn create_module(
    State(state): State<AppState>,
    Json(payload): Json<CreateModulePayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;

    let module = Module {
        id: Uuid::new_v4(),
        title: payload.title,
        content: payload.content,
        created_at: Utc::now(),
    };
    modules::insert_module(&state.pool, &module).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Module created", "module": module })),
    ))
}
