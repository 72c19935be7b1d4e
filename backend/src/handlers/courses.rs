use std::collections::{HashMap, HashSet};

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
        course::{
            Course, CourseDetailResponse, CourseModuleEntry, CourseProgressResponse,
            CreateCoursePayload, EnrollRequest,
        },
        module::Module,
        user::User,
    },
    repositories::{activities, courses, enrollments, modules, quiz_results},
    services::progression,
    state::AppState,
};

pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = courses::list_courses(&state.pool).await?;
    Ok(Json(courses))
}

/// Resolves a course's module list into effective course order.
async fn ordered_course_modules(
    state: &AppState,
    course_id: Uuid,
) -> Result<Vec<(i32, Module)>, AppError> {
    let links = courses::course_module_links(&state.pool, course_id).await?;
    let ordered = progression::order_modules(links);

    let ids: Vec<Uuid> = ordered.iter().map(|link| link.module_id).collect();
    let mut by_id: HashMap<Uuid, Module> = modules::find_modules_by_ids(&state.pool, &ids)
        .await?
        .into_iter()
        .map(|module| (module.id, module))
        .collect();

    Ok(ordered
        .iter()
        .filter_map(|link| by_id.remove(&link.module_id).map(|m| (link.ord, m)))
        .collect())
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let course = courses::find_course(&state.pool, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let modules = ordered_course_modules(&state, course_id)
        .await?
        .into_iter()
        .map(|(order, module)| CourseModuleEntry { order, module })
        .collect();

    Ok(Json(CourseDetailResponse {
        id: course.id,
        title: course.title,
        description: course.description,
        created_at: course.created_at,
        modules,
    }))
}

pub async fn course_modules(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<Module>>, AppError> {
    if courses::find_course(&state.pool, course_id).await?.is_none() {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    let modules = ordered_course_modules(&state, course_id)
        .await?
        .into_iter()
        .map(|(_, module)| module)
        .collect();
    Ok(Json(modules))
}

/// Quiz-derived progress: recomputed from passing quiz results, independent
/// of the enrollment snapshot (the two may disagree).
pub async fn course_progress(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseProgressResponse>, AppError> {
    if courses::find_course(&state.pool, course_id).await?.is_none() {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    let links = courses::course_module_links(&state.pool, course_id).await?;
    let ordered = progression::order_modules(links);
    let module_ids: Vec<Uuid> = ordered.iter().map(|link| link.module_id).collect();

    let passed: HashSet<Uuid> = quiz_results::passing_module_ids(&state.pool, user.id, &module_ids)
        .await?
        .into_iter()
        .collect();

    let summary = progression::quiz_derived_progress(&ordered, &passed);

    let next_module = match summary.next_module {
        Some(module_id) => modules::find_module(&state.pool, module_id).await?,
        None => None,
    };

    Ok(Json(CourseProgressResponse {
        course_id,
        total_modules: summary.total_modules,
        completed_modules: summary.completed_modules,
        progress_percentage: summary.progress_percentage,
        is_finished: summary.is_finished,
        next_module,
    }))
}

/// Idempotent enrollment: re-enrolling returns the existing record and
/// records no second activity event.
pub async fn enroll(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if courses::find_course(&state.pool, payload.course_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    if let Some(existing) =
        enrollments::find_enrollment(&state.pool, user.id, payload.course_id).await?
    {
        return Ok((
            StatusCode::OK,
            Json(json!({ "message": "Already enrolled", "data": existing })),
        ));
    }

    let enrollment = enrollments::insert_enrollment(&state.pool, user.id, payload.course_id).await?;

    activities::record(
        &state.pool,
        &NewActivity::new(user.id, ActivityType::Enroll).course(payload.course_id),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Course enrolled", "data": enrollment })),
    ))
}

pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CreateCoursePayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;

    let course = Course {
        id: Uuid::new_v4(),
        title: payload.title,
        description: payload.description,
        created_at: Utc::now(),
    };
    courses::insert_course(&state.pool, &course, &payload.modules).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Course created", "course": course })),
    ))
}
