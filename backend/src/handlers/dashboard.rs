use axum::{
    extract::{Extension, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{activity::ActivityType, enrollment::MyProgressResponse, user::User},
    repositories::{activities, enrollments, quiz_results},
    services::activity::{clamp_days, clamp_limit, clamp_page, daily_series, window_start_utc},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub course_id: Option<Uuid>,
    pub module_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn my_activity(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<ActivityQuery>,
) -> Result<Json<Value>, AppError> {
    let event_type = params
        .event_type
        .as_deref()
        .map(|raw| {
            raw.parse::<ActivityType>()
                .map_err(|_| AppError::BadRequest("Invalid activity type".to_string()))
        })
        .transpose()?;

    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let offset = (page - 1) * limit;

    let (items, total) = activities::query_for_user(
        &state.pool,
        user.id,
        params.course_id,
        params.module_id,
        event_type,
        limit,
        offset,
    )
    .await?;

    Ok(Json(json!({
        "data": items,
        "pagination": { "total": total, "page": page, "limit": limit },
    })))
}

#[derive(Debug, Deserialize)]
pub struct DailyActivityQuery {
    pub days: Option<i64>,
    pub course_id: Option<Uuid>,
}

/// Daily event counts over a trailing window ending today, in the server's
/// configured timezone. Zero days are emitted; the series is always exactly
/// the requested length.
pub async fn my_activity_daily(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<DailyActivityQuery>,
) -> Result<Json<Value>, AppError> {
    let days = clamp_days(params.days);
    let tz = state.config.time_zone;
    let today = Utc::now().with_timezone(&tz).date_naive();

    let from = window_start_utc(today, days, tz);
    let timestamps = activities::occurred_since(&state.pool, user.id, params.course_id, from).await?;

    let series = daily_series(&timestamps, days, tz, today);

    Ok(Json(json!({ "days": days, "series": series })))
}

#[derive(Debug, Deserialize)]
pub struct QuizResultsQuery {
    pub module_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn my_quiz_results(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<QuizResultsQuery>,
) -> Result<Json<Value>, AppError> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let offset = (page - 1) * limit;

    let (items, total) =
        quiz_results::list_for_user(&state.pool, user.id, params.module_id, limit, offset).await?;

    Ok(Json(json!({
        "data": items,
        "pagination": { "total": total, "page": page, "limit": limit },
    })))
}

#[derive(Debug, Deserialize)]
pub struct MyProgressQuery {
    pub course_id: Option<Uuid>,
}

/// Enrollment-snapshot progress view. Not enrolled is the zero snapshot,
/// not an error. Reads the stored snapshot; the quiz-derived view lives on
/// the course progress endpoint and may disagree with this one.
pub async fn my_progress(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<MyProgressQuery>,
) -> Result<Json<MyProgressResponse>, AppError> {
    let course_id = params
        .course_id
        .ok_or_else(|| AppError::BadRequest("course_id is required".to_string()))?;

    let response = enrollments::find_enrollment(&state.pool, user.id, course_id)
        .await?
        .map(MyProgressResponse::from)
        .unwrap_or_else(MyProgressResponse::empty);

    Ok(Json(response))
}
