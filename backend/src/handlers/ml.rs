use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{ml::GenerateResponse, user::User},
    repositories::{activities, enrollments, ml_cache, quiz_results},
    services::cluster_map::{cluster_info, cluster_key},
    state::AppState,
};

/// The aggregated learner history the insight service consumes, assembled
/// oldest-first.
async fn build_raw_payload(state: &AppState, user_id: Uuid) -> Result<Value, AppError> {
    let activities = activities::list_all_for_user(&state.pool, user_id).await?;
    let quiz_results = quiz_results::list_all_for_user(&state.pool, user_id).await?;
    let enrollments = enrollments::list_for_user(&state.pool, user_id).await?;

    Ok(json!({
        "user_id": user_id,
        "activities": activities,
        "quiz_results": quiz_results,
        "enrollments": enrollments,
    }))
}

pub async fn generate_profile(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<GenerateResponse>, AppError> {
    let raw = build_raw_payload(&state, user.id).await?;

    let payload = state.insight.generate_profile(&raw).await?;

    ml_cache::upsert_profile(&state.pool, user.id, &payload).await?;

    Ok(Json(GenerateResponse {
        message: "Profile generated".to_string(),
        payload,
    }))
}

/// Recommendations derive from the cached profile's cluster assignment via
/// the static persona table; no second round-trip to the insight service.
pub async fn generate_recommendations(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<GenerateResponse>, AppError> {
    let profile = ml_cache::get_profile(&state.pool, user.id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Profile not generated yet. Generate a profile first.".to_string())
        })?;

    let key = cluster_key(&profile.payload.0).ok_or_else(|| {
        AppError::NotFound("Profile not generated yet. Generate a profile first.".to_string())
    })?;

    let info = cluster_info(&key);
    let mut payload = serde_json::to_value(&info)
        .map_err(|e| AppError::InternalServerError(e.into()))?;
    if let Some(map) = payload.as_object_mut() {
        map.insert("cluster".to_string(), Value::String(key));
    }

    ml_cache::upsert_recommendations(&state.pool, user.id, &payload).await?;

    Ok(Json(GenerateResponse {
        message: "Recommendations generated".to_string(),
        payload,
    }))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Option<Value>>, AppError> {
    let doc = ml_cache::get_profile(&state.pool, user.id).await?;
    Ok(Json(doc.map(|d| d.payload.0)))
}

pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Option<Value>>, AppError> {
    let doc = ml_cache::get_recommendations(&state.pool, user.id).await?;
    Ok(Json(doc.map(|d| d.payload.0)))
}
