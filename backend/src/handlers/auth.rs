use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::auth::BearerToken,
    models::user::{AuthResponse, LoginRequest, SignupRequest, User, UserResponse},
    repositories::{revoked_tokens, sessions, users},
    state::AppState,
    utils::{
        jwt::{create_access_token, Claims},
        password::{hash_password, verify_password},
    },
};

/// Issues a bearer token and replaces the user's active session. Logging in
/// on a second device silently invalidates the first session.
async fn issue_credentials(state: &AppState, user: &User) -> Result<String, AppError> {
    let token = create_access_token(
        user.id,
        user.email.clone(),
        user.role.as_str().to_string(),
        &state.config.jwt_secret,
        state.config.token_expiration_days,
    )?;

    let expires_at = Utc::now() + Duration::days(state.config.token_expiration_days as i64);
    sessions::upsert_session(&state.pool, user.id, expires_at).await?;

    Ok(token)
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate()?;

    if users::find_user_by_email(&state.pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Email already used".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(payload.display_name, payload.email, password_hash);
    users::insert_user(&state.pool, &user).await?;

    let token = issue_credentials(&state, &user).await?;

    let response = AuthResponse {
        token,
        user_id: user.id,
        user: UserResponse::from(user),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = users::find_user_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    let token = issue_credentials(&state, &user).await?;

    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        user: UserResponse::from(user),
    }))
}

pub async fn profile(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// Logout revokes the presented token for its remaining lifetime and drops
/// the active session. A second logout is a 400, not a no-op.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(claims): Extension<Claims>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> Result<Json<Value>, AppError> {
    let active = sessions::find_active_session(&state.pool, user.id).await?;
    if active.is_none() {
        return Err(AppError::BadRequest(
            "User is not logged in. Already logged out.".to_string(),
        ));
    }

    revoked_tokens::revoke_token(&state.pool, &token, claims.expires_at()).await?;
    sessions::delete_session(&state.pool, user.id).await?;

    Ok(Json(json!({
        "message": "Logout successful",
        "user_id": user.id,
    })))
}
