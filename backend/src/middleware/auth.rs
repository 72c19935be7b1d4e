use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::user::User,
    repositories::{revoked_tokens, sessions, users},
    state::AppState,
    utils::jwt::{verify_access_token, Claims},
};

/// The raw bearer token, attached so logout can revoke exactly the
/// credential that authenticated the request.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Present on optionally-authenticated routes; `None` for anonymous callers.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<User>);

/// Why a bearer credential failed verification. Every variant maps to 401
/// with its own message so clients can tell replacement from expiry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Authentication token is required")]
    NoToken,
    #[error("Malformed authentication token")]
    Malformed,
    #[error("Token has expired. Please login again.")]
    Expired,
    #[error("Invalid token signature")]
    BadSignature,
    #[error("Token has been revoked. Please login again.")]
    Revoked,
    #[error("Session expired or user not logged in. Please login again.")]
    NoActiveSession,
    #[error("User no longer exists")]
    UnknownUser,
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        AppError::Unauthorized(failure.to_string())
    }
}

pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AuthFailure::NoToken)?;
    let (claims, user) =
        authenticate_token(&token, &state.pool, &state.config.jwt_secret).await?;

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user.clone());
    request.extensions_mut().insert(BearerToken(token));

    let mut response = next.run(request).await;
    response.extensions_mut().insert(user);
    Ok(response)
}

/// Attaches the user when a valid bearer token is presented, but lets
/// anonymous (or invalidly-credentialed) requests through. Used by the
/// module content route, where gating only applies in course context.
pub async fn auth_optional(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = match bearer_token(&request) {
        Some(token) => authenticate_token(&token, &state.pool, &state.config.jwt_secret)
            .await
            .ok()
            .map(|(_, user)| user),
        None => None,
    };

    request.extensions_mut().insert(OptionalUser(user));
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .map(str::to_owned)
}

pub fn parse_bearer_token(header: &str) -> Option<&str> {
    if let Some(rest) = header.strip_prefix("Bearer ") {
        return Some(rest);
    }
    if let Some(rest) = header.strip_prefix("bearer ") {
        return Some(rest);
    }
    if let Some(space_idx) = header.find(' ') {
        let (scheme, rest) = header.split_at(space_idx);
        if scheme.eq_ignore_ascii_case("bearer") {
            return Some(rest.trim_start());
        }
    }
    None
}

/// Maps a structural token failure to its auth taxonomy entry.
pub fn classify_jwt_error(err: &jsonwebtoken::errors::Error) -> AuthFailure {
    use jsonwebtoken::errors::ErrorKind;
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthFailure::Expired,
        ErrorKind::InvalidSignature => AuthFailure::BadSignature,
        _ => AuthFailure::Malformed,
    }
}

/// Full verification pipeline: structural checks, then revocation, then the
/// active-session requirement, then subject resolution. The two extra reads
/// per request are an accepted simplicity/latency tradeoff.
async fn authenticate_token(
    token: &str,
    pool: &PgPool,
    secret: &str,
) -> Result<(Claims, User), AppError> {
    let claims =
        verify_access_token(token, secret).map_err(|e| AppError::from(classify_jwt_error(&e)))?;

    let user_id: Uuid = claims
        .sub
        .parse()
        .map_err(|_| AppError::from(AuthFailure::Malformed))?;

    if revoked_tokens::is_token_revoked(pool, token)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
    {
        return Err(AuthFailure::Revoked.into());
    }

    if sessions::find_active_session(pool, user_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
        .is_none()
    {
        return Err(AuthFailure::NoActiveSession.into());
    }

    let user = users::find_user_by_id(pool, user_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
        .ok_or(AuthFailure::UnknownUser)?;

    Ok((claims, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::create_access_token;
    use jsonwebtoken::errors::ErrorKind;

    #[test]
    fn parse_bearer_token_handles_common_casings() {
        assert_eq!(parse_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(parse_bearer_token("BEARER abc"), Some("abc"));
        assert_eq!(parse_bearer_token("Basic abc"), None);
        assert_eq!(parse_bearer_token("abc"), None);
    }

    #[test]
    fn classify_distinguishes_expiry_signature_and_garbage() {
        let expired_token = {
            use jsonwebtoken::{encode, EncodingKey, Header};
            let claims = Claims {
                sub: Uuid::new_v4().to_string(),
                email: "a@b.c".into(),
                role: "student".into(),
                exp: chrono::Utc::now().timestamp() - 3600,
                iat: chrono::Utc::now().timestamp() - 7200,
                jti: Uuid::new_v4().to_string(),
            };
            encode(
                &Header::default(),
                &claims,
                &EncodingKey::from_secret(b"secret"),
            )
            .unwrap()
        };
        let expired = verify_access_token(&expired_token, "secret").unwrap_err();
        assert!(matches!(expired.kind(), ErrorKind::ExpiredSignature));
        assert_eq!(classify_jwt_error(&expired), AuthFailure::Expired);

        let valid = create_access_token(
            Uuid::new_v4(),
            "a@b.c".into(),
            "student".into(),
            "secret",
            7,
        )
        .unwrap();
        let tampered = verify_access_token(&valid, "wrong").unwrap_err();
        assert_eq!(classify_jwt_error(&tampered), AuthFailure::BadSignature);

        let garbage = verify_access_token("not-a-token", "secret").unwrap_err();
        assert_eq!(classify_jwt_error(&garbage), AuthFailure::Malformed);
    }

    #[test]
    fn auth_failures_map_to_unauthorized_messages() {
        let err: AppError = AuthFailure::Revoked.into();
        match err {
            AppError::Unauthorized(msg) => assert!(msg.contains("revoked")),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
        let err: AppError = AuthFailure::NoActiveSession.into();
        match err {
            AppError::Unauthorized(msg) => assert!(msg.contains("Session expired")),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }
}
