use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: String,
    pub exp: i64,    // expiration time
    pub iat: i64,    // issued at
    pub jti: String, // JWT ID
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, role: String, expiration_days: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(expiration_days as i64);

        Self {
            sub: user_id.to_string(),
            email,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expiry instant of the token; used as the revocation row's own expiry
    /// so the blacklist never outlives the tokens it holds.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

pub fn create_access_token(
    user_id: Uuid,
    email: String,
    role: String,
    secret: &str,
    expiration_days: u64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, email, role, expiration_days);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

pub fn verify_access_token(token: &str, secret: &str) -> jsonwebtoken::errors::Result<Claims> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_verify_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = create_access_token(
            user_id,
            "bob@example.com".into(),
            "student".into(),
            "secret",
            7,
        )
        .expect("create token");
        let claims = verify_access_token(&token, "secret").expect("verify token");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "bob@example.com");
        assert_eq!(claims.role, "student");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token = create_access_token(
            Uuid::new_v4(),
            "bob@example.com".into(),
            "student".into(),
            "secret",
            7,
        )
        .expect("create token");
        let err = verify_access_token(&token, "other-secret").expect_err("should fail");
        assert_eq!(
            err.kind(),
            &jsonwebtoken::errors::ErrorKind::InvalidSignature
        );
    }

    #[test]
    fn expires_at_matches_exp_claim() {
        let claims = Claims::new(Uuid::new_v4(), "a@b.c".into(), "student".into(), 7);
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }
}
