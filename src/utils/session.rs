//! Bearer-token sessions.
//!
//! Logging in issues an HS256 JWT; authenticated handlers take a
//! [`CurrentUser`] argument, which validates the `Authorization: Bearer`
//! header and hands the caller's identity to the handler explicitly.

use std::time::Duration;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::AppState;
use crate::handler::error::AppError;
use crate::models::User;
use crate::utils::config::AuthConfig;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing or invalid bearer token")]
    MissingToken,
    #[error("session expired")]
    Expired,
    #[error("invalid session token: {0}")]
    InvalidToken(String),
    #[error("failed to sign session token: {0}")]
    Signing(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signing material plus session lifetime, shared through `AppState`.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: config.session_ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

/// Identity of the caller, resolved from the bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: i32,
}

impl CurrentUser {
    fn from_claims(claims: Claims) -> Result<Self, AuthError> {
        let id = claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken("subject is not a user id".to_string()))?;
        Ok(Self { id })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;
        let claims = state.sessions.verify(token).map_err(|e| {
            tracing::warn!("Rejected session token: {}", e);
            e
        })?;
        Ok(CurrentUser::from_claims(claims)?)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::Signing(msg) => {
                tracing::error!("Failed to sign session token: {}", msg);
                AppError::InternalServerError
            }
            _ => AppError::Unauthorized(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn keys(secret: &str, ttl_secs: u64) -> SessionKeys {
        SessionKeys::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            session_ttl: Duration::from_secs(ttl_secs),
        })
    }

    fn user() -> User {
        User {
            id: 42,
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder();
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_issue_then_verify() {
        let keys = keys("s3cret", 3600);
        let token = keys.issue(&user()).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "asha@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);

        assert_eq!(claims.name, "Asha");
        let current = CurrentUser::from_claims(claims).unwrap();
        assert_eq!(current, CurrentUser { id: 42 });
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = keys("s3cret", 3600).issue(&user()).unwrap();
        let err = keys("other", 3600).verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys("s3cret", 3600);
        let now = Utc::now().timestamp();
        let stale = Claims {
            sub: "42".to_string(),
            email: "asha@example.com".to_string(),
            name: "Asha".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(&Header::new(Algorithm::HS256), &stale, &keys.encoding).unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::Expired)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(
            keys("s3cret", 60).verify("not.a.jwt"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_non_numeric_subject_is_rejected() {
        let claims = Claims {
            sub: "asha@example.com".to_string(),
            email: String::new(),
            name: String::new(),
            iat: 0,
            exp: 0,
        };
        assert!(CurrentUser::from_claims(claims).is_err());
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc.def"))), Some("abc.def"));
        assert_eq!(bearer_token(&parts_with(Some("Basic dXNlcjpwYXNz"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with(None)), None);
    }

    #[test]
    fn test_auth_errors_map_to_401() {
        assert!(matches!(
            AppError::from(AuthError::Expired),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::Signing("boom".to_string())),
            AppError::InternalServerError
        ));
    }
}
