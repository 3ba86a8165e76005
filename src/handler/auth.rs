use axum::{extract::State, http::StatusCode, Json};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::api_models::auth::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse,
};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::models::{NewUser, User};
use crate::repositories::users::{self, PgPoolConn};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::session::CurrentUser;

/// Load the stored user behind a session. A valid token for a deleted
/// account is a 404, not a 401.
pub(crate) fn resolve_owner(conn: &mut PgPoolConn, current: &CurrentUser) -> Result<User, AppError> {
    users::find_by_id(conn, current.id)
        .map_err(|e| {
            tracing::error!("Failed to look up user {}: {}", current.id, e);
            AppError::InternalServerError
        })?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// 注册新用户
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            AppError::InternalServerError
        })?;

    let new_user = NewUser {
        name: payload.name.trim().to_string(),
        email,
        password_hash,
    };

    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;
    let created = users::create(&mut conn, &new_user).map_err(|e| match e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AppError::BadRequest("User already exists".to_string())
        }
        other => {
            tracing::error!("Failed to create user: {}", other);
            AppError::InternalServerError
        }
    })?;

    tracing::info!("Registered user {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created",
            user: created.into(),
        }),
    ))
}

/// 邮箱密码登录，返回 Bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || AppError::Unauthorized("invalid email or password".to_string());

    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(invalid());
    }

    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;
    let user = users::find_by_email(&mut conn, &email)
        .map_err(|e| {
            tracing::error!("Failed to look up user by email: {}", e);
            AppError::InternalServerError
        })?
        .ok_or_else(invalid)?;
    drop(conn);

    let password = payload.password;
    let stored = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {}", e);
            AppError::InternalServerError
        })?;
    if !valid {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(invalid());
    }

    let token = state.sessions.issue(&user)?;
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: state.sessions.ttl().as_secs(),
        user: user.into(),
    }))
}

/// 当前会话对应的用户
pub async fn session(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;
    let user = resolve_owner(&mut conn, &current)?;
    Ok(Json(user.into()))
}
