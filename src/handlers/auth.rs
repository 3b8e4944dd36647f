use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{
    jwt::{create_access_token, create_token_pair, verify_refresh_token, TokenPair},
    middleware::AuthUser,
    password::{hash_password, verify_password},
};
use crate::error::{AppError, AppResult};
use crate::models::user::{User, UserProfile};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 150, message = "Alias must be 1-150 characters"))]
    pub alias: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserProfile,
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let email_taken = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&body.email)
        .fetch_one(&state.db)
        .await?;
    if email_taken > 0 {
        return Err(AppError::DuplicateEmail);
    }

    if let Some(alias) = &body.alias {
        let alias_taken =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE alias = $1")
                .bind(alias)
                .fetch_one(&state.db)
                .await?;
        if alias_taken > 0 {
            return Err(AppError::DuplicateAlias);
        }
    }

    let password_hash = hash_password(&body.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, alias, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.email)
    .bind(&body.alias)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(map_unique_violation)?;

    let tokens = create_token_pair(user.id, &state.config)?;
    tracing::info!(user_id = %user.id, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.into(),
            access: tokens.access,
            refresh: tokens.refresh,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&body.email)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !user.is_active {
        return Err(AppError::InvalidCredentials);
    }

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let tokens = create_token_pair(user.id, &state.config)?;
    Ok(Json(tokens))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let claims = verify_refresh_token(&body.refresh, &state.config)?;
    let access = create_access_token(claims.sub, &state.config)?;

    Ok(Json(serde_json::json!({ "access": access })))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(auth_user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}

// Both sides of a concurrent registration can pass the duplicate pre-checks;
// the loser then hits a unique index and still has to surface as a 409.
fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.kind() == sqlx::error::ErrorKind::UniqueViolation {
            match db.constraint() {
                Some("users_email_key") => return AppError::DuplicateEmail,
                Some("users_alias_key") => return AppError::DuplicateAlias,
                _ => {}
            }
        }
    }
    AppError::Database(e)
}
