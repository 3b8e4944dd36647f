use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::emotion::{CreateEmotionLogRequest, EmotionCategory, EmotionLog};
use crate::AppState;

pub async fn log_emotion(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEmotionLogRequest>,
) -> AppResult<(StatusCode, Json<EmotionLog>)> {
    let emotion: EmotionCategory = body
        .emotion
        .parse()
        .map_err(|_| AppError::Validation(format!("Unknown emotion category: {}", body.emotion)))?;

    // Intensity is free-form by contract; only the category is constrained.
    let log = sqlx::query_as::<_, EmotionLog>(
        r#"
        INSERT INTO emotion_logs (user_id, emotion, intensity, note)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(auth_user.id)
    .bind(emotion)
    .bind(body.intensity)
    .bind(&body.note)
    .fetch_one(&state.db)
    .await?;

    tracing::debug!(user_id = %auth_user.id, emotion = log.emotion.as_str(), "Emotion logged");

    Ok((StatusCode::CREATED, Json(log)))
}
