use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::diary::{CreateDiaryEntryRequest, DiaryEntry, UpdateDiaryEntryRequest};
use crate::AppState;

// Every query below is scoped to the caller; an entry owned by someone else
// is indistinguishable from one that does not exist.

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<DiaryEntry>>> {
    let entries = sqlx::query_as::<_, DiaryEntry>(
        r#"
        SELECT * FROM diary_entries
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateDiaryEntryRequest>,
) -> AppResult<(StatusCode, Json<DiaryEntry>)> {
    validate_title(&body.title)?;
    validate_mood(body.mood)?;

    let entry = sqlx::query_as::<_, DiaryEntry>(
        r#"
        INSERT INTO diary_entries (user_id, title, content, mood)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(auth_user.id)
    .bind(&body.title)
    .bind(&body.content)
    .bind(body.mood)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<i64>,
) -> AppResult<Json<DiaryEntry>> {
    let entry = sqlx::query_as::<_, DiaryEntry>(
        "SELECT * FROM diary_entries WHERE id = $1 AND user_id = $2",
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<i64>,
    Json(body): Json<UpdateDiaryEntryRequest>,
) -> AppResult<Json<DiaryEntry>> {
    if let Some(title) = &body.title {
        validate_title(title)?;
    }
    if let Some(mood) = body.mood {
        validate_mood(mood)?;
    }

    let entry = sqlx::query_as::<_, DiaryEntry>(
        r#"
        UPDATE diary_entries SET
            title = COALESCE($3, title),
            content = COALESCE($4, content),
            mood = COALESCE($5, mood),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .bind(&body.title)
    .bind(&body.content)
    .bind(body.mood)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<i64>,
) -> AppResult<StatusCode> {
    let result = sqlx::query("DELETE FROM diary_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Entry not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    Ok(())
}

fn validate_mood(mood: i32) -> AppResult<()> {
    if !(1..=5).contains(&mood) {
        return Err(AppError::Validation("Mood must be between 1 and 5".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_scale_endpoints_are_inclusive() {
        assert!(validate_mood(1).is_ok());
        assert!(validate_mood(3).is_ok());
        assert!(validate_mood(5).is_ok());
    }

    #[test]
    fn mood_outside_the_scale_is_rejected() {
        assert!(matches!(validate_mood(0), Err(AppError::Validation(_))));
        assert!(matches!(validate_mood(6), Err(AppError::Validation(_))));
        assert!(matches!(validate_mood(-3), Err(AppError::Validation(_))));
    }

    #[test]
    fn update_request_fields_are_all_optional() {
        let body: UpdateDiaryEntryRequest = serde_json::from_str("{}").unwrap();
        assert!(body.title.is_none());
        assert!(body.content.is_none());
        assert!(body.mood.is_none());
    }

    #[test]
    fn a_blank_title_is_rejected_on_create_and_update() {
        // Both paths share the same rule: a present title must be non-empty.
        assert!(matches!(validate_title(""), Err(AppError::Validation(_))));
        assert!(validate_title("Hoy").is_ok());
    }

    #[test]
    fn create_request_requires_every_field() {
        let missing_mood = serde_json::from_str::<CreateDiaryEntryRequest>(
            r#"{"title": "Today", "content": "Fine"}"#,
        );
        assert!(missing_mood.is_err());

        let complete = serde_json::from_str::<CreateDiaryEntryRequest>(
            r#"{"title": "Today", "content": "Fine", "mood": 4}"#,
        )
        .unwrap();
        assert_eq!(complete.mood, 4);
    }
}
