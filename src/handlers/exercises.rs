use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::exercise::{CompleteExerciseRequest, Exercise, ExerciseCompletion};
use crate::AppState;

pub async fn list_exercises(State(state): State<AppState>) -> AppResult<Json<Vec<Exercise>>> {
    let exercises = sqlx::query_as::<_, Exercise>("SELECT * FROM exercises ORDER BY id ASC")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(exercises))
}

pub async fn complete_exercise(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CompleteExerciseRequest>,
) -> AppResult<(StatusCode, Json<ExerciseCompletion>)> {
    let exercise_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM exercises WHERE id = $1)")
            .bind(body.exercise_id)
            .fetch_one(&state.db)
            .await?;
    if !exercise_exists {
        return Err(AppError::NotFound("Exercise not found".into()));
    }

    // Completing the same exercise again records a new row; history is the point.
    let completion = sqlx::query_as::<_, ExerciseCompletion>(
        r#"
        INSERT INTO exercise_completions (user_id, exercise_id)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(auth_user.id)
    .bind(body.exercise_id)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(completion)))
}
