use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::questionnaire::{
    Answer, Question, Questionnaire, QuestionnaireWithQuestions, SubmitAnswerRequest,
};
use crate::AppState;

pub async fn list_active(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<QuestionnaireWithQuestions>>> {
    let questionnaires = sqlx::query_as::<_, Questionnaire>(
        "SELECT * FROM questionnaires WHERE is_active = true ORDER BY id ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let mut result = Vec::with_capacity(questionnaires.len());
    for questionnaire in questionnaires {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE questionnaire_id = $1 ORDER BY position ASC",
        )
        .bind(questionnaire.id)
        .fetch_all(&state.db)
        .await?;

        result.push(QuestionnaireWithQuestions {
            questionnaire,
            questions,
        });
    }

    Ok(Json(result))
}

pub async fn submit_answer(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SubmitAnswerRequest>,
) -> AppResult<(StatusCode, Json<Answer>)> {
    let question_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM questions WHERE id = $1)")
            .bind(body.question_id)
            .fetch_one(&state.db)
            .await?;
    if !question_exists {
        return Err(AppError::NotFound("Question not found".into()));
    }

    // The value is stored as given; the question's display kind does not
    // constrain it. Repeat submissions accumulate rather than overwrite.
    let answer = sqlx::query_as::<_, Answer>(
        r#"
        INSERT INTO answers (user_id, question_id, value)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(auth_user.id)
    .bind(body.question_id)
    .bind(body.value)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(answer)))
}
