use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub category: ExerciseCategory,
    pub icon: ExerciseIcon,
    pub duration_minutes: i32,
    pub instructions: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "exercise_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseCategory {
    Breathing,
    Meditation,
    Relaxation,
    Movement,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "exercise_icon", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseIcon {
    Wind,
    Brain,
    Heart,
    Moon,
    Sun,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseCompletion {
    pub id: i64,
    pub user_id: Uuid,
    pub exercise_id: i64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteExerciseRequest {
    pub exercise_id: i64,
}
