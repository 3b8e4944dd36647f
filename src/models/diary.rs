use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaryEntry {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub mood: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDiaryEntryRequest {
    pub title: String,
    pub content: String,
    pub mood: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDiaryEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<i32>,
}
