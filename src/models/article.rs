use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub cover_url: Option<String>,
    pub reading_minutes: i32,
    pub created_at: DateTime<Utc>,
}
