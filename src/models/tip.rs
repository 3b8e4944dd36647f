use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tip {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}
