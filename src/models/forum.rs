use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Post row joined with its author's alias and the denormalized counters the
/// feed needs. Shape must line up with the SELECT lists in `handlers::forum`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostWithMeta {
    pub id: i64,
    pub user_id: Uuid,
    pub author_alias: Option<String>,
    pub title: String,
    pub content: String,
    pub category: PostCategory,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub comment_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "post_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostCategory {
    Anxiety,
    Depression,
    Stress,
    Motivation,
    General,
}

impl std::str::FromStr for PostCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANXIETY" => Ok(Self::Anxiety),
            "DEPRESSION" => Ok(Self::Depression),
            "STRESS" => Ok(Self::Stress),
            "MOTIVATION" => Ok(Self::Motivation),
            "GENERAL" => Ok(Self::General),
            other => Err(format!("unknown post category: {other}")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: PostWithMeta,
    pub comments: Vec<CommentWithAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub post_id: i64,
    pub user_id: Uuid,
    pub author_alias: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct LikeStatus {
    pub liked: bool,
    pub total_likes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_categories_parse_from_their_wire_names() {
        assert_eq!("ANXIETY".parse::<PostCategory>(), Ok(PostCategory::Anxiety));
        assert_eq!("GENERAL".parse::<PostCategory>(), Ok(PostCategory::General));
        assert!("OFF_TOPIC".parse::<PostCategory>().is_err());
        assert!("anxiety".parse::<PostCategory>().is_err());
    }

    #[test]
    fn post_detail_flattens_the_post_fields() {
        let detail = PostDetail {
            post: PostWithMeta {
                id: 3,
                user_id: Uuid::new_v4(),
                author_alias: None,
                title: "Checking in".into(),
                content: "Rough week".into(),
                category: PostCategory::Stress,
                created_at: Utc::now(),
                like_count: 2,
                comment_count: 0,
            },
            comments: vec![],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["title"], "Checking in");
        assert_eq!(json["category"], "STRESS");
        assert_eq!(json["like_count"], 2);
        assert!(json["author_alias"].is_null());
    }

    #[test]
    fn like_status_serializes_both_fields() {
        let json = serde_json::to_value(LikeStatus {
            liked: true,
            total_likes: 7,
        })
        .unwrap();
        assert_eq!(json["liked"], true);
        assert_eq!(json["total_likes"], 7);
    }
}
