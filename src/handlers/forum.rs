use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::category_filter;
use crate::models::forum::{
    CommentWithAuthor, CreateCommentRequest, CreatePostRequest, LikeStatus, PostCategory,
    PostDetail, PostWithMeta,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForumListQuery {
    pub categoria: Option<String>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ForumListQuery>,
) -> AppResult<Json<Vec<PostWithMeta>>> {
    let posts = match category_filter(query.categoria) {
        Some(category) => {
            sqlx::query_as::<_, PostWithMeta>(
                r#"
                SELECT p.id, p.user_id, u.alias AS author_alias, p.title, p.content,
                       p.category, p.created_at,
                       (SELECT COUNT(*) FROM post_likes pl WHERE pl.post_id = p.id) AS like_count,
                       (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
                FROM posts p
                JOIN users u ON u.id = p.user_id
                WHERE p.category::text = $1
                ORDER BY p.created_at DESC, p.id DESC
                "#,
            )
            .bind(category)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as::<_, PostWithMeta>(
                r#"
                SELECT p.id, p.user_id, u.alias AS author_alias, p.title, p.content,
                       p.category, p.created_at,
                       (SELECT COUNT(*) FROM post_likes pl WHERE pl.post_id = p.id) AS like_count,
                       (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
                FROM posts p
                JOIN users u ON u.id = p.user_id
                ORDER BY p.created_at DESC, p.id DESC
                "#,
            )
            .fetch_all(&state.db)
            .await?
        }
    };

    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<PostWithMeta>)> {
    if body.title.is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    if body.content.is_empty() {
        return Err(AppError::Validation("Content is required".into()));
    }
    let category: PostCategory = body
        .category
        .parse()
        .map_err(|_| AppError::Validation(format!("Unknown post category: {}", body.category)))?;

    let post_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO posts (user_id, title, content, category)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(auth_user.id)
    .bind(&body.title)
    .bind(&body.content)
    .bind(category)
    .fetch_one(&state.db)
    .await?;

    let post = fetch_post(&state.db, post_id)
        .await?
        .ok_or(AppError::NotFound("Post not found".into()))?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> AppResult<Json<PostDetail>> {
    let post = fetch_post(&state.db, post_id)
        .await?
        .ok_or(AppError::NotFound("Post not found".into()))?;

    let comments = sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT c.id, c.post_id, c.user_id, u.alias AS author_alias, c.content, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(PostDetail { post, comments }))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<i64>,
) -> AppResult<StatusCode> {
    let post_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(post_id)
            .fetch_one(&state.db)
            .await?;
    if !post_exists {
        return Err(AppError::NotFound("Post not found".into()));
    }

    // Long-standing client contract: a non-owner's delete reports success and
    // removes nothing. The owner scope below is what protects the row.
    sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn comment_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<i64>,
    Json(body): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentWithAuthor>)> {
    if body.content.is_empty() {
        return Err(AppError::Validation("Content is required".into()));
    }

    let post_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(post_id)
            .fetch_one(&state.db)
            .await?;
    if !post_exists {
        return Err(AppError::NotFound("Post not found".into()));
    }

    let comment = sqlx::query_as::<_, crate::models::forum::Comment>(
        r#"
        INSERT INTO comments (post_id, user_id, content)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(auth_user.id)
    .bind(&body.content)
    .fetch_one(&state.db)
    .await?;

    let author_alias = sqlx::query_scalar::<_, Option<String>>(
        "SELECT alias FROM users WHERE id = $1",
    )
    .bind(auth_user.id)
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentWithAuthor {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            author_alias,
            content: comment.content,
            created_at: comment.created_at,
        }),
    ))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<i64>,
) -> AppResult<Json<LikeStatus>> {
    let post_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(post_id)
            .fetch_one(&state.db)
            .await?;
    if !post_exists {
        return Err(AppError::NotFound("Post not found".into()));
    }

    // One row per (post, user). A concurrent duplicate resolves on the primary
    // key: whichever insert loses the conflict falls through to the unlike path.
    let inserted = sqlx::query(
        "INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(post_id)
    .bind(auth_user.id)
    .execute(&state.db)
    .await?;

    let liked = if inserted.rows_affected() == 1 {
        true
    } else {
        sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(auth_user.id)
            .execute(&state.db)
            .await?;
        false
    };

    let total_likes =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&state.db)
            .await?;

    Ok(Json(LikeStatus { liked, total_likes }))
}

async fn fetch_post(db: &PgPool, post_id: i64) -> AppResult<Option<PostWithMeta>> {
    let post = sqlx::query_as::<_, PostWithMeta>(
        r#"
        SELECT p.id, p.user_id, u.alias AS author_alias, p.title, p.content,
               p.category, p.created_at,
               (SELECT COUNT(*) FROM post_likes pl WHERE pl.post_id = p.id) AS like_count,
               (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE p.id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(db)
    .await?;

    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_reads_the_categoria_parameter() {
        let query: ForumListQuery =
            serde_json::from_str(r#"{"categoria": "ANXIETY"}"#).unwrap();
        assert_eq!(query.categoria.as_deref(), Some("ANXIETY"));

        let empty: ForumListQuery = serde_json::from_str("{}").unwrap();
        assert!(empty.categoria.is_none());
    }

    #[test]
    fn create_post_category_must_be_in_the_enumeration() {
        assert!("STRESS".parse::<PostCategory>().is_ok());
        assert!("VENTING".parse::<PostCategory>().is_err());
    }
}
