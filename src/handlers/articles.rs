use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::category_filter;
use crate::models::article::Article;
use crate::AppState;

// The article library is readable without credentials.

#[derive(Debug, Deserialize)]
pub struct ArticleListQuery {
    pub search: Option<String>,
    pub categoria: Option<String>,
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> AppResult<Json<Vec<Article>>> {
    let pattern = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(like_pattern);
    let category = category_filter(query.categoria);

    let articles = match (pattern, category) {
        (Some(pattern), Some(category)) => {
            sqlx::query_as::<_, Article>(
                r#"
                SELECT * FROM articles
                WHERE (title ILIKE $1 OR summary ILIKE $1 OR category ILIKE $1)
                  AND category = $2
                ORDER BY id ASC
                "#,
            )
            .bind(pattern)
            .bind(category)
            .fetch_all(&state.db)
            .await?
        }
        (Some(pattern), None) => {
            sqlx::query_as::<_, Article>(
                r#"
                SELECT * FROM articles
                WHERE title ILIKE $1 OR summary ILIKE $1 OR category ILIKE $1
                ORDER BY id ASC
                "#,
            )
            .bind(pattern)
            .fetch_all(&state.db)
            .await?
        }
        (None, Some(category)) => {
            sqlx::query_as::<_, Article>(
                "SELECT * FROM articles WHERE category = $1 ORDER BY id ASC",
            )
            .bind(category)
            .fetch_all(&state.db)
            .await?
        }
        (None, None) => {
            sqlx::query_as::<_, Article>("SELECT * FROM articles ORDER BY id ASC")
                .fetch_all(&state.db)
                .await?
        }
    };

    Ok(Json(articles))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> AppResult<Json<Article>> {
    let article = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
        .bind(article_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Article not found".into()))?;

    Ok(Json(article))
}

/// Builds the ILIKE pattern for a substring search. LIKE metacharacters in
/// the term are escaped so they match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_the_term_in_wildcards() {
        assert_eq!(like_pattern("sleep"), "%sleep%");
        assert_eq!(like_pattern("mental health"), "%mental health%");
    }

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn blank_search_terms_are_ignored() {
        let query = ArticleListQuery {
            search: Some("   ".into()),
            categoria: None,
        };
        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);
        assert!(pattern.is_none());
    }
}
