use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Datelike;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::category_filter;
use crate::models::tip::Tip;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TipListQuery {
    pub categoria: Option<String>,
}

pub async fn list_tips(
    State(state): State<AppState>,
    Query(query): Query<TipListQuery>,
) -> AppResult<Json<Vec<Tip>>> {
    let tips = match category_filter(query.categoria) {
        Some(category) => {
            sqlx::query_as::<_, Tip>("SELECT * FROM tips WHERE category = $1 ORDER BY id ASC")
                .bind(category)
                .fetch_all(&state.db)
                .await?
        }
        None => {
            sqlx::query_as::<_, Tip>("SELECT * FROM tips ORDER BY id ASC")
                .fetch_all(&state.db)
                .await?
        }
    };

    Ok(Json(tips))
}

/// Everyone sees the same tip on a given day: the collection in id order,
/// indexed by day-of-year modulo its size.
pub async fn tip_of_day(State(state): State<AppState>) -> AppResult<Json<Tip>> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tips")
        .fetch_one(&state.db)
        .await?;

    let day_of_year = state.clock.today().ordinal();
    let index = rotation_index(day_of_year, count)
        .ok_or(AppError::NotFound("No tips available".into()))?;

    let tip = sqlx::query_as::<_, Tip>("SELECT * FROM tips ORDER BY id ASC OFFSET $1 LIMIT 1")
        .bind(index)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("No tips available".into()))?;

    Ok(Json(tip))
}

fn rotation_index(day_of_year: u32, count: i64) -> Option<i64> {
    if count <= 0 {
        return None;
    }
    Some(day_of_year as i64 % count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use chrono::NaiveDate;

    #[test]
    fn day_seven_of_five_tips_lands_on_index_two() {
        assert_eq!(rotation_index(7, 5), Some(2));
    }

    #[test]
    fn rotation_wraps_within_the_collection() {
        assert_eq!(rotation_index(365, 5), Some(0));
        assert_eq!(rotation_index(366, 5), Some(1));
        assert_eq!(rotation_index(1, 1), Some(0));
    }

    #[test]
    fn empty_collection_has_no_index() {
        assert_eq!(rotation_index(7, 0), None);
        assert_eq!(rotation_index(200, -1), None);
    }

    #[test]
    fn same_day_and_collection_give_the_same_index() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        let first = rotation_index(clock.today().ordinal(), 5);
        let second = rotation_index(clock.today().ordinal(), 5);
        assert_eq!(first, second);
        assert_eq!(first, Some(2));
    }

    #[test]
    fn rotation_covers_every_index_over_a_cycle() {
        let hit: std::collections::HashSet<i64> =
            (1..=5).filter_map(|day| rotation_index(day, 5)).collect();
        assert_eq!(hit.len(), 5);
    }
}
