use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmotionLog {
    pub id: i64,
    pub user_id: Uuid,
    pub emotion: EmotionCategory,
    pub intensity: Option<i32>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "emotion_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmotionCategory {
    Happy,
    Sad,
    Anxious,
    Angry,
    Calm,
    Stressed,
}

impl EmotionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "HAPPY",
            Self::Sad => "SAD",
            Self::Anxious => "ANXIOUS",
            Self::Angry => "ANGRY",
            Self::Calm => "CALM",
            Self::Stressed => "STRESSED",
        }
    }
}

impl std::str::FromStr for EmotionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HAPPY" => Ok(Self::Happy),
            "SAD" => Ok(Self::Sad),
            "ANXIOUS" => Ok(Self::Anxious),
            "ANGRY" => Ok(Self::Angry),
            "CALM" => Ok(Self::Calm),
            "STRESSED" => Ok(Self::Stressed),
            other => Err(format!("unknown emotion category: {other}")),
        }
    }
}

/// The emotion arrives as a plain string so an out-of-enum value can be
/// turned into a validation error instead of a body-rejection.
#[derive(Debug, Deserialize)]
pub struct CreateEmotionLogRequest {
    pub emotion: String,
    pub intensity: Option<i32>,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_round_trips_through_its_wire_name() {
        for category in [
            EmotionCategory::Happy,
            EmotionCategory::Sad,
            EmotionCategory::Anxious,
            EmotionCategory::Angry,
            EmotionCategory::Calm,
            EmotionCategory::Stressed,
        ] {
            assert_eq!(category.as_str().parse::<EmotionCategory>(), Ok(category));
            assert_eq!(
                serde_json::to_value(category).unwrap(),
                category.as_str()
            );
        }
    }

    #[test]
    fn unknown_or_lowercase_categories_do_not_parse() {
        assert!("EUPHORIC".parse::<EmotionCategory>().is_err());
        assert!("happy".parse::<EmotionCategory>().is_err());
        assert!("".parse::<EmotionCategory>().is_err());
    }
}
