use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Questionnaire {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub questionnaire_id: i64,
    pub text: String,
    pub kind: QuestionKind,
    pub position: i32,
}

/// How a client should render the question. Deliberately does not constrain
/// the submitted answer value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "question_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    Scale,
    Choice,
    Boolean,
    FreeText,
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireWithQuestions {
    #[serde(flatten)]
    pub questionnaire: Questionnaire,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub user_id: Uuid,
    pub question_id: i64,
    pub value: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: i64,
    pub value: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_uses_screaming_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(QuestionKind::FreeText).unwrap(),
            "FREE_TEXT"
        );
        assert_eq!(serde_json::to_value(QuestionKind::Scale).unwrap(), "SCALE");

        let parsed: QuestionKind = serde_json::from_value("BOOLEAN".into()).unwrap();
        assert_eq!(parsed, QuestionKind::Boolean);
    }

    #[test]
    fn questionnaire_flattens_next_to_its_questions() {
        let wrapped = QuestionnaireWithQuestions {
            questionnaire: Questionnaire {
                id: 1,
                name: "PHQ-9".into(),
                description: "Nine questions".into(),
                is_active: true,
                created_at: Utc::now(),
            },
            questions: vec![],
        };

        let json = serde_json::to_value(&wrapped).unwrap();
        assert_eq!(json["name"], "PHQ-9");
        assert!(json["questions"].as_array().unwrap().is_empty());
    }
}
