pub mod article;
pub mod diary;
pub mod emotion;
pub mod exercise;
pub mod forum;
pub mod questionnaire;
pub mod tip;
pub mod user;
