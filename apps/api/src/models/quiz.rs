use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A generated multiple-choice question. `answer` is whatever the model
/// returned; it is not checked against the four options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GeneratedQuestion {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestRow {
    pub id: Uuid,
    pub title: String,
    pub num_questions: i32,
    pub difficulty: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
