use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub role: String,
    #[sqlx(rename = "type")]
    pub interview_type: String,
    pub level: String,
    /// JSON array of strings.
    pub techstack: String,
    /// JSON array of question strings.
    pub questions: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
