use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct StudyPlanRow {
    pub id: Uuid,
    pub topic: String,
    /// `StudyPlanData` serialized as JSON text.
    pub content: String,
    pub quick_reference: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
