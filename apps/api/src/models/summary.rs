use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SummaryRow {
    pub id: Uuid,
    /// Markdown produced by the summarizer.
    pub content: String,
    pub original_filename: Option<String>,
    /// Requested target length, not a measured count.
    pub word_count: i32,
    pub detail_level: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
