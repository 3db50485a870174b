use sqlx::PgPool;
use uuid::Uuid;

use crate::models::summary::SummaryRow;

pub struct NewSummary<'a> {
    pub user_id: Uuid,
    pub content: &'a str,
    pub original_filename: Option<&'a str>,
    pub word_count: i32,
    pub detail_level: &'a str,
}

pub async fn insert_summary(
    pool: &PgPool,
    summary: NewSummary<'_>,
) -> Result<SummaryRow, sqlx::Error> {
    sqlx::query_as::<_, SummaryRow>(
        r#"
        INSERT INTO summaries (id, content, original_filename, word_count, detail_level, user_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(summary.content)
    .bind(summary.original_filename)
    .bind(summary.word_count)
    .bind(summary.detail_level)
    .bind(summary.user_id)
    .fetch_one(pool)
    .await
}

pub async fn list_summaries(pool: &PgPool, user_id: Uuid) -> Result<Vec<SummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, SummaryRow>(
        "SELECT * FROM summaries WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_summary(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<SummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, SummaryRow>("SELECT * FROM summaries WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Returns false when nothing owned by `user_id` matched.
pub async fn delete_summary(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM summaries WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
