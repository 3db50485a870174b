use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interview::InterviewRow;

pub struct NewInterview<'a> {
    pub user_id: Uuid,
    pub role: &'a str,
    pub interview_type: &'a str,
    pub level: &'a str,
    pub techstack_json: &'a str,
    pub questions_json: &'a str,
}

pub async fn insert_interview(
    pool: &PgPool,
    interview: NewInterview<'_>,
) -> Result<InterviewRow, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews (id, role, type, level, techstack, questions, user_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(interview.role)
    .bind(interview.interview_type)
    .bind(interview.level)
    .bind(interview.techstack_json)
    .bind(interview.questions_json)
    .bind(interview.user_id)
    .fetch_one(pool)
    .await
}

pub async fn list_interviews(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<InterviewRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_interview(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<InterviewRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn delete_interview(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM interviews WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
