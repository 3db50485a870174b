use sqlx::PgPool;
use uuid::Uuid;

use crate::models::study_plan::StudyPlanRow;

pub async fn insert_study_plan(
    pool: &PgPool,
    user_id: Uuid,
    topic: &str,
    content_json: &str,
    quick_reference: Option<&str>,
) -> Result<StudyPlanRow, sqlx::Error> {
    sqlx::query_as::<_, StudyPlanRow>(
        r#"
        INSERT INTO study_plans (id, topic, content, quick_reference, user_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(topic)
    .bind(content_json)
    .bind(quick_reference)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn list_study_plans(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<StudyPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, StudyPlanRow>(
        "SELECT * FROM study_plans WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_study_plan(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<StudyPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, StudyPlanRow>("SELECT * FROM study_plans WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn delete_study_plan(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM study_plans WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
