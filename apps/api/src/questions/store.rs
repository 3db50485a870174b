use sqlx::PgPool;
use uuid::Uuid;

use crate::models::quiz::{GeneratedQuestion, TestRow};

pub struct NewTest<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub num_questions: i32,
    pub difficulty: &'a str,
}

/// Inserts a test and its questions in one transaction. Nothing is written
/// if any insert fails. Every call creates a new test; there is no dedup.
pub async fn insert_test_with_questions(
    pool: &PgPool,
    test: NewTest<'_>,
    questions: &[GeneratedQuestion],
) -> Result<Uuid, sqlx::Error> {
    let test_id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO tests (id, title, num_questions, difficulty, user_id)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(test_id)
    .bind(test.title)
    .bind(test.num_questions)
    .bind(test.difficulty)
    .bind(test.user_id)
    .execute(&mut *tx)
    .await?;

    for (position, q) in questions.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO questions
                (id, test_id, position, question, option_a, option_b, option_c, option_d, answer)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(test_id)
        .bind(position as i32)
        .bind(&q.question)
        .bind(&q.option_a)
        .bind(&q.option_b)
        .bind(&q.option_c)
        .bind(&q.option_d)
        .bind(&q.answer)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(test_id)
}

pub async fn list_tests(pool: &PgPool, user_id: Uuid) -> Result<Vec<TestRow>, sqlx::Error> {
    sqlx::query_as::<_, TestRow>(
        "SELECT * FROM tests WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_test(
    pool: &PgPool,
    test_id: Uuid,
    user_id: Uuid,
) -> Result<Option<TestRow>, sqlx::Error> {
    sqlx::query_as::<_, TestRow>("SELECT * FROM tests WHERE id = $1 AND user_id = $2")
        .bind(test_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_questions(
    pool: &PgPool,
    test_id: Uuid,
) -> Result<Vec<GeneratedQuestion>, sqlx::Error> {
    sqlx::query_as::<_, GeneratedQuestion>(
        r#"
        SELECT question, option_a, option_b, option_c, option_d, answer
        FROM questions
        WHERE test_id = $1
        ORDER BY position
        "#,
    )
    .bind(test_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_user(pool: &PgPool) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, username, email, password) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(format!("student-{id}"))
            .bind(format!("{id}@example.com"))
            .bind("not-a-real-hash")
            .execute(pool)
            .await
            .unwrap();
        id
    }

    fn question(n: usize) -> GeneratedQuestion {
        GeneratedQuestion {
            question: format!("Question {n}?"),
            option_a: "A".to_string(),
            option_b: "B".to_string(),
            option_c: "C".to_string(),
            option_d: "D".to_string(),
            answer: "A".to_string(),
        }
    }

    fn easy_test(user_id: Uuid) -> NewTest<'static> {
        NewTest {
            user_id,
            title: "Cell biology",
            num_questions: 3,
            difficulty: "easy",
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_test_row_and_questions_are_persisted(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let questions: Vec<_> = (1..=3).map(question).collect();

        let test_id = insert_test_with_questions(&pool, easy_test(user_id), &questions)
            .await
            .unwrap();

        let tests = list_tests(&pool, user_id).await.unwrap();
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].id, test_id);
        assert_eq!(tests[0].title, "Cell biology");
        assert_eq!(tests[0].num_questions, 3);
        assert_eq!(tests[0].difficulty, "easy");

        assert_eq!(list_questions(&pool, test_id).await.unwrap(), questions);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_identical_requests_create_separate_tests(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let questions: Vec<_> = (1..=3).map(question).collect();

        let first = insert_test_with_questions(&pool, easy_test(user_id), &questions)
            .await
            .unwrap();
        let second = insert_test_with_questions(&pool, easy_test(user_id), &questions)
            .await
            .unwrap();

        assert_ne!(first, second);
        let tests = list_tests(&pool, user_id).await.unwrap();
        assert_eq!(tests.len(), 2);
        assert_eq!(list_questions(&pool, first).await.unwrap().len(), 3);
        assert_eq!(list_questions(&pool, second).await.unwrap().len(), 3);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_tests_are_scoped_to_their_owner(pool: PgPool) {
        let owner = seed_user(&pool).await;
        let stranger = seed_user(&pool).await;
        let test_id = insert_test_with_questions(&pool, easy_test(owner), &[question(1)])
            .await
            .unwrap();

        assert!(find_test(&pool, test_id, owner).await.unwrap().is_some());
        assert!(find_test(&pool, test_id, stranger).await.unwrap().is_none());
        assert!(list_tests(&pool, stranger).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_failed_question_insert_rolls_back_the_test(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        // Postgres rejects NUL bytes in text columns.
        let mut broken = question(2);
        broken.question = "Question\0?".to_string();

        let result =
            insert_test_with_questions(&pool, easy_test(user_id), &[question(1), broken]).await;

        assert!(result.is_err());
        assert!(list_tests(&pool, user_id).await.unwrap().is_empty());
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
