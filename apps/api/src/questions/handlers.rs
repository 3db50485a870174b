//! Axum route handlers for quiz generation.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::documents::{extract_upload, read_upload};
use crate::errors::AppError;
use crate::models::quiz::{GeneratedQuestion, TestRow};
use crate::questions::generator::QuestionGenerator;
use crate::questions::store::{self, NewTest};
use crate::questions::Difficulty;
use crate::routes::extract::PathParam;
use crate::routes::params::{parse_flag, parse_in_range, required};
use crate::state::AppState;

const DEFAULT_NUM_QUESTIONS: u32 = 5;
const MAX_NUM_QUESTIONS: u32 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuestionsQuery {
    pub num_questions: Option<String>,
    pub difficulty: Option<String>,
    pub test_title: Option<String>,
    pub web_research: Option<String>,
}

/// Validated form of `GenerateQuestionsQuery`.
#[derive(Debug, PartialEq)]
pub struct QuestionParams {
    pub num_questions: u32,
    pub difficulty: Difficulty,
    pub test_title: String,
    pub web_research: bool,
}

impl GenerateQuestionsQuery {
    pub fn validate(&self) -> Result<QuestionParams, AppError> {
        let num_questions = parse_in_range(
            "num_questions",
            self.num_questions.as_deref(),
            DEFAULT_NUM_QUESTIONS,
            1..=MAX_NUM_QUESTIONS,
        )?;
        let difficulty =
            required("difficulty", self.difficulty.as_deref())?.parse::<Difficulty>()?;
        let test_title = required("test_title", self.test_title.as_deref())?.to_string();
        let web_research = parse_flag("web_research", self.web_research.as_deref())?;

        Ok(QuestionParams {
            num_questions,
            difficulty,
            test_title,
            web_research,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<GeneratedQuestion>,
    pub test_id: Uuid,
}

/// POST /questions/generate-questions
///
/// Upload → extract text → generate → persist test and questions together.
pub async fn handle_generate_questions(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<GenerateQuestionsQuery>,
    multipart: Multipart,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let params = query.validate()?;
    let upload = read_upload(multipart).await?;
    info!(
        "Question request from {}: '{}' ({} bytes)",
        user.username,
        upload.filename,
        upload.bytes.len()
    );
    let text = extract_upload(upload).await?;

    let mut generator = QuestionGenerator::new(state.llm.clone());
    if params.web_research {
        generator = generator.with_research(state.research.clone());
    }
    let questions = generator
        .generate_questions(&text, params.num_questions, params.difficulty)
        .await?;

    let test_id = store::insert_test_with_questions(
        &state.db,
        NewTest {
            user_id: user.id,
            title: &params.test_title,
            num_questions: params.num_questions as i32,
            difficulty: params.difficulty.as_str(),
        },
        &questions,
    )
    .await?;

    info!("Stored test {test_id} with {} questions", questions.len());
    Ok(Json(GenerateQuestionsResponse { questions, test_id }))
}

/// GET /questions/my-tests
pub async fn handle_my_tests(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<TestRow>>, AppError> {
    Ok(Json(store::list_tests(&state.db, user.id).await?))
}

/// GET /questions/:test_id
///
/// Another user's test is reported as missing.
pub async fn handle_get_test_questions(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(test_id): PathParam<Uuid>,
) -> Result<Json<Vec<GeneratedQuestion>>, AppError> {
    store::find_test(&state.db, test_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("test with id: {test_id} does not exist")))?;

    Ok(Json(store::list_questions(&state.db, test_id).await?))
}
