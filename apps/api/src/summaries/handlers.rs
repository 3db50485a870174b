//! Axum route handlers for document summaries.

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::documents::{extract_upload, read_upload};
use crate::errors::AppError;
use crate::models::summary::SummaryRow;
use crate::routes::extract::PathParam;
use crate::routes::params::{parse_flag, parse_in_range};
use crate::state::AppState;
use crate::summaries::generator::Summarizer;
use crate::summaries::store::{self, NewSummary};
use crate::summaries::DetailLevel;

const DEFAULT_WORD_LENGTH: u32 = 150;
const MAX_WORD_LENGTH: u32 = 5000;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateSummaryQuery {
    pub word_length: Option<String>,
    pub detail_level: Option<String>,
    pub web_research: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct SummaryParams {
    pub word_length: u32,
    pub detail_level: DetailLevel,
    pub web_research: bool,
}

impl GenerateSummaryQuery {
    pub fn validate(&self) -> Result<SummaryParams, AppError> {
        let word_length = parse_in_range(
            "word_length",
            self.word_length.as_deref(),
            DEFAULT_WORD_LENGTH,
            1..=MAX_WORD_LENGTH,
        )?;
        let detail_level = match self.detail_level.as_deref().map(str::trim) {
            None | Some("") => DetailLevel::Medium,
            Some(raw) => raw.parse::<DetailLevel>()?,
        };
        let web_research = parse_flag("web_research", self.web_research.as_deref())?;

        Ok(SummaryParams {
            word_length,
            detail_level,
            web_research,
        })
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!(
        "Summary with ID {id} not found or you don't have access to it"
    ))
}

/// POST /summary/generate-summary
///
/// The query is validated before the upload is read, so a bad
/// `detail_level` never reaches extraction or the model.
pub async fn handle_generate_summary(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<GenerateSummaryQuery>,
    multipart: Multipart,
) -> Result<Json<SummaryRow>, AppError> {
    let params = query.validate()?;
    let upload = read_upload(multipart).await?;
    let filename = upload.filename.clone();
    let text = extract_upload(upload).await?;

    let mut summarizer = Summarizer::new(state.llm.clone());
    if params.web_research {
        summarizer = summarizer.with_research(state.research.clone());
    }
    let content = summarizer
        .summarize(&text, params.word_length, params.detail_level)
        .await?;

    let row = store::insert_summary(
        &state.db,
        NewSummary {
            user_id: user.id,
            content: &content,
            original_filename: Some(filename.as_str()).filter(|f| !f.is_empty()),
            word_count: params.word_length as i32,
            detail_level: params.detail_level.as_str(),
        },
    )
    .await?;

    info!("Stored summary {} for user {}", row.id, user.id);
    Ok(Json(row))
}

/// GET /summary
///
/// Newest first.
pub async fn handle_list_summaries(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SummaryRow>>, AppError> {
    Ok(Json(store::list_summaries(&state.db, user.id).await?))
}

/// GET /summary/:id
pub async fn handle_get_summary(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<SummaryRow>, AppError> {
    store::find_summary(&state.db, id, user.id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// DELETE /summary/:id
pub async fn handle_delete_summary(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, AppError> {
    if !store::delete_summary(&state.db, id, user.id).await? {
        return Err(not_found(id));
    }
    info!("Deleted summary {id}");
    Ok(StatusCode::NO_CONTENT)
}
