//! Axum route handlers for study plans.

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::study_plan::StudyPlanRow;
use crate::routes::extract::{JsonBody, PathParam};
use crate::state::AppState;
use crate::study_plans::generator::StudyPlanGenerator;
use crate::study_plans::store;
use crate::study_plans::{StudyPlanData, StudyPlanSection};

#[derive(Debug, Deserialize)]
pub struct StudyPlanRequest {
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct StudyPlanResponse {
    pub id: Uuid,
    pub topic: String,
    pub overview: String,
    pub learning_objectives: Vec<String>,
    pub sections: Vec<StudyPlanSection>,
    pub total_estimated_time: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StudyPlanResponse {
    fn new(row: &StudyPlanRow, plan: StudyPlanData) -> Self {
        Self {
            id: row.id,
            topic: row.topic.clone(),
            overview: plan.overview,
            learning_objectives: plan.learning_objectives,
            sections: plan.sections,
            total_estimated_time: plan.total_estimated_time,
            created_at: row.created_at,
            error: plan.error,
        }
    }

    /// Rebuilds the response from a stored row.
    fn from_row(row: &StudyPlanRow) -> Result<Self, AppError> {
        let plan: StudyPlanData = serde_json::from_str(&row.content)
            .with_context(|| format!("stored study plan {} is not valid JSON", row.id))?;
        Ok(Self::new(row, plan))
    }
}

#[derive(Debug, Serialize)]
pub struct QuickReferenceResponse {
    pub id: Uuid,
    pub topic: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Study plan with ID {id} not found"))
}

/// POST /studyplan/generate-studyplan
///
/// Generation failures still answer 200 with `error` set; only a failed
/// insert is a 500.
pub async fn handle_generate_study_plan(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<StudyPlanRequest>,
) -> Result<Json<StudyPlanResponse>, AppError> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    let generator = StudyPlanGenerator::new(state.llm.clone(), state.research.clone());
    let plan = generator.generate_study_plan(topic).await;
    let quick_reference = generator.generate_quick_reference(topic).await;

    let content_json = serde_json::to_string(&plan).context("serializing study plan")?;
    let row = store::insert_study_plan(
        &state.db,
        user.id,
        topic,
        &content_json,
        quick_reference.as_deref(),
    )
    .await?;

    info!(
        "Stored study plan {} for {} (degraded: {})",
        row.id,
        user.username,
        plan.error.is_some()
    );
    Ok(Json(StudyPlanResponse::new(&row, plan)))
}

/// GET /studyplan
pub async fn handle_list_study_plans(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<StudyPlanResponse>>, AppError> {
    let rows = store::list_study_plans(&state.db, user.id).await?;
    let plans = rows
        .iter()
        .map(StudyPlanResponse::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(plans))
}

/// GET /studyplan/:id
pub async fn handle_get_study_plan(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<StudyPlanResponse>, AppError> {
    let row = store::find_study_plan(&state.db, id, user.id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(StudyPlanResponse::from_row(&row)?))
}

/// GET /studyplan/:id/reference
pub async fn handle_get_quick_reference(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<QuickReferenceResponse>, AppError> {
    let row = store::find_study_plan(&state.db, id, user.id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let content = row.quick_reference.ok_or_else(|| {
        AppError::NotFound("Quick reference guide not found for this study plan".to_string())
    })?;

    Ok(Json(QuickReferenceResponse {
        id: row.id,
        topic: row.topic,
        content,
        created_at: row.created_at,
    }))
}

/// DELETE /studyplan/:id
pub async fn handle_delete_study_plan(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, AppError> {
    if !store::delete_study_plan(&state.db, id, user.id).await? {
        return Err(not_found(id));
    }
    info!("Deleted study plan {id}");
    Ok(StatusCode::NO_CONTENT)
}
