//! Axum route handlers for mock interviews.

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
use crate::interviews::generator::{generate_interview_questions, InterviewSpec};
use crate::interviews::store::{self, NewInterview};
use crate::models::interview::InterviewRow;
use crate::routes::extract::{JsonBody, PathParam};
use crate::state::AppState;

const MAX_AMOUNT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct InterviewRequest {
    pub role: String,
    #[serde(rename = "type")]
    pub interview_type: String,
    pub level: String,
    #[serde(default)]
    pub techstack: Vec<String>,
    pub amount: u32,
}

impl InterviewRequest {
    fn validate(&self) -> Result<(), AppError> {
        for (name, value) in [
            ("role", &self.role),
            ("type", &self.interview_type),
            ("level", &self.level),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{name} cannot be empty")));
            }
        }
        if !(1..=MAX_AMOUNT).contains(&self.amount) {
            return Err(AppError::Validation(format!(
                "amount must be between 1 and {MAX_AMOUNT}"
            )));
        }
        Ok(())
    }
}

/// Interview with its JSON text columns decoded.
#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub id: Uuid,
    pub role: String,
    #[serde(rename = "type")]
    pub interview_type: String,
    pub level: String,
    pub techstack: Vec<String>,
    pub questions: Vec<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<InterviewRow> for InterviewResponse {
    type Error = AppError;

    fn try_from(row: InterviewRow) -> Result<Self, AppError> {
        let techstack = serde_json::from_str(&row.techstack)
            .with_context(|| format!("interview {} has an invalid techstack column", row.id))?;
        let questions = serde_json::from_str(&row.questions)
            .with_context(|| format!("interview {} has an invalid questions column", row.id))?;
        Ok(Self {
            id: row.id,
            role: row.role,
            interview_type: row.interview_type,
            level: row.level,
            techstack,
            questions,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Interview with ID {id} not found"))
}

/// POST /interviews/generate-interview-questions
pub async fn handle_generate_interview(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<InterviewRequest>,
) -> Result<(StatusCode, Json<InterviewResponse>), AppError> {
    request.validate()?;

    let spec = InterviewSpec {
        role: request.role.trim(),
        interview_type: request.interview_type.trim(),
        level: request.level.trim(),
        techstack: &request.techstack,
        amount: request.amount,
    };
    let questions = generate_interview_questions(state.llm.clone(), &spec).await?;

    let techstack_json =
        serde_json::to_string(&request.techstack).context("serializing techstack")?;
    let questions_json = serde_json::to_string(&questions).context("serializing questions")?;
    let row = store::insert_interview(
        &state.db,
        NewInterview {
            user_id: user.id,
            role: spec.role,
            interview_type: spec.interview_type,
            level: spec.level,
            techstack_json: &techstack_json,
            questions_json: &questions_json,
        },
    )
    .await?;

    info!(
        "Stored interview {} with {} questions for {}",
        row.id,
        questions.len(),
        user.username
    );
    Ok((StatusCode::CREATED, Json(InterviewResponse::try_from(row)?)))
}

/// GET /interviews
///
/// Newest first.
pub async fn handle_list_interviews(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<InterviewResponse>>, AppError> {
    let interviews = store::list_interviews(&state.db, user.id)
        .await?
        .into_iter()
        .map(InterviewResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(interviews))
}

/// GET /interviews/:id
pub async fn handle_get_interview(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<InterviewResponse>, AppError> {
    let row = store::find_interview(&state.db, id, user.id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(InterviewResponse::try_from(row)?))
}

/// DELETE /interviews/:id
pub async fn handle_delete_interview(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, AppError> {
    if !store::delete_interview(&state.db, id, user.id).await? {
        return Err(not_found(id));
    }
    info!("Deleted interview {id}");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_type_key() {
        let request: InterviewRequest = serde_json::from_value(json!({
            "role": "Data Scientist",
            "type": "mixed",
            "level": "mid",
            "techstack": ["Python", "SQL"],
            "amount": 5
        }))
        .unwrap();
        assert_eq!(request.interview_type, "mixed");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_validation() {
        let mut request: InterviewRequest = serde_json::from_value(json!({
            "role": "SRE", "type": "technical", "level": "senior", "amount": 0
        }))
        .unwrap();
        assert!(request.techstack.is_empty());
        assert!(request.validate().is_err());

        request.amount = 3;
        request.role = " ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_row_columns_are_decoded() {
        let row = InterviewRow {
            id: Uuid::new_v4(),
            role: "SRE".to_string(),
            interview_type: "technical".to_string(),
            level: "senior".to_string(),
            techstack: r#"["Kubernetes"]"#.to_string(),
            questions: r#"["What is an SLO?"]"#.to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(InterviewResponse::try_from(row).unwrap()).unwrap();
        assert_eq!(value["type"], "technical");
        assert_eq!(value["techstack"], json!(["Kubernetes"]));
        assert_eq!(value["questions"], json!(["What is an SLO?"]));
    }
}
