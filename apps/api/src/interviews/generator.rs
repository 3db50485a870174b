use std::sync::Arc;

use tracing::info;

use crate::agent::{Agent, AgentError};
use crate::interviews::prompts::{INTERVIEW_INPUT, INTERVIEW_SYSTEM_TEMPLATE};
use crate::llm_client::prompts::fill;
use crate::llm_client::ChatModel;

/// Interview parameters as the caller sent them.
#[derive(Debug, Clone)]
pub struct InterviewSpec<'a> {
    pub role: &'a str,
    pub interview_type: &'a str,
    pub level: &'a str,
    pub techstack: &'a [String],
    pub amount: u32,
}

pub fn build_agent(model: Arc<dyn ChatModel>, spec: &InterviewSpec<'_>) -> Agent {
    let techstack = if spec.techstack.is_empty() {
        "not specified".to_string()
    } else {
        spec.techstack.join(", ")
    };
    let amount = spec.amount.to_string();
    let system = fill(
        INTERVIEW_SYSTEM_TEMPLATE,
        &[
            ("role", spec.role),
            ("interview_type", spec.interview_type),
            ("level", spec.level),
            ("techstack", techstack.as_str()),
            ("amount", amount.as_str()),
        ],
    );
    Agent::new(model, system)
}

/// Blank entries are dropped; an empty list is an error.
pub async fn generate_interview_questions(
    model: Arc<dyn ChatModel>,
    spec: &InterviewSpec<'_>,
) -> Result<Vec<String>, AgentError> {
    info!(
        "Generating {} {} interview questions for {}",
        spec.amount, spec.level, spec.role
    );

    let questions: Vec<String> = build_agent(model, spec)
        .run_structured::<Vec<String>>(INTERVIEW_INPUT)
        .await?
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();

    if questions.is_empty() {
        return Err(AgentError::EmptyOutput);
    }
    Ok(questions)
}
