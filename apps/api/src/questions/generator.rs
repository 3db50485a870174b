//! Question generator agent.

use std::sync::Arc;

use tracing::{info, warn};

use crate::agent::tools::ResearchTopicTool;
use crate::agent::{Agent, AgentError};
use crate::llm_client::prompts::fill;
use crate::llm_client::ChatModel;
use crate::models::quiz::GeneratedQuestion;
use crate::questions::prompts::{QUESTION_INPUT_PREFIX, QUESTION_SYSTEM_TEMPLATE};
use crate::questions::Difficulty;
use crate::research::WebResearch;

pub struct QuestionGenerator {
    model: Arc<dyn ChatModel>,
    research: Option<WebResearch>,
}

impl QuestionGenerator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            research: None,
        }
    }

    /// Lets the model pull in web material through `research_topic`.
    pub fn with_research(mut self, research: WebResearch) -> Self {
        self.research = Some(research);
        self
    }

    pub fn build_agent(&self, num_questions: u32, difficulty: Difficulty) -> Agent {
        let num_questions_text = num_questions.to_string();
        let system = fill(
            QUESTION_SYSTEM_TEMPLATE,
            &[
                ("num_questions", num_questions_text.as_str()),
                ("difficulty", difficulty.as_str()),
            ],
        );
        let agent = Agent::new(self.model.clone(), system);
        match &self.research {
            Some(research) => agent.with_tool(Arc::new(ResearchTopicTool::new(
                research.enricher.clone(),
                research.max_sources,
            ))),
            None => agent,
        }
    }

    /// Generates questions from `text`. The returned records are trusted as
    /// the model produced them, including the count.
    pub async fn generate_questions(
        &self,
        text: &str,
        num_questions: u32,
        difficulty: Difficulty,
    ) -> Result<Vec<GeneratedQuestion>, AgentError> {
        info!("Generating {num_questions} {difficulty} questions");

        let agent = self.build_agent(num_questions, difficulty);
        let questions: Vec<GeneratedQuestion> = agent
            .run_structured(&format!("{QUESTION_INPUT_PREFIX}{text}"))
            .await?;

        if questions.len() != num_questions as usize {
            warn!(
                "Requested {num_questions} questions, model returned {}",
                questions.len()
            );
        }
        Ok(questions)
    }
}
