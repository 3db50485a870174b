use std::sync::Arc;

use tracing::info;

use crate::agent::tools::ResearchTopicTool;
use crate::agent::{Agent, AgentError};
use crate::llm_client::prompts::fill;
use crate::llm_client::ChatModel;
use crate::research::WebResearch;
use crate::summaries::prompts::{SUMMARY_INPUT_PREFIX, SUMMARY_SYSTEM_TEMPLATE};
use crate::summaries::DetailLevel;

pub struct Summarizer {
    model: Arc<dyn ChatModel>,
    research: Option<WebResearch>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            research: None,
        }
    }

    pub fn with_research(mut self, research: WebResearch) -> Self {
        self.research = Some(research);
        self
    }

    pub fn build_agent(&self, word_length: u32, detail_level: DetailLevel) -> Agent {
        let word_length_text = word_length.to_string();
        let system = fill(
            SUMMARY_SYSTEM_TEMPLATE,
            &[
                ("word_length", word_length_text.as_str()),
                ("detail_level", detail_level.as_str()),
                ("detail_guidance", detail_level.guidance()),
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

    /// Returns the markdown summary. Length and detail are requests to the
    /// model; the output is not measured.
    pub async fn summarize(
        &self,
        text: &str,
        word_length: u32,
        detail_level: DetailLevel,
    ) -> Result<String, AgentError> {
        info!("Summarizing {} chars at {detail_level} detail", text.len());
        let agent = self.build_agent(word_length, detail_level);
        let summary = agent.run(&format!("{SUMMARY_INPUT_PREFIX}{text}")).await?;
        Ok(summary.trim().to_string())
    }
}
