//! Study plan agent.
//!
//! The topic is enriched with web sources before the model sees it, and the
//! model can search and fetch pages itself to find real resources. Neither
//! entry point returns an error: a failed plan comes back as a placeholder
//! with `error` set, a failed quick reference as `None`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::agent::tools::{FetchPageTool, SearchWebTool, Tool};
use crate::agent::Agent;
use crate::llm_client::prompts::fill;
use crate::llm_client::ChatModel;
use crate::research::WebResearch;
use crate::study_plans::prompts::{
    QUICK_REFERENCE_SYSTEM_TEMPLATE, STUDY_PLAN_INPUT_TEMPLATE, STUDY_PLAN_SYSTEM_TEMPLATE,
};
use crate::study_plans::StudyPlanData;

pub struct StudyPlanGenerator {
    model: Arc<dyn ChatModel>,
    research: WebResearch,
}

impl StudyPlanGenerator {
    pub fn new(model: Arc<dyn ChatModel>, research: WebResearch) -> Self {
        Self { model, research }
    }

    fn plan_agent(&self, topic: &str) -> Agent {
        let tools: [Arc<dyn Tool>; 2] = [
            Arc::new(SearchWebTool::new(self.research.search.clone())),
            Arc::new(FetchPageTool::new(self.research.fetcher.clone())),
        ];
        Agent::new(
            self.model.clone(),
            fill(STUDY_PLAN_SYSTEM_TEMPLATE, &[("topic", topic)]),
        )
        .with_tools(tools)
    }

    pub async fn generate_study_plan(&self, topic: &str) -> StudyPlanData {
        info!("Generating study plan for {topic:?}");

        let base = fill(STUDY_PLAN_INPUT_TEMPLATE, &[("topic", topic)]);
        let enriched = self
            .research
            .enricher
            .enrich(&base, topic, self.research.max_sources)
            .await;

        match self
            .plan_agent(topic)
            .run_structured::<StudyPlanData>(&enriched)
            .await
        {
            Ok(mut plan) => {
                plan.topic = topic.to_string();
                plan.error = None;
                info!(
                    "Study plan for {topic:?} has {} sections",
                    plan.sections.len()
                );
                plan
            }
            Err(e) => {
                warn!("Study plan generation for {topic:?} failed: {e}");
                StudyPlanData::degraded(topic, e)
            }
        }
    }

    pub async fn generate_quick_reference(&self, topic: &str) -> Option<String> {
        let agent = Agent::new(
            self.model.clone(),
            fill(QUICK_REFERENCE_SYSTEM_TEMPLATE, &[("topic", topic)]),
        );
        match agent.run(topic).await {
            Ok(guide) => Some(guide.trim().to_string()),
            Err(e) => {
                warn!("Quick reference for {topic:?} failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::ScriptedModel;
    use crate::llm_client::ContentBlock;
    use crate::research::build_http_client;

    fn offline_research() -> WebResearch {
        WebResearch::new(
            build_http_client().unwrap(),
            "http://127.0.0.1:9/html/".to_string(),
            200,
            2,
        )
    }

    const PLAN: &str = r#"{
      "topic": "ignored",
      "overview": "Ownership in depth.",
      "learning_objectives": ["Explain moves", "Use borrows"],
      "sections": [{
        "title": "Moves",
        "description": "Value semantics.",
        "topics": ["Copy", "Clone"],
        "resources": [{"title": "The Book", "url": "https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html",
                       "description": "Chapter 4", "type": "book"}],
        "activities": ["Write a linked list"],
        "estimated_time": "1 week",
        "assessment_methods": ["Quiz"]
      }],
      "total_estimated_time": "1 week"
    }"#;

    #[tokio::test]
    async fn test_plan_uses_requested_topic_and_tools() {
        let model = Arc::new(ScriptedModel::text(PLAN));
        let generator = StudyPlanGenerator::new(model.clone(), offline_research());

        let plan = generator.generate_study_plan("Rust ownership").await;

        assert_eq!(plan.topic, "Rust ownership");
        assert_eq!(plan.error, None);
        assert_eq!(plan.sections.len(), 1);
        assert_eq!(plan.sections[0].resources[0].resource_type, "book");

        let calls = model.calls();
        let call = &calls[0];
        assert_eq!(
            call.tools,
            vec!["search_web".to_string(), "fetch_page".to_string()]
        );
        assert!(call.system.contains("master Rust ownership"));
        assert_eq!(
            call.messages[0].content[0],
            ContentBlock::text("Build a study plan for: Rust ownership")
        );
    }

    #[tokio::test]
    async fn test_failure_degrades_instead_of_erroring() {
        let generator =
            StudyPlanGenerator::new(Arc::new(ScriptedModel::failing()), offline_research());

        let plan = generator.generate_study_plan("Quantum computing").await;

        assert_eq!(plan.topic, "Quantum computing");
        assert!(plan.error.is_some());
        assert!(plan.sections.is_empty());
        assert!(plan.learning_objectives.is_empty());
        assert!(serde_json::to_string(&plan).is_ok());
    }

    #[tokio::test]
    async fn test_unparseable_plan_degrades() {
        let generator = StudyPlanGenerator::new(
            Arc::new(ScriptedModel::text("Here is your plan: week one, read.")),
            offline_research(),
        );
        let plan = generator.generate_study_plan("Chemistry").await;
        assert!(plan.error.is_some());
    }

    #[tokio::test]
    async fn test_enriched_context_reaches_the_model() {
        let mut server = mockito::Server::new_async().await;
        let results_page = format!(
            r#"<html><body>
              <div class="result"><a class="result__a" href="{0}/intro">Ownership Intro</a>
                <a class="result__snippet">intro snippet</a></div>
            </body></html>"#,
            server.url()
        );
        let _mock = server
            .mock("GET", "/html/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(results_page)
            .create_async()
            .await;
        let _mock = server
            .mock("GET", "/intro")
            .with_status(200)
            .with_body("<html><body><p>Each value has one owner.</p></body></html>")
            .create_async()
            .await;

        let research = WebResearch::new(
            build_http_client().unwrap(),
            format!("{}/html/", server.url()),
            500,
            2,
        );
        let model = Arc::new(ScriptedModel::text(PLAN));
        let generator = StudyPlanGenerator::new(model.clone(), research);

        generator.generate_study_plan("Rust ownership").await;

        let calls = model.calls();
        let ContentBlock::Text { text } = &calls[0].messages[0].content[0] else {
            panic!("expected a text block");
        };
        assert!(text.starts_with("Build a study plan for: Rust ownership"));
        assert!(text.contains("## Additional context from web sources"));
        assert!(text.contains(&format!("Source: {}/intro", server.url())));
        assert!(text.contains("Each value has one owner."));
    }

    #[tokio::test]
    async fn test_quick_reference_failure_is_none() {
        let generator =
            StudyPlanGenerator::new(Arc::new(ScriptedModel::failing()), offline_research());
        assert_eq!(generator.generate_quick_reference("Rust").await, None);

        let generator = StudyPlanGenerator::new(
            Arc::new(ScriptedModel::text("## Keywords\n- borrow\n")),
            offline_research(),
        );
        assert_eq!(
            generator.generate_quick_reference("Rust").await.as_deref(),
            Some("## Keywords\n- borrow")
        );
    }
}
