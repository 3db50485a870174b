//! Agent runtime: a system prompt, optional tools and an expected output
//! shape wrapped around a single model conversation.
//!
//! An `Agent` is stateless between calls. `run` sends one request and keeps
//! answering tool calls until the model produces a final answer or the tool
//! round limit is hit.

pub mod tools;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, TOOL_USE_INSTRUCTION};
use crate::llm_client::{strip_json_fences, ChatModel, ContentBlock, LlmError, Message, Role};

pub use tools::Tool;

/// Max model turns that may be spent on tool calls before giving up.
pub const MAX_TOOL_ROUNDS: usize = 4;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("model returned no usable output")]
    EmptyOutput,

    #[error("model output did not match the expected schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("model kept calling tools after {0} rounds")]
    ToolRoundsExceeded(usize),
}

pub struct Agent {
    model: Arc<dyn ChatModel>,
    system_prompt: String,
    tools: Vec<Arc<dyn Tool>>,
    max_tool_rounds: usize,
}

impl Agent {
    pub fn new(model: Arc<dyn ChatModel>, system_prompt: impl Into<String>) -> Self {
        Self {
            model,
            system_prompt: system_prompt.into(),
            tools: Vec::new(),
            max_tool_rounds: MAX_TOOL_ROUNDS,
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    #[cfg(test)]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.spec().name).collect()
    }

    /// Runs the conversation and returns the model's final text.
    pub async fn run(&self, user_input: &str) -> Result<String, AgentError> {
        let system = self.effective_system_prompt(false);
        self.converse(&system, user_input).await
    }

    /// Runs the conversation and parses the final text as JSON into `T`.
    pub async fn run_structured<T: DeserializeOwned>(
        &self,
        user_input: &str,
    ) -> Result<T, AgentError> {
        let system = self.effective_system_prompt(true);
        let text = self.converse(&system, user_input).await?;
        Ok(serde_json::from_str(strip_json_fences(&text))?)
    }

    fn effective_system_prompt(&self, structured: bool) -> String {
        let mut system = self.system_prompt.clone();
        if !self.tools.is_empty() {
            system.push_str("\n\n");
            system.push_str(TOOL_USE_INSTRUCTION);
        }
        if structured {
            system.push_str("\n\n");
            system.push_str(JSON_ONLY_INSTRUCTION);
        }
        system
    }

    async fn converse(&self, system: &str, user_input: &str) -> Result<String, AgentError> {
        let specs: Vec<_> = self.tools.iter().map(|t| t.spec()).collect();
        if !specs.is_empty() {
            debug!("Agent tools: {}", self.tool_names().join(", "));
        }
        let mut messages = vec![Message::user_text(user_input)];

        for round in 0..=self.max_tool_rounds {
            let response = self.model.complete(system, &messages, &specs).await?;
            let tool_uses = response.tool_uses();

            if tool_uses.is_empty() {
                return response
                    .text()
                    .filter(|t| !t.trim().is_empty())
                    .ok_or(AgentError::EmptyOutput);
            }

            if round == self.max_tool_rounds {
                break;
            }

            let mut results = Vec::with_capacity(tool_uses.len());
            for (id, name, input) in tool_uses {
                info!("Agent tool call {name} (round {})", round + 1);
                let block = match self.tools.iter().find(|t| t.spec().name == name) {
                    Some(tool) => ContentBlock::ToolResult {
                        tool_use_id: id.to_string(),
                        content: tool.call(input.clone()).await,
                        is_error: false,
                    },
                    None => {
                        warn!("Model requested unknown tool {name}");
                        ContentBlock::ToolResult {
                            tool_use_id: id.to_string(),
                            content: format!("Unknown tool: {name}"),
                            is_error: true,
                        }
                    }
                };
                results.push(block);
            }

            let assistant_content: Vec<ContentBlock> = response
                .content
                .into_iter()
                .filter(|b| !matches!(b, ContentBlock::Unsupported))
                .collect();
            messages.push(Message {
                role: Role::Assistant,
                content: assistant_content,
            });
            messages.push(Message {
                role: Role::User,
                content: results,
            });
            debug!("Agent conversation now has {} messages", messages.len());
        }

        Err(AgentError::ToolRoundsExceeded(self.max_tool_rounds))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Reply, ScriptedModel};
    use super::*;
    use crate::llm_client::ToolSpec;
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::{json, Value};

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "echo".to_string(),
                description: "Echoes the input text".to_string(),
                input_schema: json!({"type": "object", "properties": {"text": {"type": "string"}}}),
            }
        }

        async fn call(&self, input: Value) -> String {
            format!("echo: {}", input["text"].as_str().unwrap_or_default())
        }
    }

    #[derive(Debug, Deserialize)]
    struct Verdict {
        ok: bool,
    }

    #[tokio::test]
    async fn test_run_returns_final_text() {
        let model = Arc::new(ScriptedModel::text("# Summary"));
        let agent = Agent::new(model.clone(), "Summarize.");

        assert_eq!(agent.run("some text").await.unwrap(), "# Summary");

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, "Summarize.");
        assert!(calls[0].tools.is_empty());
    }

    #[tokio::test]
    async fn test_structured_run_strips_fences_and_parses() {
        let model = Arc::new(ScriptedModel::text("```json\n{\"ok\": true}\n```"));
        let agent = Agent::new(model.clone(), "Judge.");

        let verdict: Verdict = agent.run_structured("input").await.unwrap();
        assert!(verdict.ok);
        assert!(model.calls()[0].system.contains("valid JSON only"));
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_reported() {
        let model = Arc::new(ScriptedModel::text("{\"verdict\": \"yes\"}"));
        let agent = Agent::new(model, "Judge.");

        let err = agent.run_structured::<Verdict>("input").await.unwrap_err();
        assert!(matches!(err, AgentError::Schema(_)));
    }

    #[tokio::test]
    async fn test_tool_result_is_fed_back_to_model() {
        let model = Arc::new(ScriptedModel::new(vec![
            Reply::ToolUse(vec![(
                "toolu_1".to_string(),
                "echo".to_string(),
                json!({"text": "hello"}),
            )]),
            Reply::Text("done".to_string()),
        ]));
        let agent = Agent::new(model.clone(), "Use tools.").with_tool(Arc::new(EchoTool));

        assert_eq!(agent.run("go").await.unwrap(), "done");

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].tools, vec!["echo".to_string()]);
        assert!(calls[0].system.contains("web research tools"));

        let second = &calls[1].messages;
        assert_eq!(second.len(), 3);
        assert_eq!(second[1].role, Role::Assistant);
        assert_eq!(
            second[2].content,
            vec![ContentBlock::ToolResult {
                tool_use_id: "toolu_1".to_string(),
                content: "echo: hello".to_string(),
                is_error: false,
            }]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported_to_model_not_raised() {
        let model = Arc::new(ScriptedModel::new(vec![
            Reply::ToolUse(vec![(
                "toolu_9".to_string(),
                "delete_everything".to_string(),
                json!({}),
            )]),
            Reply::Text("ok".to_string()),
        ]));
        let agent = Agent::new(model.clone(), "sys").with_tool(Arc::new(EchoTool));

        assert_eq!(agent.run("go").await.unwrap(), "ok");
        match &model.calls()[1].messages[2].content[0] {
            ContentBlock::ToolResult {
                content, is_error, ..
            } => {
                assert!(*is_error);
                assert!(content.contains("delete_everything"));
            }
            other => panic!("expected tool result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_endless_tool_calls_hit_round_limit() {
        let replies = (0..=MAX_TOOL_ROUNDS)
            .map(|i| {
                Reply::ToolUse(vec![(
                    format!("toolu_{i}"),
                    "echo".to_string(),
                    json!({"text": "again"}),
                )])
            })
            .collect();
        let model = Arc::new(ScriptedModel::new(replies));
        let agent = Agent::new(model.clone(), "sys").with_tool(Arc::new(EchoTool));

        let err = agent.run("go").await.unwrap_err();
        assert!(matches!(err, AgentError::ToolRoundsExceeded(MAX_TOOL_ROUNDS)));
        assert_eq!(model.calls().len(), MAX_TOOL_ROUNDS + 1);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let agent = Agent::new(Arc::new(ScriptedModel::failing()), "sys");
        assert!(matches!(
            agent.run("go").await.unwrap_err(),
            AgentError::Model(_)
        ));
    }

    #[tokio::test]
    async fn test_blank_answer_is_empty_output() {
        let agent = Agent::new(Arc::new(ScriptedModel::text("   ")), "sys");
        assert!(matches!(
            agent.run("go").await.unwrap_err(),
            AgentError::EmptyOutput
        ));
    }
}
