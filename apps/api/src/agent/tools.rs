//! Tools exposed to the model. Each wraps one research step and always
//! answers with text; failures surface as "nothing found" messages.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::llm_client::ToolSpec;
use crate::research::{Enricher, PageFetcher, SearchResult, WebSearchClient};

const DEFAULT_NUM_RESULTS: usize = 5;
const MAX_NUM_RESULTS: usize = 10;

#[async_trait]
pub trait Tool: Send + Sync {
    fn spec(&self) -> ToolSpec;
    async fn call(&self, input: Value) -> String;
}

fn string_arg<'a>(input: &'a Value, key: &str) -> Option<&'a str> {
    input
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn count_arg(input: &Value, key: &str, default: usize) -> usize {
    input
        .get(key)
        .and_then(Value::as_u64)
        .map(|n| n as usize)
        .unwrap_or(default)
        .clamp(1, MAX_NUM_RESULTS)
}

/// `search_web`: keyword search returning titles, URLs and snippets.
pub struct SearchWebTool {
    search: WebSearchClient,
}

impl SearchWebTool {
    pub fn new(search: WebSearchClient) -> Self {
        Self { search }
    }
}

pub fn format_search_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}\n   URL: {}\n   {}", i + 1, r.title, r.url, r.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Tool for SearchWebTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "search_web".to_string(),
            description: "Search the web for learning resources. Returns result titles, \
                URLs and snippets."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search keywords"},
                    "num_results": {"type": "integer", "minimum": 1, "maximum": MAX_NUM_RESULTS}
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, input: Value) -> String {
        let Some(query) = string_arg(&input, "query") else {
            return "search_web requires a non-empty 'query'.".to_string();
        };
        let num_results = count_arg(&input, "num_results", DEFAULT_NUM_RESULTS);

        let results = self.search.search(query, num_results).await;
        if results.is_empty() {
            return format!("No results found for \"{query}\".");
        }
        format_search_results(&results)
    }
}

/// `fetch_page`: readable text of a single URL.
pub struct FetchPageTool {
    fetcher: PageFetcher,
}

impl FetchPageTool {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Tool for FetchPageTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "fetch_page".to_string(),
            description: format!(
                "Download a web page and return its readable text (at most {} characters).",
                self.fetcher.max_chars()
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {"type": "string", "description": "Absolute http(s) URL"}
                },
                "required": ["url"]
            }),
        }
    }

    async fn call(&self, input: Value) -> String {
        let Some(url) = string_arg(&input, "url") else {
            return "fetch_page requires a non-empty 'url'.".to_string();
        };

        let text = self.fetcher.fetch(url).await;
        if text.is_empty() {
            return format!("Could not retrieve content from {url}.");
        }
        text
    }
}

/// `research_topic`: search plus page fetches, returned as sourced context.
pub struct ResearchTopicTool {
    enricher: Enricher,
    max_sources: usize,
}

impl ResearchTopicTool {
    pub fn new(enricher: Enricher, max_sources: usize) -> Self {
        Self {
            enricher,
            max_sources,
        }
    }
}

#[async_trait]
impl Tool for ResearchTopicTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "research_topic".to_string(),
            description: "Gather background material on a topic from several web pages, \
                each labelled with its title and source URL."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Topic to research"}
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, input: Value) -> String {
        let Some(query) = string_arg(&input, "query") else {
            return "research_topic requires a non-empty 'query'.".to_string();
        };
        self.enricher.research(query, self.max_sources).await
    }
}
