//! Content enrichment: base text plus web sources, with provenance inline.

use tracing::info;

use super::{PageFetcher, SearchResult, WebSearchClient};

const SOURCES_HEADING: &str = "## Additional context from web sources";

#[derive(Clone)]
pub struct Enricher {
    search: WebSearchClient,
    fetcher: PageFetcher,
}

/// One web source with the text that will be quoted for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedContent {
    pub result: SearchResult,
    pub content: String,
}

impl Enricher {
    pub fn new(search: WebSearchClient, fetcher: PageFetcher) -> Self {
        Self { search, fetcher }
    }

    /// Searches `query`, fetches up to `max_sources` pages in engine order and
    /// appends them to `base_text`. Returns `base_text` unchanged when nothing
    /// could be retrieved.
    pub async fn enrich(&self, base_text: &str, query: &str, max_sources: usize) -> String {
        let sources = self.gather(query, max_sources).await;
        info!(
            "Enriched {query:?} with {} web sources",
            sources.len()
        );
        format_enriched(base_text, &sources)
    }

    /// The web-only half of `enrich`: formatted sources without a base text.
    pub async fn research(&self, query: &str, max_sources: usize) -> String {
        let sources = self.gather(query, max_sources).await;
        if sources.is_empty() {
            return format!("No web sources found for \"{query}\".");
        }
        format_sources(&sources)
    }

    async fn gather(&self, query: &str, max_sources: usize) -> Vec<SourcedContent> {
        let results = self.search.search(query, max_sources).await;

        let mut sources = Vec::with_capacity(results.len());
        for result in results {
            let page = self.fetcher.fetch(&result.url).await;
            let content = if page.is_empty() {
                result.snippet.clone()
            } else {
                page
            };
            if content.is_empty() {
                continue;
            }
            sources.push(SourcedContent { result, content });
        }
        sources
    }
}

pub fn format_enriched(base_text: &str, sources: &[SourcedContent]) -> String {
    if sources.is_empty() {
        return base_text.to_string();
    }
    format!("{base_text}\n\n{SOURCES_HEADING}\n\n{}", format_sources(sources))
}

fn format_sources(sources: &[SourcedContent]) -> String {
    sources
        .iter()
        .map(|s| {
            format!(
                "### {}\nSource: {}\n\n{}",
                s.result.title, s.result.url, s.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
