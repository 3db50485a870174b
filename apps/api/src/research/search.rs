//! HTML search-engine client.
//!
//! Scrapes the DuckDuckGo HTML endpoint. The selectors are tied to that
//! page's current markup; a markup change shows up as empty results, not
//! as an error.

use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::SearchResult;

/// Keywords appended to every query to bias results toward learning material.
pub const QUERY_QUALIFIERS: &str = "tutorial guide";

const RESULT_SELECTOR: &str = ".result";
const TITLE_SELECTOR: &str = "a.result__a";
const SNIPPET_SELECTOR: &str = ".result__snippet";

#[derive(Clone)]
pub struct WebSearchClient {
    client: Client,
    base_url: String,
}

impl WebSearchClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Full request URL for a query, qualifiers included.
    pub fn search_url(&self, query: &str) -> String {
        let qualified = format!("{} {}", query.trim(), QUERY_QUALIFIERS);
        format!("{}?q={}", self.base_url, urlencoding::encode(&qualified))
    }

    /// Returns up to `num_results` results. Any failure yields an empty list.
    pub async fn search(&self, query: &str, num_results: usize) -> Vec<SearchResult> {
        let url = self.search_url(query);
        debug!("Searching: {url}");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Search request failed for {query:?}: {e}");
                return Vec::new();
            }
        };

        if response.status() != StatusCode::OK {
            warn!("Search engine returned {} for {query:?}", response.status());
            return Vec::new();
        }

        let html = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read search response for {query:?}: {e}");
                return Vec::new();
            }
        };

        let results = parse_results(&html, num_results);
        debug!("Search for {query:?} returned {} results", results.len());
        results
    }
}

/// Parses result blocks out of a search results page.
pub fn parse_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    let (Ok(result_sel), Ok(title_sel), Ok(snippet_sel)) = (
        Selector::parse(RESULT_SELECTOR),
        Selector::parse(TITLE_SELECTOR),
        Selector::parse(SNIPPET_SELECTOR),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);

    document
        .select(&result_sel)
        .filter_map(|block| {
            let link = block.select(&title_sel).next()?;
            let url = resolve_result_url(link.value().attr("href")?)?;
            let title = element_text(&link);
            if title.is_empty() {
                return None;
            }
            let snippet = block
                .select(&snippet_sel)
                .next()
                .map(|s| element_text(&s))
                .unwrap_or_default();

            Some(SearchResult {
                title,
                url,
                snippet,
            })
        })
        .take(max_results)
        .collect()
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unwraps `//duckduckgo.com/l/?uddg=<encoded>` redirect links.
fn resolve_result_url(href: &str) -> Option<String> {
    if let Some((_, rest)) = href.split_once("uddg=") {
        let encoded = rest.split('&').next().unwrap_or(rest);
        return urlencoding::decode(encoded).ok().map(|u| u.into_owned());
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    None
}
