//! Web research used to enrich generation prompts.
//!
//! search → fetch pages → enrich. Every step degrades to empty output on
//! failure; callers never see a scraping error.

pub mod enrich;
pub mod fetcher;
pub mod search;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

pub use enrich::Enricher;
pub use fetcher::PageFetcher;
pub use search::WebSearchClient;

/// Timeout applied to every search and page request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-like User-Agent; the HTML search endpoint blocks obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A single organic result scraped from the search engine page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Builds the HTTP client shared by the search client and the page fetcher.
pub fn build_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(BROWSER_USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
}

/// Everything the agents need for web research, cloned into each request.
#[derive(Clone)]
pub struct WebResearch {
    pub search: WebSearchClient,
    pub fetcher: PageFetcher,
    pub enricher: Enricher,
    pub max_sources: usize,
}

impl WebResearch {
    pub fn new(
        client: Client,
        search_engine_url: String,
        page_max_chars: usize,
        max_sources: usize,
    ) -> Self {
        let search = WebSearchClient::new(client.clone(), search_engine_url);
        let fetcher = PageFetcher::new(client, page_max_chars);
        let enricher = Enricher::new(search.clone(), fetcher.clone());
        Self {
            search,
            fetcher,
            enricher,
            max_sources,
        }
    }
}
