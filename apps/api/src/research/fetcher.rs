//! Page content fetcher: download a URL and keep only readable body text.

use reqwest::{Client, StatusCode};
use scraper::{Html, Node, Selector};
use tracing::{debug, warn};

/// Elements whose text never counts as page content.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "header", "footer", "nav"];

const TRUNCATION_MARKER: &str = "...";

#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    max_chars: usize,
}

impl PageFetcher {
    pub fn new(client: Client, max_chars: usize) -> Self {
        Self { client, max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Fetches `url` and returns its cleaned text, or an empty string on any failure.
    pub async fn fetch(&self, url: &str) -> String {
        self.fetch_with_budget(url, self.max_chars).await
    }

    async fn fetch_with_budget(&self, url: &str, max_chars: usize) -> String {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!("Timed out fetching {url}");
                return String::new();
            }
            Err(e) => {
                warn!("Failed to fetch {url}: {e}");
                return String::new();
            }
        };

        if response.status() != StatusCode::OK {
            warn!("Fetching {url} returned {}", response.status());
            return String::new();
        }

        let html = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read body of {url}: {e}");
                return String::new();
            }
        };

        let text = extract_readable_text(&html, max_chars);
        debug!("Fetched {} chars from {url}", text.chars().count());
        text
    }
}

/// Strips markup and boilerplate elements, collapses whitespace and
/// truncates to `max_chars` characters.
pub fn extract_readable_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());

    let mut parts: Vec<&str> = Vec::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(el) => SKIPPED_ELEMENTS.contains(&el.name()),
            _ => false,
        });
        if !skipped {
            parts.push(&**text);
        }
    }

    let collapsed = parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");

    truncate_chars(&collapsed, max_chars)
}

/// Truncates on a char boundary, marking the cut with `...`.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{TRUNCATION_MARKER}", &text[..byte_idx]),
        None => text.to_string(),
    }
}
