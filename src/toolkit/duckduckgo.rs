//! DuckDuckGo web search through the HTML endpoint.

use super::text::clean;
use super::WebSearch;
use crate::config::SearchSettings;
use crate::error::{LecternError, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::{debug, instrument};
use url::Url;

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// DuckDuckGo client returning a fixed number of results per query.
pub struct DuckDuckGo {
    http: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

impl DuckDuckGo {
    pub fn new(settings: &SearchSettings, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: settings.endpoint.clone(),
            max_results: settings.max_results,
        }
    }
}

#[async_trait]
impl WebSearch for DuckDuckGo {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = Url::parse_with_params(&self.endpoint, &[("q", query)])
            .map_err(|e| LecternError::Search(format!("bad endpoint {}: {}", self.endpoint, e)))?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LecternError::Search(format!("DuckDuckGo returned {}", status)));
        }

        let html = response.text().await?;
        let mut hits = parse_results_page(&html);
        hits.truncate(self.max_results);

        debug!("DuckDuckGo returned {} results", hits.len());
        Ok(hits)
    }
}

struct Patterns {
    link: Regex,
    snippet: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        link: Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#)
            .expect("Invalid regex"),
        snippet: Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</(?:a|td|div)>"#)
            .expect("Invalid regex"),
    })
}

/// Parse organic results out of a DuckDuckGo HTML results page.
///
/// Titles and snippets are paired by position; results whose link cannot be
/// resolved are skipped.
pub fn parse_results_page(html: &str) -> Vec<SearchHit> {
    let patterns = patterns();

    let snippets: Vec<String> = patterns
        .snippet
        .captures_iter(html)
        .map(|c| clean(&c[1]))
        .collect();

    patterns
        .link
        .captures_iter(html)
        .enumerate()
        .filter_map(|(i, c)| {
            let url = resolve_link(&c[1])?;
            Some(SearchHit {
                title: clean(&c[2]),
                url,
                snippet: snippets.get(i).cloned().unwrap_or_default(),
            })
        })
        .collect()
}

/// Unwrap DuckDuckGo's `/l/?uddg=` redirect links.
fn resolve_link(href: &str) -> Option<String> {
    let href = super::text::decode_entities(href);
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href
    };

    let parsed = Url::parse(&absolute).ok()?;
    let is_redirect = parsed
        .host_str()
        .is_some_and(|h| h.ends_with("duckduckgo.com"))
        && parsed.path().starts_with("/l/");

    if is_redirect {
        parsed
            .query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| v.into_owned())
    } else {
        Some(absolute)
    }
}
