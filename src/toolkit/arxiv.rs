//! arXiv paper search through the public Atom API.

use super::text::clean;
use super::PaperSearch;
use crate::config::ArxivSettings;
use crate::error::{LecternError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::{debug, instrument};
use url::Url;

/// A paper entry from the arXiv feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paper {
    /// arXiv identifier including version, e.g. `2106.09685v2`.
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub published: Option<DateTime<Utc>>,
    pub pdf_url: Option<String>,
}

/// arXiv API client.
pub struct ArxivClient {
    http: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

impl ArxivClient {
    pub fn new(settings: &ArxivSettings, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: settings.endpoint.clone(),
            max_results: settings.max_results,
        }
    }
}

#[async_trait]
impl PaperSearch for ArxivClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Paper>> {
        let limit = max_results.clamp(1, self.max_results.max(1));
        let url = Url::parse_with_params(
            &self.endpoint,
            &[
                ("search_query", query.to_string()),
                ("start", "0".to_string()),
                ("max_results", limit.to_string()),
                ("sortBy", "relevance".to_string()),
                ("sortOrder", "descending".to_string()),
            ],
        )
        .map_err(|e| LecternError::Papers(format!("bad endpoint {}: {}", self.endpoint, e)))?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LecternError::Papers(format!("arXiv returned {}", status)));
        }

        let feed = response.text().await?;
        let mut papers = parse_atom_feed(&feed);
        papers.truncate(limit);

        debug!("arXiv returned {} papers", papers.len());
        Ok(papers)
    }
}

struct Patterns {
    entry: Regex,
    id: Regex,
    title: Regex,
    summary: Regex,
    published: Regex,
    author: Regex,
    pdf: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        entry: Regex::new(r"(?s)<entry>(.*?)</entry>").expect("Invalid regex"),
        id: Regex::new(r"(?s)<id>(.*?)</id>").expect("Invalid regex"),
        title: Regex::new(r"(?s)<title[^>]*>(.*?)</title>").expect("Invalid regex"),
        summary: Regex::new(r"(?s)<summary[^>]*>(.*?)</summary>").expect("Invalid regex"),
        published: Regex::new(r"(?s)<published>(.*?)</published>").expect("Invalid regex"),
        author: Regex::new(r"(?s)<author>\s*<name>(.*?)</name>").expect("Invalid regex"),
        pdf: Regex::new(r#"<link[^>]*title="pdf"[^>]*href="([^"]*)""#).expect("Invalid regex"),
    })
}

/// Parse the entries of an arXiv Atom feed. Entries without an id are skipped.
pub fn parse_atom_feed(feed: &str) -> Vec<Paper> {
    let p = patterns();

    p.entry
        .captures_iter(feed)
        .filter_map(|entry| {
            let body = &entry[1];
            let capture = |re: &Regex| re.captures(body).map(|c| clean(&c[1]));

            let id_url = capture(&p.id)?;
            let id = id_url
                .rsplit("/abs/")
                .next()
                .unwrap_or(id_url.as_str())
                .to_string();

            let published = capture(&p.published)
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|d| d.with_timezone(&Utc));

            Some(Paper {
                id,
                title: capture(&p.title).unwrap_or_default(),
                authors: p.author.captures_iter(body).map(|c| clean(&c[1])).collect(),
                summary: capture(&p.summary).unwrap_or_default(),
                published,
                pdf_url: p.pdf.captures(body).map(|c| c[1].to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: search_query=LoRA</title>
  <id>http://arxiv.org/api/abc</id>
  <entry>
    <id>http://arxiv.org/abs/2106.09685v2</id>
    <published>2021-06-17T17:37:18Z</published>
    <title>LoRA: Low-Rank Adaptation of
  Large Language Models</title>
    <summary>  An important paradigm of natural language processing consists of
large-scale pre-training &amp; adaptation.
</summary>
    <author>
      <name>Edward J. Hu</name>
    </author>
    <author>
      <name>Yelong Shen</name>
    </author>
    <link href="http://arxiv.org/abs/2106.09685v2" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2106.09685v2" rel="related" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2305.14314v1</id>
    <title>QLoRA</title>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_atom_feed() {
        let papers = parse_atom_feed(FEED);
        assert_eq!(papers.len(), 2);

        let lora = &papers[0];
        assert_eq!(lora.id, "2106.09685v2");
        assert_eq!(lora.title, "LoRA: Low-Rank Adaptation of Large Language Models");
        assert_eq!(lora.authors, vec!["Edward J. Hu", "Yelong Shen"]);
        assert!(lora.summary.starts_with("An important paradigm"));
        assert!(lora.summary.contains("pre-training & adaptation"));
        assert_eq!(lora.published.unwrap().year(), 2021);
        assert_eq!(lora.pdf_url.as_deref(), Some("http://arxiv.org/pdf/2106.09685v2"));

        let qlora = &papers[1];
        assert!(qlora.authors.is_empty());
        assert!(qlora.published.is_none());
        assert!(qlora.pdf_url.is_none());
    }

    #[test]
    fn test_feed_without_entries() {
        assert!(parse_atom_feed("<feed></feed>").is_empty());
    }
}
