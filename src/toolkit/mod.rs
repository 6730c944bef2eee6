//! External tools the personas can call: Google Docs through Composio,
//! DuckDuckGo web search and arXiv paper search.

mod arxiv;
mod composio;
mod duckduckgo;
mod text;

pub use arxiv::{parse_atom_feed, ArxivClient, Paper};
pub use composio::{ActionSchema, ComposioToolset, DocumentAction};
pub use duckduckgo::{parse_results_page, DuckDuckGo, SearchHit};

use crate::error::Result;
use async_trait::async_trait;

/// A document store reachable through a tool-integration service.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Execute a document action with model-provided JSON input.
    ///
    /// Returns the raw response body to hand back to the model.
    async fn execute(&self, action: DocumentAction, input: serde_json::Value) -> Result<String>;

    /// The schema the integration service published for an action.
    fn schema(&self, action: DocumentAction) -> Option<&ActionSchema>;
}

/// General web search.
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// Academic paper search.
#[async_trait]
pub trait PaperSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Paper>>;
}
