//! Tool definitions and dispatch for the persona agents.

use crate::error::{LecternError, Result};
use crate::toolkit::{DocumentAction, DocumentStore, PaperSearch, WebSearch};
use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};
use serde::Serialize;
use std::sync::Arc;

/// Function name of the web search tool.
pub const WEB_SEARCH_FN: &str = "duckduckgo_search";

/// Function name of the arXiv search tool.
pub const ARXIV_SEARCH_FN: &str = "search_arxiv";

/// Kinds of tool a persona can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    CreateDocument,
    UpdateDocument,
    WebSearch,
    ArxivSearch,
}

impl ToolKind {
    /// Function name the model calls this tool by.
    pub fn function_name(self) -> &'static str {
        match self {
            ToolKind::CreateDocument => DocumentAction::Create.action_id(),
            ToolKind::UpdateDocument => DocumentAction::Update.action_id(),
            ToolKind::WebSearch => WEB_SEARCH_FN,
            ToolKind::ArxivSearch => ARXIV_SEARCH_FN,
        }
    }

    /// Short label for listings.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::CreateDocument => "Google Docs (create)",
            ToolKind::UpdateDocument => "Google Docs (update)",
            ToolKind::WebSearch => "DuckDuckGo",
            ToolKind::ArxivSearch => "arXiv",
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A parsed tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// Run a Google Docs action with the model's JSON input as-is.
    Document {
        action: DocumentAction,
        input: serde_json::Value,
    },

    /// Search the web.
    WebSearch { query: String },

    /// Search arXiv for papers.
    ArxivSearch { query: String, max_results: usize },
}

fn default_max_results() -> usize {
    10
}

impl ToolCall {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCall::Document {
                action: DocumentAction::Create,
                ..
            } => ToolKind::CreateDocument,
            ToolCall::Document {
                action: DocumentAction::Update,
                ..
            } => ToolKind::UpdateDocument,
            ToolCall::WebSearch { .. } => ToolKind::WebSearch,
            ToolCall::ArxivSearch { .. } => ToolKind::ArxivSearch,
        }
    }
}

/// Tool execution context with access to the external services.
pub struct ToolContext {
    pub documents: Arc<dyn DocumentStore>,
    pub web: Arc<dyn WebSearch>,
    pub papers: Arc<dyn PaperSearch>,
    bind_update: bool,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        web: Arc<dyn WebSearch>,
        papers: Arc<dyn PaperSearch>,
    ) -> Self {
        Self {
            documents,
            web,
            papers,
            bind_update: false,
        }
    }

    /// Also offer the update-document action wherever create-document is bound.
    pub fn with_update_binding(mut self, bind_update: bool) -> Self {
        self.bind_update = bind_update;
        self
    }

    /// The tools actually offered to a persona with the given bindings.
    pub fn bound_tools(&self, persona_tools: &[ToolKind]) -> Vec<ToolKind> {
        let mut tools = persona_tools.to_vec();
        if self.bind_update
            && tools.contains(&ToolKind::CreateDocument)
            && !tools.contains(&ToolKind::UpdateDocument)
        {
            tools.push(ToolKind::UpdateDocument);
        }
        tools
    }

    /// OpenAI function definitions for the given tools.
    pub fn definitions(&self, tools: &[ToolKind]) -> Vec<ChatCompletionTool> {
        tools.iter().map(|kind| self.definition(*kind)).collect()
    }

    fn definition(&self, kind: ToolKind) -> ChatCompletionTool {
        let (description, parameters) = match kind {
            ToolKind::CreateDocument => self.document_definition(
                DocumentAction::Create,
                "Create a new Google Docs document with a title and text content.",
            ),
            ToolKind::UpdateDocument => self.document_definition(
                DocumentAction::Update,
                "Replace the content of an existing Google Docs document.",
            ),
            ToolKind::WebSearch => (
                "Search DuckDuckGo for a query and return the top results \
                with title, url and snippet."
                    .to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The query to search for"
                        }
                    },
                    "required": ["query"]
                }),
            ),
            ToolKind::ArxivSearch => (
                "Search arXiv for a query and return the matching papers \
                with title, authors, summary and pdf url."
                    .to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The query to search arXiv for"
                        },
                        "max_results": {
                            "type": "integer",
                            "description": "Maximum number of papers (default: 10)",
                            "default": 10
                        }
                    },
                    "required": ["query"]
                }),
            ),
        };

        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: kind.function_name().to_string(),
                description: Some(description),
                parameters: Some(parameters),
                strict: None,
            },
        }
    }

    fn document_definition(
        &self,
        action: DocumentAction,
        fallback: &str,
    ) -> (String, serde_json::Value) {
        match self.documents.schema(action) {
            Some(schema) => (
                schema
                    .description
                    .clone()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
                schema.parameters.clone(),
            ),
            None => (
                fallback.to_string(),
                serde_json::json!({ "type": "object", "properties": {} }),
            ),
        }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::Document { action, input } => {
                self.documents.execute(*action, input.clone()).await
            }
            ToolCall::WebSearch { query } => {
                let hits = self.web.search(query).await?;
                if hits.is_empty() {
                    return Ok("No results found.".to_string());
                }
                Ok(serde_json::to_string_pretty(&hits)?)
            }
            ToolCall::ArxivSearch { query, max_results } => {
                let papers = self.papers.search(query, *max_results).await?;
                if papers.is_empty() {
                    return Ok("No papers found.".to_string());
                }
                Ok(serde_json::to_string_pretty(&papers)?)
            }
        }
    }
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = if arguments.trim().is_empty() {
        serde_json::json!({})
    } else {
        serde_json::from_str(arguments)
            .map_err(|e| LecternError::Agent(format!("Invalid tool arguments: {}", e)))?
    };

    if let Some(action) = DocumentAction::from_action_id(name) {
        return Ok(ToolCall::Document {
            action,
            input: args,
        });
    }

    match name {
        WEB_SEARCH_FN => {
            let query = required_str(&args, "query")?;
            Ok(ToolCall::WebSearch { query })
        }
        ARXIV_SEARCH_FN => {
            let query = required_str(&args, "query")?;
            let max_results = args["max_results"]
                .as_u64()
                .map(|n| n as usize)
                .unwrap_or_else(default_max_results);
            Ok(ToolCall::ArxivSearch { query, max_results })
        }
        _ => Err(LecternError::Agent(format!("Unknown tool: {}", name))),
    }
}

fn required_str(args: &serde_json::Value, key: &str) -> Result<String> {
    args[key]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LecternError::Agent(format!("Missing '{}' argument", key)))
}
