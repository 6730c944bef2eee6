//! Agent system for persona runs with tool calling.
//!
//! Provides an LLM agent that plays one persona and can call the persona's
//! bound tools (Google Docs, web search, arXiv) while answering.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, ToolCall, ToolContext, ToolKind, ARXIV_SEARCH_FN, WEB_SEARCH_FN};
