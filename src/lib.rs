//! Lectern - a teaching agent team
//!
//! Turns a topic into a set of study documents written by four LLM personas.
//!
//! # Overview
//!
//! For one topic, Lectern runs, in order:
//! - the **Professor**, who writes a knowledge base
//! - the **Academic Advisor**, who designs a learning roadmap
//! - the **Research Librarian**, who curates resources (web and arXiv search)
//! - the **Teaching Assistant**, who writes exercises and projects
//!
//! Each persona writes its result to a Google Doc through Composio and the
//! document links are pulled out of the responses.
//!
//! # Architecture
//!
//! - `config` - Configuration management and prompt templates
//! - `persona` - The four fixed personas
//! - `agent` - Tool-calling agent loop over the OpenAI chat API
//! - `toolkit` - Composio Google Docs, DuckDuckGo and arXiv clients
//! - `team` - Sequential dispatch of a topic to the team
//! - `links` - Google Doc link extraction
//! - `cli` - Terminal and web front-ends
//!
//! # Example
//!
//! ```rust,no_run
//! use lectern::config::{Prompts, Settings};
//! use lectern::team::{OpenAIResponder, SessionConfig, Team};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load_from(None)?;
//!     let prompts = Prompts::default();
//!     let session = SessionConfig::new(Some("sk-..."), Some("composio-key"))?;
//!
//!     let responder = OpenAIResponder::connect(&session, &settings, &prompts).await?;
//!     let report = Team::new(responder, prompts).run("LoRA", |_| {}).await?;
//!
//!     for (persona, link) in report.doc_links() {
//!         println!("{}: {}", persona.document_label(), link.url());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod links;
pub mod openai;
pub mod persona;
pub mod team;
pub mod toolkit;

pub use error::{LecternError, Result};
