//! Topic dispatch: run the four personas on one topic, in order.
//!
//! Runs are strictly sequential. A failing persona ends the whole run; there
//! is no retry and no partial report.

mod report;
mod session;

pub use report::{about_markdown, PersonaOutcome, TeamReport};
pub use session::{mask, SessionConfig};

use crate::agent::{Agent, AgentResponse, ToolContext};
use crate::config::{Prompts, Settings};
use crate::error::{LecternError, Result};
use crate::openai::{create_client, http_client};
use crate::persona::{Persona, TEAM};
use crate::toolkit::{ArxivClient, ComposioToolset, DuckDuckGo};
use async_openai::config::OpenAIConfig;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Something that can answer a task as a persona.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, persona: &'static Persona, task: &str) -> Result<AgentResponse>;
}

/// Responder backed by the OpenAI chat API and the real toolkit.
pub struct OpenAIResponder {
    client: async_openai::Client<OpenAIConfig>,
    tools: Arc<ToolContext>,
    model: String,
    max_iterations: usize,
    markdown_instruction: Option<String>,
}

impl OpenAIResponder {
    /// Build the tool clients and the model client for a session.
    ///
    /// Fails with [`LecternError::ToolkitInit`] when the Composio toolset
    /// cannot be constructed; nothing has been sent to the model by then.
    #[instrument(skip_all)]
    pub async fn connect(
        session: &SessionConfig,
        settings: &Settings,
        prompts: &Prompts,
    ) -> Result<Self> {
        let http = http_client(settings.model.timeout())?;

        let documents =
            ComposioToolset::connect(session.composio_api_key(), &settings.composio, http.clone())
                .await?;
        let tools = ToolContext::new(
            Arc::new(documents),
            Arc::new(DuckDuckGo::new(&settings.search, http.clone())),
            Arc::new(ArxivClient::new(&settings.arxiv, http)),
        )
        .with_update_binding(settings.composio.bind_update);

        let client = create_client(session.openai_api_key(), &settings.model)?;

        Ok(Self {
            client,
            tools: Arc::new(tools),
            model: settings.model.id.clone(),
            max_iterations: settings.model.max_iterations,
            markdown_instruction: settings
                .model
                .markdown
                .then(|| prompts.task.markdown_instruction.clone()),
        })
    }

    fn agent(&self, persona: &'static Persona) -> Agent {
        let agent = Agent::new(self.client.clone(), persona, self.tools.clone(), &self.model)
            .with_max_iterations(self.max_iterations);
        match &self.markdown_instruction {
            Some(instruction) => agent.with_markdown(instruction),
            None => agent,
        }
    }
}

#[async_trait]
impl Responder for OpenAIResponder {
    async fn respond(&self, persona: &'static Persona, task: &str) -> Result<AgentResponse> {
        self.agent(persona).run(task).await
    }
}

/// The teaching team: dispatches a topic to every persona.
pub struct Team<R> {
    responder: R,
    prompts: Prompts,
}

impl<R: Responder> Team<R> {
    pub fn new(responder: R, prompts: Prompts) -> Self {
        Self { responder, prompts }
    }

    /// Run every persona once on `topic`, calling `on_start` before each.
    ///
    /// The topic reaches the personas exactly as entered. A blank topic is
    /// rejected before any persona runs.
    #[instrument(skip(self, on_start))]
    pub async fn run<F>(&self, topic: &str, mut on_start: F) -> Result<TeamReport>
    where
        F: FnMut(&'static Persona) + Send,
    {
        if topic.trim().is_empty() {
            return Err(LecternError::EmptyTopic);
        }

        let task = self.prompts.task_for(topic);
        let mut report = TeamReport::new(topic.trim());
        info!("Starting run {} for topic: {}", report.run_id, report.topic);

        for persona in TEAM {
            on_start(persona);
            info!("{}", persona.progress);

            let response = self.responder.respond(persona, &task).await?;
            let outcome = PersonaOutcome::new(persona, response);

            info!(
                "{} finished after {} iteration(s), {} tool call(s), link: {}",
                persona.name,
                outcome.response.iterations,
                outcome.response.tool_calls.len(),
                outcome.doc_link.is_some()
            );
            report.outcomes.push(outcome);
        }

        Ok(report)
    }
}
