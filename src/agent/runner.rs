//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, ToolContext, ToolKind};
use crate::error::{LecternError, Result};
use crate::persona::Persona;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Agent acting as one persona, with the persona's tools bound.
pub struct Agent {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
    persona: &'static Persona,
    tools: Arc<ToolContext>,
    bound: Vec<ToolKind>,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent for a persona.
    pub fn new(
        client: async_openai::Client<OpenAIConfig>,
        persona: &'static Persona,
        tools: Arc<ToolContext>,
        model: &str,
    ) -> Self {
        let bound = tools.bound_tools(persona.tools);
        Self {
            client,
            model: model.to_string(),
            persona,
            tools,
            bound,
            max_iterations: 15,
            system_prompt: persona.system_prompt(None),
        }
    }

    /// Add the Markdown formatting instruction to the system prompt.
    pub fn with_markdown(mut self, instruction: &str) -> Self {
        self.system_prompt = self.persona.system_prompt(Some(instruction));
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent on a task until the model answers without tool calls.
    ///
    /// Reaching the iteration limit is not an error: the last non-empty
    /// assistant text is returned with the tool calls made so far.
    #[instrument(skip(self, task), fields(persona = self.persona.name))]
    pub async fn run(&self, task: &str) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| LecternError::Agent(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(task.to_string())
                .build()
                .map_err(|e| LecternError::Agent(e.to_string()))?
                .into(),
        ];

        let definitions = self.tools.definitions(&self.bound);
        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();
        let mut last_content = String::new();

        loop {
            if iterations >= self.max_iterations {
                warn!(
                    "{} reached the iteration limit ({}), keeping its last answer",
                    self.persona.name, self.max_iterations
                );
                return Ok(AgentResponse {
                    content: last_content,
                    tool_calls: tool_calls_made,
                    iterations,
                });
            }

            iterations += 1;
            debug!("Agent iteration {}", iterations);

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(messages.clone())
                .tools(definitions.clone())
                .build()
                .map_err(|e| LecternError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| LecternError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| LecternError::Agent("No response from model".to_string()))?;

            if let Some(content) = choice.message.content.as_deref() {
                if !content.trim().is_empty() {
                    last_content = content.to_string();
                }
            }

            let tool_calls = match &choice.message.tool_calls {
                Some(calls) if !calls.is_empty() => calls,
                _ => {
                    return Ok(AgentResponse {
                        content: last_content,
                        tool_calls: tool_calls_made,
                        iterations,
                    })
                }
            };

            let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                .tool_calls(tool_calls.clone())
                .build()
                .map_err(|e| LecternError::Agent(e.to_string()))?;
            messages.push(assistant_msg.into());

            for tool_call in tool_calls {
                let record = self.execute_tool_call(tool_call).await;

                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(&tool_call.id)
                    .content(record.result.clone())
                    .build()
                    .map_err(|e| LecternError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());

                tool_calls_made.push(record);
            }
        }
    }

    /// Execute a single tool call and return a record of it.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("{} calling tool: {} with args: {}", self.persona.name, name, arguments);

        let result = match parse_tool_call(name, arguments) {
            Ok(tool) if !self.bound.contains(&tool.kind()) => {
                warn!("{} is not bound to {}", self.persona.name, name);
                format!("Tool not available to {}: {}", self.persona.name, name)
            }
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        };

        ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        }
    }
}

/// Response from an agent run.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    #[serde(skip)]
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::tools::tests::{fake_context, FakeDocs};
    use crate::config::ModelSettings;
    use crate::openai::create_client;
    use crate::persona::{PROFESSOR, RESEARCH_LIBRARIAN};
    use async_openai::types::{ChatCompletionToolType, FunctionCall};
    use axum::{extract::State, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn agent_with(persona: &'static Persona, settings: &ModelSettings) -> (Arc<FakeDocs>, Agent) {
        let (docs, context) = fake_context();
        let client = create_client("sk-test", settings).unwrap();
        (docs, Agent::new(client, persona, Arc::new(context), "gpt-4o"))
    }

    fn agent(persona: &'static Persona) -> (Arc<FakeDocs>, Agent) {
        agent_with(persona, &ModelSettings::default())
    }

    /// Chat-completions endpoint that replays canned replies in order and
    /// repeats the last one once the script runs out.
    struct ScriptedModel {
        replies: Mutex<VecDeque<Value>>,
        requests: Mutex<Vec<Value>>,
    }

    async fn completions(
        State(model): State<Arc<ScriptedModel>>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        model.requests.lock().unwrap().push(body);
        let mut replies = model.replies.lock().unwrap();
        let reply = if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().unwrap()
        };
        Json(reply)
    }

    async fn spawn_model(replies: Vec<Value>) -> (ModelSettings, Arc<ScriptedModel>) {
        let model = Arc::new(ScriptedModel {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(model.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let settings = ModelSettings {
            api_base: Some(format!("http://{}/v1", addr)),
            ..Default::default()
        };
        (settings, model)
    }

    fn completion(content: Option<&str>, tool_calls: Option<Value>) -> Value {
        let finish_reason = if tool_calls.is_some() { "tool_calls" } else { "stop" };
        let mut message = json!({"role": "assistant", "content": content});
        if let Some(calls) = tool_calls {
            message["tool_calls"] = calls;
        }
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_700_000_000u32,
            "model": "gpt-4o",
            "choices": [{"index": 0, "message": message, "finish_reason": finish_reason}]
        })
    }

    fn create_doc_call() -> Value {
        json!([{
            "id": "call_1",
            "type": "function",
            "function": {
                "name": "GOOGLEDOCS_CREATE_DOCUMENT",
                "arguments": "{\"title\": \"Knowledge Base\", \"text\": \"Ownership\"}"
            }
        }])
    }

    fn call(name: &str, arguments: &str) -> ChatCompletionMessageToolCall {
        ChatCompletionMessageToolCall {
            id: "call_1".to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "duckduckgo_search".to_string(),
            arguments: r#"{"query": "test"}"#.to_string(),
            result: "Found results".to_string(),
        };
        assert_eq!(format!("{}", record), r#"duckduckgo_search({"query": "test"})"#);
    }

    #[test]
    fn test_markdown_instruction_in_prompt() {
        let (_, agent) = agent(&PROFESSOR);
        assert!(!agent.system_prompt.contains("Use markdown"));
        let agent = agent.with_markdown("Use markdown to format your answers.");
        assert!(agent.system_prompt.contains("Use markdown"));
    }

    #[tokio::test]
    async fn test_unbound_tool_is_refused() {
        let (_, agent) = agent(&PROFESSOR);
        let record = agent
            .execute_tool_call(&call("duckduckgo_search", r#"{"query": "rust"}"#))
            .await;
        assert_eq!(record.result, "Tool not available to Professor: duckduckgo_search");
    }

    #[tokio::test]
    async fn test_bound_tool_executes() {
        let (docs, agent) = agent(&RESEARCH_LIBRARIAN);

        let record = agent
            .execute_tool_call(&call("duckduckgo_search", r#"{"query": "rust"}"#))
            .await;
        assert!(record.result.contains("About rust"));

        let record = agent
            .execute_tool_call(&call(
                "GOOGLEDOCS_CREATE_DOCUMENT",
                r#"{"title": "Resources", "text": "..."}"#,
            ))
            .await;
        assert!(record.result.contains("doc-1"));
        assert_eq!(docs.executed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_arguments_reported_to_model() {
        let (_, agent) = agent(&RESEARCH_LIBRARIAN);
        let record = agent.execute_tool_call(&call("search_arxiv", "{")).await;
        assert!(record.result.starts_with("Failed to parse tool call"));
    }

    #[tokio::test]
    async fn test_tool_loop_feeds_results_back() {
        let (settings, model) = spawn_model(vec![
            completion(None, Some(create_doc_call())),
            completion(
                Some("Knowledge base ready: https://docs.google.com/document/d/doc-1/edit"),
                None,
            ),
        ])
        .await;
        let (docs, agent) = agent_with(&PROFESSOR, &settings);

        let response = agent.run("the topic is: Rust").await.unwrap();

        assert_eq!(
            response.content,
            "Knowledge base ready: https://docs.google.com/document/d/doc-1/edit"
        );
        assert_eq!(response.iterations, 2);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "GOOGLEDOCS_CREATE_DOCUMENT");

        let executed = docs.executed.lock().unwrap();
        assert_eq!(executed.len(), 1);
        assert_eq!(executed[0].1["title"], "Knowledge Base");

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0]["tools"][0]["function"]["name"], "GOOGLEDOCS_CREATE_DOCUMENT");
        assert_eq!(requests[0]["messages"][1]["content"], "the topic is: Rust");

        let tool_msg = requests[1]["messages"].as_array().unwrap().last().unwrap().clone();
        assert_eq!(tool_msg["role"], "tool");
        assert_eq!(tool_msg["tool_call_id"], "call_1");
        assert!(tool_msg["content"].as_str().unwrap().contains("doc-1"));
    }

    #[tokio::test]
    async fn test_iteration_limit_keeps_last_answer() {
        let (settings, model) = spawn_model(vec![completion(
            Some("partial answer https://docs.google.com/d/1 "),
            Some(create_doc_call()),
        )])
        .await;
        let (docs, agent) = agent_with(&PROFESSOR, &settings);
        let agent = agent.with_max_iterations(2);

        let response = agent.run("the topic is: Rust").await.unwrap();

        assert_eq!(response.content, "partial answer https://docs.google.com/d/1 ");
        assert_eq!(response.iterations, 2);
        assert_eq!(response.tool_calls.len(), 2);
        assert_eq!(docs.executed.lock().unwrap().len(), 2);
        assert_eq!(model.requests.lock().unwrap().len(), 2);
    }
}
