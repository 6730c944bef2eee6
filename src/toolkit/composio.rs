//! Google Docs actions through the Composio backend API.

use super::DocumentStore;
use crate::config::ComposioSettings;
use crate::error::{LecternError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// App slug Composio files the Google Docs actions under.
const GOOGLEDOCS_APP: &str = "googledocs";

/// Google Docs actions a persona can be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentAction {
    Create,
    Update,
}

impl DocumentAction {
    pub const ALL: [DocumentAction; 2] = [DocumentAction::Create, DocumentAction::Update];

    /// Composio action identifier, also used as the function name shown to the model.
    pub fn action_id(self) -> &'static str {
        match self {
            DocumentAction::Create => "GOOGLEDOCS_CREATE_DOCUMENT",
            DocumentAction::Update => "GOOGLEDOCS_UPDATE_EXISTING_DOCUMENT",
        }
    }

    pub fn from_action_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.action_id() == id)
    }
}

/// Action metadata published by Composio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSchema {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// JSON schema of the action input.
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default, rename = "appName")]
    pub app_name: Option<String>,
}

impl ActionSchema {
    /// Parse an action lookup response. Older API versions wrap the action in
    /// a one-element array.
    pub fn from_response(value: serde_json::Value) -> Result<Self> {
        let value = match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| LecternError::ToolkitInit("empty action list".to_string()))?,
            other => other,
        };

        let mut schema: ActionSchema = serde_json::from_value(value)
            .map_err(|e| LecternError::ToolkitInit(format!("unexpected action schema: {}", e)))?;

        if !schema.parameters.is_object() {
            schema.parameters = serde_json::json!({ "type": "object", "properties": {} });
        }

        Ok(schema)
    }
}

/// Composio client holding the schemas of both Google Docs actions.
pub struct ComposioToolset {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    entity_id: String,
    create: ActionSchema,
    update: ActionSchema,
}

impl ComposioToolset {
    /// Connect to Composio and fetch the Google Docs action schemas.
    ///
    /// Any failure here means the toolset is unusable and is reported as
    /// [`LecternError::ToolkitInit`].
    #[instrument(skip_all)]
    pub async fn connect(
        api_key: &str,
        settings: &ComposioSettings,
        http: reqwest::Client,
    ) -> Result<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();

        let create = fetch_schema(&http, &base_url, api_key, DocumentAction::Create).await?;
        let update = fetch_schema(&http, &base_url, api_key, DocumentAction::Update).await?;

        info!("Composio toolset ready ({}, {})", create.name, update.name);

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
            entity_id: settings.entity_id.clone(),
            create,
            update,
        })
    }

    fn execute_body(&self, action: DocumentAction, input: serde_json::Value) -> serde_json::Value {
        let app_name = self
            .schema(action)
            .and_then(|s| s.app_name.clone())
            .unwrap_or_else(|| GOOGLEDOCS_APP.to_string());

        serde_json::json!({
            "entityId": self.entity_id,
            "appName": app_name.to_lowercase(),
            "input": input,
        })
    }
}

async fn fetch_schema(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    action: DocumentAction,
) -> Result<ActionSchema> {
    let url = format!("{}/v2/actions/{}", base_url, action.action_id());
    debug!("Fetching action schema from {}", url);

    let response = http
        .get(&url)
        .header("x-api-key", api_key)
        .send()
        .await
        .map_err(|e| LecternError::ToolkitInit(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LecternError::ToolkitInit(format!(
            "{} returned {}: {}",
            action.action_id(),
            status,
            body.trim()
        )));
    }

    let value: serde_json::Value = response
        .json()
        .await
        .map_err(|e| LecternError::ToolkitInit(e.to_string()))?;

    ActionSchema::from_response(value)
}

#[async_trait]
impl DocumentStore for ComposioToolset {
    #[instrument(skip(self, action, input), fields(action = action.action_id()))]
    async fn execute(&self, action: DocumentAction, input: serde_json::Value) -> Result<String> {
        let url = format!("{}/v2/actions/{}/execute", self.base_url, action.action_id());
        let body = self.execute_body(action, input);

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(LecternError::Toolkit(format!("{}: {}", status, text.trim())));
        }

        debug!("Composio returned {} bytes", text.len());
        Ok(text)
    }

    fn schema(&self, action: DocumentAction) -> Option<&ActionSchema> {
        match action {
            DocumentAction::Create => Some(&self.create),
            DocumentAction::Update => Some(&self.update),
        }
    }
}
