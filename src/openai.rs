//! OpenAI client configuration.

use crate::config::ModelSettings;
use crate::error::{LecternError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client for the given key and model settings.
///
/// The key goes straight into the client configuration; the process
/// environment is left untouched. `api_base` points the client at an
/// OpenAI-compatible endpoint when set.
pub fn create_client(api_key: &str, settings: &ModelSettings) -> Result<Client<OpenAIConfig>> {
    let http_client = http_client(settings.timeout())?;

    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base) = &settings.api_base {
        config = config.with_api_base(base.trim_end_matches('/'));
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}

/// Build the shared reqwest client used for every outbound call.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("lectern/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LecternError::Config(format!("Failed to create HTTP client: {}", e)))
}
