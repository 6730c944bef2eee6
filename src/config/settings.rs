//! Configuration settings for Lectern.
//!
//! API keys are not part of the settings: they are supplied per run and never
//! written to disk.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub model: ModelSettings,
    pub composio: ComposioSettings,
    pub search: SearchSettings,
    pub arxiv: ArxivSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Chat model settings shared by all four personas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Model identifier sent to the chat-completion API.
    pub id: String,
    /// Base URL of an OpenAI-compatible API (default: api.openai.com).
    pub api_base: Option<String>,
    /// Maximum model round-trips per persona run.
    pub max_iterations: usize,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Ask personas to format answers as Markdown.
    pub markdown: bool,
    /// Show the tool calls each persona made alongside its response.
    pub show_tool_calls: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            id: "gpt-4o".to_string(),
            api_base: None,
            max_iterations: 15,
            timeout_seconds: crate::openai::DEFAULT_TIMEOUT_SECS,
            markdown: true,
            show_tool_calls: true,
        }
    }
}

impl ModelSettings {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Composio tool-integration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposioSettings {
    /// Base URL of the Composio backend API.
    pub base_url: String,
    /// Entity whose connected Google account executes the actions.
    pub entity_id: String,
    /// Also offer the update-document action to the personas.
    pub bind_update: bool,
}

impl Default for ComposioSettings {
    fn default() -> Self {
        Self {
            base_url: "https://backend.composio.dev/api".to_string(),
            entity_id: "default".to_string(),
            bind_update: false,
        }
    }
}

/// Web search (DuckDuckGo) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// DuckDuckGo HTML endpoint.
    pub endpoint: String,
    /// Fixed number of results returned per search.
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
            max_results: 10,
        }
    }
}

/// arXiv search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArxivSettings {
    /// arXiv Atom API endpoint.
    pub endpoint: String,
    /// Maximum papers returned per search.
    pub max_results: usize,
}

impl Default for ArxivSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://export.arxiv.org/api/query".to_string(),
            max_results: 10,
        }
    }
}

/// Web front-end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::LecternError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lectern")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_team_setup() {
        let settings = Settings::default();
        assert_eq!(settings.model.id, "gpt-4o");
        assert_eq!(settings.search.max_results, 10);
        assert!(!settings.composio.bind_update);
        assert_eq!(settings.model.timeout(), Duration::from_secs(300));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [model]
            id = "gpt-4o-mini"
            api_base = "http://localhost:11434/v1"

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(settings.model.id, "gpt-4o-mini");
        assert_eq!(settings.model.api_base.as_deref(), Some("http://localhost:11434/v1"));
        assert_eq!(settings.model.max_iterations, 15);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.composio.entity_id, "default");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.arxiv.max_results = 3;
        settings
            .prompts
            .variables
            .insert("audience".to_string(), "beginners".to_string());
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.arxiv.max_results, 3);
        assert_eq!(loaded.prompts.variables["audience"], "beginners");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.server.port, 8501);
    }
}
