//! Error types for Lectern.

use thiserror::Error;

/// Library-level error type for Lectern operations.
#[derive(Error, Debug)]
pub enum LecternError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Please enter a topic.")]
    EmptyTopic,

    #[error("Error initializing tool integration: {0}")]
    ToolkitInit(String),

    #[error("Tool integration error: {0}")]
    Toolkit(String),

    #[error("Web search failed: {0}")]
    Search(String),

    #[error("Paper search failed: {0}")]
    Papers(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

impl LecternError {
    /// Whether the error was caused by what the user supplied (keys, topic)
    /// rather than by a remote service.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LecternError::MissingCredential(_) | LecternError::EmptyTopic
        )
    }
}

/// Result type alias for Lectern operations.
pub type Result<T> = std::result::Result<T, LecternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        assert!(LecternError::EmptyTopic.is_user_error());
        assert!(LecternError::MissingCredential("Composio".to_string()).is_user_error());
        assert!(!LecternError::ToolkitInit("401".to_string()).is_user_error());
        assert!(!LecternError::Agent("no choices".to_string()).is_user_error());
    }
}
