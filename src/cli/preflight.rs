//! Pre-flight checks before a run.
//!
//! Validates that both API keys are present before any client is built or
//! any request is sent.

use crate::error::Result;
use crate::team::SessionConfig;

/// Resolve the session keys from CLI flags or the environment.
///
/// clap already falls back to `OPENAI_API_KEY` / `COMPOSIO_API_KEY`, so the
/// arguments here are whatever the user supplied either way.
pub fn check_credentials(
    openai_api_key: Option<&str>,
    composio_api_key: Option<&str>,
) -> Result<SessionConfig> {
    SessionConfig::new(openai_api_key, composio_api_key)
}

/// Report which well-known key variables are set in the environment.
pub fn env_keys() -> [(&'static str, Option<String>); 2] {
    [
        ("OPENAI_API_KEY", read_env("OPENAI_API_KEY")),
        ("COMPOSIO_API_KEY", read_env("COMPOSIO_API_KEY")),
    ]
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LecternError;

    #[test]
    fn test_missing_key_stops_before_anything_runs() {
        let err = check_credentials(Some("sk-abc"), Some("")).unwrap_err();
        assert!(matches!(err, LecternError::MissingCredential(_)));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_env_keys_names() {
        let names: Vec<_> = env_keys().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["OPENAI_API_KEY", "COMPOSIO_API_KEY"]);
    }
}
