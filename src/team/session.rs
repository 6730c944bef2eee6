//! Per-run credentials.

use crate::error::{LecternError, Result};

/// The two API keys a run needs. Held for one run only.
#[derive(Clone)]
pub struct SessionConfig {
    openai_api_key: String,
    composio_api_key: String,
}

impl SessionConfig {
    /// Validate and trim both keys. Blank keys count as missing.
    pub fn new(openai_api_key: Option<&str>, composio_api_key: Option<&str>) -> Result<Self> {
        let openai = openai_api_key.map(str::trim).unwrap_or_default();
        let composio = composio_api_key.map(str::trim).unwrap_or_default();

        let missing: Vec<&str> = [("OpenAI", openai), ("Composio", composio)]
            .into_iter()
            .filter(|(_, key)| key.is_empty())
            .map(|(name, _)| name)
            .collect();

        if !missing.is_empty() {
            return Err(LecternError::MissingCredential(format!(
                "Please enter both OpenAI and Composio API keys (missing: {}).",
                missing.join(", ")
            )));
        }

        Ok(Self {
            openai_api_key: openai.to_string(),
            composio_api_key: composio.to_string(),
        })
    }

    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    pub fn composio_api_key(&self) -> &str {
        &self.composio_api_key
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("openai_api_key", &mask(&self.openai_api_key))
            .field("composio_api_key", &mask(&self.composio_api_key))
            .finish()
    }
}

/// Mask a secret for display, keeping at most the last four characters.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_keys_required() {
        let err = SessionConfig::new(Some("sk-abc"), None).unwrap_err();
        assert!(matches!(err, LecternError::MissingCredential(ref m) if m.contains("Composio")));

        let err = SessionConfig::new(Some("  "), Some("comp")).unwrap_err();
        assert!(matches!(err, LecternError::MissingCredential(ref m) if m.contains("missing: OpenAI)")));

        let err = SessionConfig::new(None, None).unwrap_err();
        assert!(err.to_string().contains("OpenAI, Composio"));
    }

    #[test]
    fn test_keys_are_trimmed() {
        let session = SessionConfig::new(Some(" sk-abc \n"), Some("\tcomp ")).unwrap();
        assert_eq!(session.openai_api_key(), "sk-abc");
        assert_eq!(session.composio_api_key(), "comp");
    }

    #[test]
    fn test_debug_hides_keys() {
        let session = SessionConfig::new(Some("sk-1234567890abcd"), Some("short")).unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains("sk-1234567890"));
        assert!(debug.contains("****abcd"));
    }
}
