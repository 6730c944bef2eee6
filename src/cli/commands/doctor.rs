//! Doctor command - verify API keys and configuration.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::team::mask;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
///
/// Missing keys are only warnings: the web front-end takes them from the form.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Lectern Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("API Keys").bold());
    for (name, value) in preflight::env_keys() {
        let check = check_key(name, value.as_deref());
        check.print();
        checks.push(check);
    }

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![check_config_file(config_path), check_prompts_dir(settings)];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();
    Output::kv("Model", &settings.model.id);
    Output::kv("Composio", &settings.composio.base_url);
    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found.", errors));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Lectern is ready to use.");
    }

    Ok(())
}

/// Check a key taken from the environment.
fn check_key(name: &str, value: Option<&str>) -> CheckResult {
    match value {
        Some(key) if name == "OPENAI_API_KEY" && !key.starts_with("sk-") => CheckResult::warning(
            name,
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        Some(key) => CheckResult::ok(name, &format!("configured ({})", mask(key))),
        None => CheckResult::warning(
            name,
            "not set",
            &format!("Set with: export {}='...' or enter it in the web form", name),
        ),
    }
}

/// Check that the active config file exists and parses.
fn check_config_file(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::warning(
            "Config file",
            &format!("{} not found, using defaults", path.display()),
            "Create with: lectern config edit",
        );
    }

    match Settings::load_from(Some(&path.to_path_buf())) {
        Ok(_) => CheckResult::ok("Config file", &format!("{}", path.display())),
        Err(e) => CheckResult::error(
            "Config file",
            &format!("{} is invalid: {}", path.display(), e),
            "Fix the file or run: lectern config edit",
        ),
    }
}

/// Check the custom prompts directory, if one is configured.
fn check_prompts_dir(settings: &Settings) -> CheckResult {
    match &settings.prompts.custom_dir {
        None => CheckResult::ok("Prompts", "built-in"),
        Some(dir) => {
            let path = Settings::expand_path(dir);
            if path.is_dir() {
                CheckResult::ok("Prompts", &format!("{}", path.display()))
            } else {
                CheckResult::error(
                    "Prompts",
                    &format!("{} does not exist", path.display()),
                    "Fix prompts.custom_dir in the config file",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_key() {
        assert_eq!(
            check_key("OPENAI_API_KEY", Some("sk-proj-0123456789")).status,
            CheckStatus::Ok
        );
        assert_eq!(
            check_key("OPENAI_API_KEY", Some("nope")).status,
            CheckStatus::Warning
        );
        assert_eq!(
            check_key("COMPOSIO_API_KEY", Some("abcdef0123456789")).message,
            "configured (****6789)"
        );
        assert_eq!(check_key("COMPOSIO_API_KEY", None).status, CheckStatus::Warning);
    }

    #[test]
    fn test_missing_prompts_dir_is_error() {
        let mut settings = Settings::default();
        settings.prompts.custom_dir = Some("/definitely/not/here".to_string());
        assert_eq!(check_prompts_dir(&settings).status, CheckStatus::Error);

        let dir = tempfile::tempdir().unwrap();
        settings.prompts.custom_dir = dir.path().to_str().map(str::to_string);
        assert_eq!(check_prompts_dir(&settings).status, CheckStatus::Ok);
    }

    #[test]
    fn test_config_file_check_uses_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lectern.toml");

        let missing = check_config_file(&path);
        assert_eq!(missing.status, CheckStatus::Warning);
        assert!(missing.message.contains("lectern.toml"));

        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();
        assert_eq!(check_config_file(&path).status, CheckStatus::Ok);

        std::fs::write(&path, "[server\nport = ").unwrap();
        assert_eq!(check_config_file(&path).status, CheckStatus::Error);
    }
}
