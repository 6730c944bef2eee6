//! Config command: show, edit or locate the active configuration file.
//!
//! "Active" is the file named by `-c`, or the default location otherwise.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the config command against the config file at `path`.
pub fn run_config(action: &ConfigAction, settings: Settings, path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => print!("{}", describe(&settings, path)?),

        ConfigAction::Edit => {
            if ensure_file(&settings, path)? {
                Output::info(&format!("Created config at {}", path.display()));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());
            Output::info(&format!("Opening {} in {}...", path.display(), editor));

            match std::process::Command::new(&editor).arg(path).status() {
                Ok(status) if status.success() => match Settings::load_from(Some(&path.to_path_buf())) {
                    Ok(_) => Output::success("Config saved."),
                    Err(e) => Output::warning(&format!("Config no longer parses: {}", e)),
                },
                Ok(_) => Output::warning("Editor exited with non-zero status."),
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {}", path.display()));
                }
            }
        }

        ConfigAction::Path => println!("{}", path.display()),
    }

    Ok(())
}

/// The effective settings as TOML, headed by where they came from.
fn describe(settings: &Settings, path: &Path) -> Result<String> {
    let body = toml::to_string_pretty(settings).context("Failed to serialize config")?;
    let source = if path.exists() {
        format!("# {}", path.display())
    } else {
        format!("# {} (not found, showing defaults)", path.display())
    };
    Ok(format!("{}\n\n{}", source, body))
}

/// Write `settings` to `path` unless a file is already there.
/// Returns whether a file was created.
fn ensure_file(settings: &Settings, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    settings
        .save_to(&path.to_path_buf())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
