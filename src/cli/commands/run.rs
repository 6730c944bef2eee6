//! Run command: dispatch a topic to the team from the terminal.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::team::{OpenAIResponder, Team};
use anyhow::Result;

/// Run the team on a topic and print the report.
pub async fn run_team(
    topic: &str,
    openai_api_key: Option<&str>,
    composio_api_key: Option<&str>,
    model: Option<String>,
    output: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    let session = match preflight::check_credentials(openai_api_key, composio_api_key) {
        Ok(session) => session,
        Err(e) => {
            Output::error(&e.to_string());
            Output::info("Pass --openai-api-key/--composio-api-key or set OPENAI_API_KEY/COMPOSIO_API_KEY.");
            return Err(e.into());
        }
    };

    if let Some(model) = model {
        settings.model.id = model;
    }

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let spinner = Output::spinner("Connecting to Composio...");
    let responder = match OpenAIResponder::connect(&session, &settings, &prompts).await {
        Ok(responder) => responder,
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };
    spinner.finish_and_clear();

    let team = Team::new(responder, prompts);

    // One spinner per persona; the previous one is cleared when the next starts.
    let mut current: Option<indicatif::ProgressBar> = None;
    let result = team
        .run(topic, |persona| {
            if let Some(previous) = current.take() {
                previous.finish_and_clear();
            }
            current = Some(Output::spinner(persona.progress));
        })
        .await;

    if let Some(last) = current.take() {
        last.finish_and_clear();
    }

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            Output::error(&format!("Run failed: {}", e));
            return Err(e.into());
        }
    };

    Output::report(&report, settings.model.show_tool_calls);

    if let Some(path) = output {
        let path = Settings::expand_path(&path);
        std::fs::write(&path, report.to_markdown(settings.model.show_tool_calls))?;
        Output::success(&format!("Report written to {}", path.display()));
    }

    Ok(())
}
