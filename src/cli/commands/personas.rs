//! Personas command: describe the team.

use crate::cli::Output;
use crate::config::Settings;
use crate::persona::TEAM;
use console::style;

/// Print every persona with its role, deliverable and tools.
pub fn run_personas(settings: &Settings) -> anyhow::Result<()> {
    Output::header("About the Agents");
    println!();

    for (i, persona) in TEAM.iter().enumerate() {
        println!(
            "{}. {} ({})",
            i + 1,
            style(persona.name).bold(),
            style(persona.role).dim()
        );
        println!("   {}", persona.summary);
        Output::kv("Deliverable", persona.deliverable);

        let tools: Vec<String> = persona.tools.iter().map(|t| t.to_string()).collect();
        Output::kv("Tools", &tools.join(", "));
        println!();
    }

    Output::kv("Model", &settings.model.id);
    if settings.composio.bind_update {
        Output::kv("Google Docs", "create and update");
    }

    Ok(())
}
