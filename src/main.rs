//! Lectern CLI entry point.

use anyhow::Result;
use clap::Parser;
use lectern::cli::{commands, Cli, Commands};
use lectern::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from -c or the default location
    let config_path = cli.config_path();
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging; -v flags win over the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("lectern={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match &cli.command {
        Commands::Run {
            topic,
            openai_api_key,
            composio_api_key,
            model,
            output,
        } => {
            commands::run_team(
                topic,
                openai_api_key.as_deref(),
                composio_api_key.as_deref(),
                model.clone(),
                output.clone(),
                settings,
            )
            .await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Personas => {
            commands::run_personas(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, &config_path)?;
        }
    }

    Ok(())
}
