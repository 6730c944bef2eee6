//! Web front-end: one form page plus a JSON endpoint.
//!
//! Submitting the form blocks until all four personas have finished, then
//! returns the page with the results.

use crate::cli::html::Page;
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::LecternError;
use crate::team::{OpenAIResponder, SessionConfig, Team, TeamReport};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared application state.
struct AppState {
    settings: Settings,
    prompts: Prompts,
}

/// Run the web front-end.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let state = Arc::new(AppState { settings, prompts });

    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Lectern");
    println!();
    Output::success(&format!("Open http://{} in your browser", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Page", "GET  /");
    Output::kv("Run (form)", "POST /run");
    Output::kv("Run (JSON)", "POST /api/run");
    Output::kv("Health", "GET  /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api: Router<Arc<AppState>> = Router::new()
        .route("/api/run", post(api_run))
        .layer(cors);

    Router::new()
        .route("/", get(index))
        .route("/run", post(form_run))
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize, Default)]
struct RunRequest {
    #[serde(default)]
    openai_api_key: String,
    #[serde(default)]
    composio_api_key: String,
    #[serde(default)]
    topic: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index() -> impl IntoResponse {
    Html(Page::default().render())
}

async fn form_run(
    State(state): State<Arc<AppState>>,
    Form(req): Form<RunRequest>,
) -> impl IntoResponse {
    let show_tool_calls = state.settings.model.show_tool_calls;

    match dispatch(&state, &req).await {
        Ok(report) => Html(
            Page {
                openai_api_key: &req.openai_api_key,
                composio_api_key: &req.composio_api_key,
                topic: &req.topic,
                report: Some(&report),
                show_tool_calls,
                ..Default::default()
            }
            .render(),
        )
        .into_response(),
        Err(e) => (
            status_for(&e),
            Html(
                Page {
                    openai_api_key: &req.openai_api_key,
                    composio_api_key: &req.composio_api_key,
                    topic: &req.topic,
                    error: Some(e.to_string()),
                    show_tool_calls,
                    ..Default::default()
                }
                .render(),
            ),
        )
            .into_response(),
    }
}

async fn api_run(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunRequest>,
) -> impl IntoResponse {
    match dispatch(&state, &req).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => (
            status_for(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Validate keys, build the toolkit, then run the team.
async fn dispatch(state: &AppState, req: &RunRequest) -> crate::Result<TeamReport> {
    let session = SessionConfig::new(Some(&req.openai_api_key), Some(&req.composio_api_key))?;

    let responder = OpenAIResponder::connect(&session, &state.settings, &state.prompts)
        .await
        .inspect_err(|e| error!("{}", e))?;

    let team = Team::new(responder, state.prompts.clone());
    let report = team
        .run(&req.topic, |persona| info!("{}", persona.progress))
        .await
        .inspect_err(|e| error!("Run failed: {}", e))?;

    info!("Run {} finished with {} link(s)", report.run_id, report.doc_links().len());
    Ok(report)
}

fn status_for(err: &LecternError) -> StatusCode {
    match err {
        e if e.is_user_error() => StatusCode::BAD_REQUEST,
        LecternError::ToolkitInit(_) | LecternError::OpenAI(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
