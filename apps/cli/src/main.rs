use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::load_settings,
    views::{self, DeleteDecision},
    AppState, FetchOrchestrator, JsonPlaceholderClient, Route, SharedStore,
};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Browse posts and their authors from a JSON placeholder API")]
struct Args {
    /// Path to open: `/`, `/show/{id}` or `/delete/{id}`.
    #[arg(default_value = "/")]
    path: String,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Answer the delete confirmation with "confirm" instead of "cancel".
    #[arg(long)]
    confirm: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(base_url) = &args.base_url {
        settings = settings.with_api_base_url(base_url)?;
    }
    if let Some(secs) = args.timeout_secs {
        settings = settings.with_request_timeout_secs(secs)?;
    }

    let route = Route::resolve(&args.path);
    let client = JsonPlaceholderClient::from_settings(&settings)
        .context("failed to build remote api client")?;
    tracing::info!(base_url = client.base_url(), %route, "opening");

    let store = SharedStore::new();
    let mut orchestrator = FetchOrchestrator::new(client);
    orchestrator
        .load_posts_and_authors(&store)
        .await
        .context("could not load posts")?;
    let report = orchestrator.settle().await;
    tracing::debug!(?report, "author fetches settled");

    let state = store.snapshot();
    print!("{}", screen_text(&state, &route, args.confirm));
    Ok(())
}

fn screen_text(state: &AppState, route: &Route, confirm: bool) -> String {
    match route {
        Route::List => render::list(&views::list_rows(state)),
        Route::Show { id } => render::detail(&views::detail_view(state, id)),
        Route::Delete { id } => {
            let decision = if confirm {
                DeleteDecision::Confirm
            } else {
                DeleteDecision::Cancel
            };
            if decision == DeleteDecision::Confirm {
                views::log_delete_confirmation(id);
            }
            let underlay = decision
                .next_route()
                .map(|next| screen_text(state, &next, false))
                .unwrap_or_default();
            format!(
                "{}{underlay}",
                render::delete_prompt(&views::delete_prompt(state, id), decision)
            )
        }
        Route::NotFound { path } => render::not_found(path),
    }
}
