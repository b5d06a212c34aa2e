mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{config::load_settings, Action};
use crossbeam_channel::{bounded, unbounded};
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{BlogBrowserApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Desktop browser for posts and their authors")]
struct Args {
    /// Route to open at startup.
    #[arg(long, default_value = "/")]
    path: String,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings()?;
    if let Some(base_url) = &args.base_url {
        settings = settings.with_api_base_url(base_url)?;
    }
    if let Some(secs) = args.timeout_secs {
        settings = settings.with_request_timeout_secs(secs)?;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    let (action_tx, action_rx) = unbounded::<Action>();
    backend_bridge::runtime::launch(cmd_rx, ui_tx, action_tx, settings);

    let startup = StartupConfig {
        initial_path: args.path,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Blog Browser")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Blog Browser",
        options,
        Box::new(|_cc| Ok(Box::new(BlogBrowserApp::new(cmd_tx, ui_rx, action_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}
