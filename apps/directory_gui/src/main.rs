mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime};
use clap::Parser;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use ui::{DirectoryGuiApp, StartupConfig};

#[derive(Debug, Parser)]
#[command(about = "Browse the capability directory and manage consultant registrations")]
struct Args {
    /// Base URL of the capability directory service.
    #[arg(long, env = "DIRECTORY_SERVER_URL", default_value = "http://127.0.0.1:8000")]
    server_url: String,
    /// Tracing filter directive; falls back to RUST_LOG, then `info`.
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn env_filter(&self) -> EnvFilter {
        match &self.log_filter {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.env_filter())
        .init();

    let startup = StartupConfig {
        server_url: args.server_url,
    };
    tracing::info!(server_url = %startup.server_url, "starting capability directory");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(cmd_rx, ui_tx, startup.server_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Capability Directory")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Capability Directory",
        options,
        Box::new(move |_cc| Ok(Box::new(DirectoryGuiApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run directory gui: {err}"))
}
