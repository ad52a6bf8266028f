mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::config::{display_base_url, load_settings, parse_api_base_url};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::runtime;
use crate::ui::TinyLinkApp;

#[derive(Debug, Parser)]
#[command(name = "tinylink-gui", about = "Desktop window for the TinyLink URL shortener")]
struct Args {
    /// Overrides the configured link API address.
    #[arg(long)]
    api_base_url: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(raw) = args.api_base_url {
        settings.api_base_url = raw;
    }
    let api_base = parse_api_base_url(&settings.api_base_url)
        .with_context(|| format!("invalid api base url '{}'", settings.api_base_url))?;
    let display_base = display_base_url(&api_base);
    tracing::info!(api_base = %display_base, "starting tinylink desktop");

    let (cmd_tx, cmd_rx) = bounded(256);
    let (ui_tx, ui_rx) = bounded(2048);
    runtime::launch(api_base, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TinyLink")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "TinyLink",
        options,
        Box::new(move |_cc| Ok(Box::new(TinyLinkApp::new(cmd_tx, ui_rx, display_base)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
