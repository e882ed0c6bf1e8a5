use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use clap::Parser;
use client_core::{load_settings, FormSettings, HttpSubmissionEndpoint, OrderFormController};
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use ui::OrderFormApp;

#[derive(Parser, Debug)]
struct StartupArgs {
    /// Settings file (defaults to ./order_form.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the submission endpoint from settings
    #[arg(long)]
    endpoint_url: Option<String>,
}

fn resolve_settings(args: &StartupArgs) -> anyhow::Result<FormSettings> {
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = &args.endpoint_url {
        settings.endpoint_url = url.clone();
        settings.validate()?;
    }
    Ok(settings)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = StartupArgs::parse();

    let (settings, startup_notice) = match resolve_settings(&args) {
        Ok(settings) => (settings, None),
        Err(err) => {
            tracing::error!("failed to load settings, using defaults: {err:#}");
            (
                FormSettings::default(),
                Some(format!("Настройки не загружены ({err}); используются значения по умолчанию")),
            )
        }
    };
    tracing::info!(endpoint = %settings.endpoint_url, "starting order form");

    let endpoint = Arc::new(HttpSubmissionEndpoint::new(settings.endpoint_url.clone()));
    let controller = OrderFormController::new(settings, endpoint);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(controller.endpoint(), cmd_rx, ui_tx);

    let app = OrderFormApp::new(controller, cmd_tx, ui_rx, startup_notice);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Форма заказа молока")
            .with_inner_size([560.0, 720.0])
            .with_min_inner_size([400.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Форма заказа молока",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
