use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{load_settings, HttpSubmissionEndpoint, OrderFormController};
use shared::domain::FieldName;
use tracing_subscriber::EnvFilter;

/// Submit a milk order from the command line.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file (defaults to ./order_form.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the submission endpoint from settings
    #[arg(long)]
    endpoint_url: Option<String>,
    /// Customer name or organization, e.g. ООО "Рога и Копыта"
    #[arg(long)]
    name: String,
    #[arg(long)]
    tel: String,
    /// Kilograms of milk
    #[arg(long)]
    quantity: String,
    /// Delivery date, YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// Delivery address, used only for large orders
    #[arg(long)]
    address: Option<String>,
    /// Print the final status and errors as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = args.endpoint_url {
        settings.endpoint_url = url;
        settings.validate()?;
    }

    let endpoint = Arc::new(HttpSubmissionEndpoint::new(settings.endpoint_url.clone()));
    let mut controller = OrderFormController::new(settings, endpoint);

    controller.handle_change(FieldName::Name, &args.name);
    controller.handle_change(FieldName::Tel, &args.tel);
    controller.handle_change(FieldName::Quantity, &args.quantity);
    if let Some(address) = args.address.as_deref() {
        if controller.address_required() {
            controller.handle_change(FieldName::Address, address);
        } else {
            eprintln!(
                "note: address is only needed from {} kg; ignoring it",
                controller.settings().address_threshold
            );
        }
    }
    controller.handle_change(FieldName::Date, &args.date);

    let status = controller.submit().await;
    tracing::debug!(status = %status, "order form finished");

    if args.json {
        let errors: serde_json::Map<String, serde_json::Value> = controller
            .errors()
            .iter()
            .map(|(field, message)| (field.to_string(), message.into()))
            .collect();
        let report = serde_json::json!({
            "status": status,
            "message": status.message(),
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (field, message) in controller.errors().iter() {
            eprintln!("{field}: {message}");
        }
        if let Some(message) = status.message() {
            println!("{message}");
        }
    }

    Ok(if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
