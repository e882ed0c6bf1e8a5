use std::path::Path;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use shared::domain::{DEFAULT_ADDRESS_THRESHOLD, DEFAULT_ORIGIN};
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "order_form";
pub const ENV_PREFIX: &str = "ORDER_FORM";

const DEFAULT_ENDPOINT_URL: &str = "https://script.google.com/macros/s/AKfycbyRCIW1e-h9KkLFfUMsroFS4Xprh5l8FW6hteUqlxfxHqUSeVSISw-O7iNupwbb3p5_/exec";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    pub endpoint_url: String,
    pub origin: String,
    pub address_threshold: u64,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.into(),
            origin: DEFAULT_ORIGIN.into(),
            address_threshold: DEFAULT_ADDRESS_THRESHOLD,
        }
    }
}

impl FormSettings {
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(self.endpoint_url.trim())
            .with_context(|| format!("invalid endpoint url '{}'", self.endpoint_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("endpoint url must be http or https, got '{}'", url.scheme());
        }
        if self.address_threshold == 0 {
            bail!("address_threshold must be at least 1");
        }
        Ok(())
    }
}

/// Loads settings from `order_form.toml` in the working directory (or the
/// given file), then applies `ORDER_FORM__*` environment overrides.
pub fn load_settings(path: Option<&Path>) -> Result<FormSettings> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
    };

    let settings: FormSettings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to read order form settings")?
        .try_deserialize()
        .context("failed to parse order form settings")?;

    settings.validate()?;
    Ok(settings)
}
