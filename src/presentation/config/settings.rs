use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::infrastructure::http::HttpFileFetcher;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub archive: ArchiveSettings,
    pub webhook: WebhookSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveSettings {
    /// Prefix of the download locator reported by the status endpoint.
    pub public_base_url: String,
    /// Per-request timeout for remote fetches; `0` disables it.
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookSettings {
    pub enabled: bool,
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers `appsettings.<env>.toml` (optional) under `APP_*` variables,
    /// e.g. `APP_WEBHOOK__URL`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::builder(environment)?
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only, ignoring files and the process environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?
            .build()?
            .try_deserialize()
    }

    fn builder(
        environment: Environment,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Self::with_defaults(Config::builder())?.add_source(
            File::with_name(&format!("appsettings.{}", environment.file_suffix())).required(false),
        ))
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("archive.public_base_url", "http://localhost:5000")?
            .set_default(
                "archive.fetch_timeout_secs",
                HttpFileFetcher::DEFAULT_TIMEOUT.as_secs(),
            )?
            .set_default("webhook.enabled", true)?
            .set_default("webhook.url", "http://localhost:8000/webhook")?
            .set_default("webhook.timeout_secs", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)
    }
}

impl ArchiveSettings {
    pub fn fetch_timeout(&self) -> Option<std::time::Duration> {
        (self.fetch_timeout_secs > 0).then(|| std::time::Duration::from_secs(self.fetch_timeout_secs))
    }

    pub fn download_url(&self, archive_file_name: &str) -> String {
        format!(
            "{}/archive/get/{}",
            self.public_base_url.trim_end_matches('/'),
            archive_file_name
        )
    }
}
