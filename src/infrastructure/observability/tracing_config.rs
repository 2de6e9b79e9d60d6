use crate::presentation::config::LoggingSettings;

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_level: String,
}

impl TracingConfig {
    pub fn from_settings(environment: impl Into<String>, logging: &LoggingSettings) -> Self {
        let defaults = Self::default();
        Self {
            environment: environment.into(),
            json_format: defaults.json_format || logging.enable_json,
            default_level: logging.level.clone(),
        }
    }

    pub fn default_filter(&self) -> String {
        format!(
            "{},url_archiver=debug,tower_http=debug",
            self.default_level
        )
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            default_level: "info".to_string(),
        }
    }
}
