mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{ArchiveSettings, LoggingSettings, ServerSettings, Settings, WebhookSettings};
