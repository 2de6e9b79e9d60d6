mod http_file_fetcher;
mod webhook_notifier;

pub use http_file_fetcher::HttpFileFetcher;
pub use webhook_notifier::{NoopNotifier, WebhookNotifier};
