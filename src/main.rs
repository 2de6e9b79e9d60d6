use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use url_archiver::application::ports::{CompletionNotifier, JobRepository};
use url_archiver::application::services::{ArchiveBuilder, ArchiveService, ArchiveWorker};
use url_archiver::infrastructure::http::{HttpFileFetcher, NoopNotifier, WebhookNotifier};
use url_archiver::infrastructure::observability::{TracingConfig, init_tracing};
use url_archiver::infrastructure::persistence::InMemoryJobRepository;
use url_archiver::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    let tracing_config = TracingConfig::from_settings(environment.as_str(), &settings.logging);
    init_tracing(&tracing_config, settings.server.port);

    let fetcher = Arc::new(
        HttpFileFetcher::new(settings.archive.fetch_timeout())
            .context("Failed to build HTTP client")?,
    );

    let notifier: Arc<dyn CompletionNotifier> = if settings.webhook.enabled {
        let notifier = WebhookNotifier::new(
            settings.webhook.url.clone(),
            Duration::from_secs(settings.webhook.timeout_secs),
        )
        .context("Failed to build webhook client")?;
        tracing::info!(endpoint = %notifier.endpoint(), "Completion webhook enabled");
        Arc::new(notifier)
    } else {
        tracing::info!("Completion webhook disabled");
        Arc::new(NoopNotifier)
    };

    let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());

    let worker = ArchiveWorker::new(
        Arc::new(ArchiveBuilder::new(fetcher)),
        Arc::clone(&job_repository),
        notifier,
    );
    let archive_service = Arc::new(ArchiveService::new(worker, job_repository));

    let state = AppState {
        archive_service,
        archive_settings: settings.archive.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
