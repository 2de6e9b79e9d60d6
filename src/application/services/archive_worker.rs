use std::sync::Arc;

use crate::application::ports::{CompletionNotifier, FileFetcher, JobRepository, RepositoryError};
use crate::domain::ArchiveId;

use super::archive_builder::{ArchiveBuildError, ArchiveBuilder};

pub struct ArchiveJobMessage {
    pub archive_id: ArchiveId,
    pub urls: Vec<String>,
}

/// Runs a single archive job to a terminal state.
pub struct ArchiveWorker<F: ?Sized> {
    builder: Arc<ArchiveBuilder<F>>,
    job_repository: Arc<dyn JobRepository>,
    notifier: Arc<dyn CompletionNotifier>,
}

impl<F: ?Sized> Clone for ArchiveWorker<F> {
    fn clone(&self) -> Self {
        Self {
            builder: Arc::clone(&self.builder),
            job_repository: Arc::clone(&self.job_repository),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<F> ArchiveWorker<F>
where
    F: FileFetcher + ?Sized + 'static,
{
    pub fn new(
        builder: Arc<ArchiveBuilder<F>>,
        job_repository: Arc<dyn JobRepository>,
        notifier: Arc<dyn CompletionNotifier>,
    ) -> Self {
        Self {
            builder,
            job_repository,
            notifier,
        }
    }

    pub async fn run(self, msg: ArchiveJobMessage) {
        if let Err(e) = self.process_job(msg).await {
            tracing::error!(error = %e, "Archive job failed");
        }
    }

    pub async fn process_job(&self, msg: ArchiveJobMessage) -> Result<(), ArchiveWorkerError> {
        let archive_id = msg.archive_id;
        tracing::info!(url_count = msg.urls.len(), "Archive build started");

        match self.builder.build(&msg.urls).await {
            Ok(archive) => {
                let size = archive.len();
                self.job_repository
                    .complete(&archive_id, archive)
                    .await
                    .map_err(ArchiveWorkerError::Repository)?;
                tracing::info!(bytes = size, "Archive build completed");

                if let Err(e) = self.notifier.notify_completed(&archive_id).await {
                    tracing::warn!(error = %e, "Completion notification not delivered");
                }
                Ok(())
            }
            Err(e) => {
                self.job_repository
                    .fail(&archive_id, &e.to_string())
                    .await
                    .map_err(ArchiveWorkerError::Repository)?;
                Err(ArchiveWorkerError::Build(e))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveWorkerError {
    #[error("build: {0}")]
    Build(ArchiveBuildError),
    #[error("repository: {0}")]
    Repository(RepositoryError),
}
