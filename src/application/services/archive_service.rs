use std::sync::Arc;

use bytes::Bytes;
use tracing::Instrument;

use crate::application::ports::{FileFetcher, JobRepository, RepositoryError};
use crate::domain::{ArchiveId, ArchiveJob, JobStatus};

use super::archive_worker::{ArchiveJobMessage, ArchiveWorker};

const MAX_ID_ATTEMPTS: usize = 5;

/// Entry point for creating archive jobs and reading their results.
pub struct ArchiveService<F: ?Sized> {
    worker: ArchiveWorker<F>,
    job_repository: Arc<dyn JobRepository>,
}

impl<F> ArchiveService<F>
where
    F: FileFetcher + ?Sized + 'static,
{
    pub fn new(worker: ArchiveWorker<F>, job_repository: Arc<dyn JobRepository>) -> Self {
        Self {
            worker,
            job_repository,
        }
    }

    /// Registers a job and starts building it in the background.
    ///
    /// Returns as soon as the job is registered; no network I/O happens on
    /// the caller's path.
    pub async fn submit(&self, urls: Vec<String>) -> Result<ArchiveId, ArchiveServiceError> {
        let job = self.register(urls.len()).await?;
        let archive_id = job.id;

        let span = tracing::info_span!("archive_job", archive_id = %archive_id);
        let worker = self.worker.clone();
        let msg = ArchiveJobMessage {
            archive_id: archive_id.clone(),
            urls,
        };
        tokio::spawn(worker.run(msg).instrument(span));

        Ok(archive_id)
    }

    pub async fn status(&self, id: &ArchiveId) -> Result<Option<ArchiveJob>, ArchiveServiceError> {
        self.job_repository
            .get_by_id(id)
            .await
            .map_err(ArchiveServiceError::Repository)
    }

    pub async fn download(&self, id: &ArchiveId) -> Result<Bytes, DownloadError> {
        let job = self
            .job_repository
            .get_by_id(id)
            .await
            .map_err(DownloadError::Repository)?
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))?;

        match (job.status, job.archive) {
            (JobStatus::Completed, Some(archive)) => Ok(archive),
            (JobStatus::Failed, _) => Err(DownloadError::Failed {
                id: id.to_string(),
                reason: job.error_message.unwrap_or_default(),
            }),
            _ => Err(DownloadError::NotReady(id.to_string())),
        }
    }

    async fn register(&self, url_count: usize) -> Result<ArchiveJob, ArchiveServiceError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let job = ArchiveJob::new(ArchiveId::generate(), url_count);
            match self.job_repository.create(&job).await {
                Ok(()) => {
                    tracing::debug!(archive_id = %job.id, url_count, "Archive job registered");
                    return Ok(job);
                }
                Err(RepositoryError::ConstraintViolation(reason)) => {
                    tracing::warn!(attempt, reason = %reason, "Archive id collision, regenerating");
                }
                Err(e) => return Err(ArchiveServiceError::Repository(e)),
            }
        }
        Err(ArchiveServiceError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveServiceError {
    #[error("repository: {0}")]
    Repository(RepositoryError),
    #[error("no unused archive id after {0} attempts")]
    IdSpaceExhausted(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("archive not found: {0}")]
    NotFound(String),
    #[error("archive not ready: {0}")]
    NotReady(String),
    #[error("archive build failed for {id}: {reason}")]
    Failed { id: String, reason: String },
    #[error("repository: {0}")]
    Repository(RepositoryError),
}
