use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::instrument;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{ArchiveId, ArchiveJob};

/// Process-lifetime job store. Jobs are never evicted.
///
/// Entries are inserted fully built and mutated under the shard lock, so a
/// reader always sees a whole job.
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: DashMap<ArchiveId, ArchiveJob>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    #[instrument(skip(self, job), fields(archive_id = %job.id))]
    async fn create(&self, job: &ArchiveJob) -> Result<(), RepositoryError> {
        match self.jobs.entry(job.id.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::ConstraintViolation(format!(
                "archive id already issued: {}",
                job.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(job.clone());
                Ok(())
            }
        }
    }

    async fn get_by_id(&self, id: &ArchiveId) -> Result<Option<ArchiveJob>, RepositoryError> {
        Ok(self.jobs.get(id).map(|job| job.value().clone()))
    }

    #[instrument(skip(self, archive), fields(archive_id = %id, bytes = archive.len()))]
    async fn complete(&self, id: &ArchiveId, archive: Bytes) -> Result<(), RepositoryError> {
        let mut job = self
            .jobs
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if job.status.is_terminal() {
            return Err(RepositoryError::AlreadyFinished {
                id: id.to_string(),
                status: job.status,
            });
        }
        job.complete(archive);
        Ok(())
    }

    #[instrument(skip(self), fields(archive_id = %id))]
    async fn fail(&self, id: &ArchiveId, reason: &str) -> Result<(), RepositoryError> {
        let mut job = self
            .jobs
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if job.status.is_terminal() {
            return Err(RepositoryError::AlreadyFinished {
                id: id.to_string(),
                status: job.status,
            });
        }
        job.fail(reason);
        Ok(())
    }
}
