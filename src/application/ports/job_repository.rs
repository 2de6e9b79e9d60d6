use bytes::Bytes;

use crate::domain::{ArchiveId, ArchiveJob};

use super::RepositoryError;

/// Shared store of archive jobs.
///
/// `complete` and `fail` are the only transitions and both require the job to
/// still be in progress.
#[async_trait::async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &ArchiveJob) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: &ArchiveId) -> Result<Option<ArchiveJob>, RepositoryError>;

    async fn complete(&self, id: &ArchiveId, archive: Bytes) -> Result<(), RepositoryError>;

    async fn fail(&self, id: &ArchiveId, reason: &str) -> Result<(), RepositoryError>;
}
