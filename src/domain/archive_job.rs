use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::{ArchiveId, JobStatus};

/// Snapshot of one archive job.
///
/// `archive` is present only once the job is `Completed`; `error_message`
/// only once it is `Failed`.
#[derive(Debug, Clone)]
pub struct ArchiveJob {
    pub id: ArchiveId,
    pub status: JobStatus,
    pub url_count: usize,
    pub archive: Option<Bytes>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArchiveJob {
    pub fn new(id: ArchiveId, url_count: usize) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::InProgress,
            url_count,
            archive: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn complete(&mut self, archive: Bytes) {
        self.status = JobStatus::Completed;
        self.archive = Some(archive);
        self.updated_at = Utc::now();
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.error_message = Some(reason.into());
        self.updated_at = Utc::now();
    }
}
