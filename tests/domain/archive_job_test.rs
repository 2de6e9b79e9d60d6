use bytes::Bytes;

use url_archiver::domain::{ArchiveId, ArchiveJob, JobStatus};

#[test]
fn given_new_job_when_created_then_is_in_progress_without_archive() {
    let job = ArchiveJob::new(ArchiveId::generate(), 3);

    assert_eq!(job.status, JobStatus::InProgress);
    assert_eq!(job.url_count, 3);
    assert!(job.archive.is_none());
    assert!(job.error_message.is_none());
    assert_eq!(job.created_at, job.updated_at);
}

#[test]
fn given_in_progress_job_when_completed_then_carries_archive() {
    let mut job = ArchiveJob::new(ArchiveId::generate(), 1);

    job.complete(Bytes::from_static(b"PK\x05\x06"));

    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.archive.as_deref(), Some(&b"PK\x05\x06"[..]));
    assert!(job.updated_at >= job.created_at);
}

#[test]
fn given_in_progress_job_when_failed_then_records_reason() {
    let mut job = ArchiveJob::new(ArchiveId::generate(), 1);

    job.fail("http://files.test/a returned status 404");

    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.archive.is_none());
    assert_eq!(
        job.error_message.as_deref(),
        Some("http://files.test/a returned status 404")
    );
}
