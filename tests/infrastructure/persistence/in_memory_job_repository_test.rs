use std::sync::Arc;

use bytes::Bytes;

use url_archiver::application::ports::{JobRepository, RepositoryError};
use url_archiver::domain::{ArchiveId, ArchiveJob, JobStatus};
use url_archiver::infrastructure::persistence::InMemoryJobRepository;

async fn repository_with_job() -> (InMemoryJobRepository, ArchiveId) {
    let repository = InMemoryJobRepository::new();
    let job = ArchiveJob::new(ArchiveId::generate(), 2);
    repository.create(&job).await.unwrap();
    (repository, job.id)
}

#[tokio::test]
async fn given_created_job_when_fetching_then_is_in_progress() {
    let (repository, id) = repository_with_job().await;

    let job = repository.get_by_id(&id).await.unwrap().unwrap();

    assert_eq!(job.status, JobStatus::InProgress);
    assert_eq!(job.url_count, 2);
}

#[tokio::test]
async fn given_unknown_id_when_fetching_then_returns_none() {
    let repository = InMemoryJobRepository::new();

    let job = repository.get_by_id(&ArchiveId::generate()).await.unwrap();

    assert!(job.is_none());
    assert!(repository.is_empty());
}

#[tokio::test]
async fn given_existing_id_when_creating_again_then_returns_constraint_violation() {
    let (repository, id) = repository_with_job().await;

    let result = repository.create(&ArchiveJob::new(id, 1)).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn given_in_progress_job_when_completing_then_archive_is_attached() {
    let (repository, id) = repository_with_job().await;

    repository
        .complete(&id, Bytes::from_static(b"zip bytes"))
        .await
        .unwrap();

    let job = repository.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.archive, Some(Bytes::from_static(b"zip bytes")));
}

#[tokio::test]
async fn given_completed_job_when_completing_again_then_returns_already_finished() {
    let (repository, id) = repository_with_job().await;
    repository.complete(&id, Bytes::from_static(b"one")).await.unwrap();

    let result = repository.complete(&id, Bytes::from_static(b"two")).await;

    assert!(matches!(
        result,
        Err(RepositoryError::AlreadyFinished {
            status: JobStatus::Completed,
            ..
        })
    ));
    let job = repository.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(job.archive, Some(Bytes::from_static(b"one")));
}

#[tokio::test]
async fn given_completed_job_when_failing_then_status_does_not_revert() {
    let (repository, id) = repository_with_job().await;
    repository.complete(&id, Bytes::from_static(b"one")).await.unwrap();

    assert!(repository.fail(&id, "late error").await.is_err());

    let job = repository.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert!(job.error_message.is_none());
}

#[tokio::test]
async fn given_in_progress_job_when_failing_then_reason_is_recorded() {
    let (repository, id) = repository_with_job().await;

    repository.fail(&id, "timed out").await.unwrap();

    let job = repository.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error_message.as_deref(), Some("timed out"));
}

#[tokio::test]
async fn given_unknown_id_when_completing_then_returns_not_found() {
    let repository = InMemoryJobRepository::new();

    let result = repository
        .complete(&ArchiveId::generate(), Bytes::new())
        .await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_concurrent_readers_when_job_completes_then_no_reader_sees_partial_state() {
    let repository = Arc::new(InMemoryJobRepository::new());
    let job = ArchiveJob::new(ArchiveId::generate(), 1);
    let id = job.id.clone();
    repository.create(&job).await.unwrap();

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let repository = Arc::clone(&repository);
            let id = id.clone();
            tokio::spawn(async move {
                for _ in 0..500 {
                    let job = repository.get_by_id(&id).await.unwrap().unwrap();
                    match job.status {
                        JobStatus::InProgress => assert!(job.archive.is_none()),
                        JobStatus::Completed => {
                            assert_eq!(job.archive.as_deref(), Some(&b"payload"[..]))
                        }
                        JobStatus::Failed => panic!("job never fails in this test"),
                    }
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    repository
        .complete(&id, Bytes::from_static(b"payload"))
        .await
        .unwrap();

    for reader in readers {
        reader.await.unwrap();
    }
}
