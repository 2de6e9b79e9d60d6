use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use url_archiver::application::ports::{CompletionNotifier, JobRepository};
use url_archiver::application::services::{
    ArchiveBuilder, ArchiveService, ArchiveWorker, DownloadError,
};
use url_archiver::domain::{ArchiveId, JobStatus};
use url_archiver::infrastructure::persistence::InMemoryJobRepository;

use crate::helpers::{FailingNotifier, StubFetcher, harness, read_zip, wait_for_terminal};

#[tokio::test]
async fn given_slow_fetch_when_submitting_then_returns_id_before_build_finishes() {
    let gate = Arc::new(Notify::new());
    let h = harness(StubFetcher::new().with_gated_file(
        "http://files.test/a.txt",
        "a.txt",
        b"alpha",
        Arc::clone(&gate),
    ));

    let id = h
        .service
        .submit(vec!["http://files.test/a.txt".to_string()])
        .await
        .unwrap();

    let job = h.service.status(&id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::InProgress);
    assert!(job.archive.is_none());

    gate.notify_one();
    let job = wait_for_terminal(&h.repository, &id).await;
    assert_eq!(job.status, JobStatus::Completed);
}

#[tokio::test]
async fn given_repeated_submissions_when_collecting_ids_then_all_unique() {
    let h = harness(StubFetcher::new());

    let mut ids = HashSet::new();
    for _ in 0..50 {
        ids.insert(h.service.submit(vec![]).await.unwrap());
    }

    assert_eq!(ids.len(), 50);
    assert_eq!(h.repository.len(), 50);
}

#[tokio::test]
async fn given_successful_build_when_completed_then_archive_is_stored_and_webhook_notified() {
    let h = harness(
        StubFetcher::new()
            .with_file("http://files.test/a.txt", "a.txt", b"alpha")
            .with_file("http://files.test/b.png", "b.png", b"bravo"),
    );

    let id = h
        .service
        .submit(vec![
            "http://files.test/a.txt".to_string(),
            "http://files.test/b.png".to_string(),
        ])
        .await
        .unwrap();
    let job = wait_for_terminal(&h.repository, &id).await;

    assert_eq!(job.status, JobStatus::Completed);
    let archive = h.service.download(&id).await.unwrap();
    assert_eq!(
        read_zip(&archive),
        vec![
            ("a.txt".to_string(), b"alpha".to_vec()),
            ("b.png".to_string(), b"bravo".to_vec()),
        ]
    );

    let notified = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let notified = h.notifier.notified();
            if !notified.is_empty() {
                return notified;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
    assert_eq!(notified, vec![id]);
}

#[tokio::test]
async fn given_fetch_failure_when_build_runs_then_job_is_failed_with_reason() {
    let h = harness(StubFetcher::new().with_status("http://files.test/gone", 404));

    let id = h
        .service
        .submit(vec!["http://files.test/gone".to_string()])
        .await
        .unwrap();
    let job = wait_for_terminal(&h.repository, &id).await;

    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error_message.unwrap().contains("404"));
    assert!(h.notifier.notified().is_empty());
}

#[tokio::test]
async fn given_failed_job_when_downloading_then_returns_failed_error() {
    let h = harness(StubFetcher::new().with_status("http://files.test/gone", 500));

    let id = h
        .service
        .submit(vec!["http://files.test/gone".to_string()])
        .await
        .unwrap();
    wait_for_terminal(&h.repository, &id).await;

    assert!(matches!(
        h.service.download(&id).await,
        Err(DownloadError::Failed { .. })
    ));
}

#[tokio::test]
async fn given_unknown_id_when_querying_then_status_is_none_and_download_not_found() {
    let h = harness(StubFetcher::new());
    let id = ArchiveId::generate();

    assert!(h.service.status(&id).await.unwrap().is_none());
    assert!(matches!(
        h.service.download(&id).await,
        Err(DownloadError::NotFound(_))
    ));
}

#[tokio::test]
async fn given_in_progress_job_when_downloading_then_returns_not_ready() {
    let h = harness(StubFetcher::new().with_hang("http://files.test/stuck"));

    let id = h
        .service
        .submit(vec!["http://files.test/stuck".to_string()])
        .await
        .unwrap();

    assert!(matches!(
        h.service.download(&id).await,
        Err(DownloadError::NotReady(_))
    ));
}

#[tokio::test]
async fn given_stalled_job_when_another_job_runs_then_second_completes_independently() {
    let h = harness(
        StubFetcher::new()
            .with_hang("http://files.test/stuck")
            .with_file("http://files.test/b.txt", "b.txt", b"bravo"),
    );

    let stalled = h
        .service
        .submit(vec!["http://files.test/stuck".to_string()])
        .await
        .unwrap();
    let healthy = h
        .service
        .submit(vec!["http://files.test/b.txt".to_string()])
        .await
        .unwrap();

    let job = wait_for_terminal(&h.repository, &healthy).await;
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(
        read_zip(job.archive.as_ref().unwrap()),
        vec![("b.txt".to_string(), b"bravo".to_vec())]
    );

    let stalled_job = h.service.status(&stalled).await.unwrap().unwrap();
    assert_eq!(stalled_job.status, JobStatus::InProgress);
}

#[tokio::test]
async fn given_unreachable_webhook_when_build_completes_then_job_still_completed() {
    let fetcher = Arc::new(StubFetcher::new().with_file("http://files.test/a.txt", "a.txt", b"alpha"));
    let repository = Arc::new(InMemoryJobRepository::new());
    let worker = ArchiveWorker::new(
        Arc::new(ArchiveBuilder::new(fetcher)),
        Arc::clone(&repository) as Arc<dyn JobRepository>,
        Arc::new(FailingNotifier) as Arc<dyn CompletionNotifier>,
    );
    let service = ArchiveService::new(worker, Arc::clone(&repository) as Arc<dyn JobRepository>);

    let id = service
        .submit(vec!["http://files.test/a.txt".to_string()])
        .await
        .unwrap();
    let job = wait_for_terminal(&repository, &id).await;

    assert_eq!(job.status, JobStatus::Completed);
    assert!(service.download(&id).await.is_ok());
}
