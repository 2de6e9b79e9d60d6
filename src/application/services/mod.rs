mod archive_builder;
mod archive_service;
mod archive_worker;

pub use archive_builder::{ArchiveBuildError, ArchiveBuilder, write_zip};
pub use archive_service::{ArchiveService, ArchiveServiceError, DownloadError};
pub use archive_worker::{ArchiveJobMessage, ArchiveWorker, ArchiveWorkerError};
