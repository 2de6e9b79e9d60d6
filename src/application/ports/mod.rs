mod completion_notifier;
mod file_fetcher;
mod job_repository;
mod repository_error;

pub use completion_notifier::{CompletionNotifier, NotifierError};
pub use file_fetcher::{FetchError, FileFetcher};
pub use job_repository::JobRepository;
pub use repository_error::RepositoryError;
