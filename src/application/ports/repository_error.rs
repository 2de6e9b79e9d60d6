use crate::domain::JobStatus;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("job {id} is already {status}")]
    AlreadyFinished { id: String, status: JobStatus },
}
