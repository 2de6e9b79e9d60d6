use crate::domain::ArchiveId;

/// Tells an external party that an archive is ready. Delivery is best-effort.
#[async_trait::async_trait]
pub trait CompletionNotifier: Send + Sync {
    async fn notify_completed(&self, id: &ArchiveId) -> Result<(), NotifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
    #[error("receiver rejected notification with status {0}")]
    Rejected(u16),
}
