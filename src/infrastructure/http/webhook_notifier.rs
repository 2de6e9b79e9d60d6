use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{CompletionNotifier, NotifierError};
use crate::domain::ArchiveId;

#[derive(Serialize)]
struct CompletionPayload<'a> {
    zip_id: &'a str,
}

/// Posts `{"zip_id": "<id>"}` to a fixed endpoint when an archive is ready.
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
}

impl WebhookNotifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionNotifier for WebhookNotifier {
    async fn notify_completed(&self, id: &ArchiveId) -> Result<(), NotifierError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CompletionPayload { zip_id: id.as_str() })
            .send()
            .await
            .map_err(|e| NotifierError::DeliveryFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifierError::Rejected(response.status().as_u16()));
        }

        tracing::debug!(endpoint = %self.endpoint, "Completion webhook delivered");
        Ok(())
    }
}

/// Used when webhook delivery is switched off.
pub struct NoopNotifier;

#[async_trait]
impl CompletionNotifier for NoopNotifier {
    async fn notify_completed(&self, id: &ArchiveId) -> Result<(), NotifierError> {
        tracing::debug!(archive_id = %id, "Webhook disabled, skipping notification");
        Ok(())
    }
}
