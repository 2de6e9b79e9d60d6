use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use url::Url;

use crate::application::ports::{FetchError, FileFetcher};
use crate::domain::{ArchiveEntry, file_name_from_url};
use crate::infrastructure::observability::redact_url;

const USER_AGENT: &str = concat!("url-archiver/", env!("CARGO_PKG_VERSION"));

/// Fetches remote files over HTTP(S).
///
/// Naming uses a HEAD probe with redirects disabled so the first `Location`
/// can be observed; the body is then retrieved with redirects followed.
pub struct HttpFileFetcher {
    client: Client,
    probe_client: Client,
}

impl HttpFileFetcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// `timeout` applies to each request separately; `None` waits forever.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut client = Client::builder().user_agent(USER_AGENT);
        let mut probe_client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none());

        if let Some(timeout) = timeout {
            client = client.timeout(timeout);
            probe_client = probe_client.timeout(timeout);
        }

        Ok(Self {
            client: client.build()?,
            probe_client: probe_client.build()?,
        })
    }

    async fn resolve_file_name(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .probe_client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(FetchError::Status {
                url: redact_url(url),
                status: status.as_u16(),
            });
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok());

        let name_source = match location {
            Some(location) => match url.join(location) {
                Ok(target) => {
                    tracing::debug!(target = %redact_url(&target), "Naming file after redirect target");
                    target
                }
                Err(e) => {
                    tracing::warn!(error = %e, location, "Unparseable Location header, using request URL");
                    url.clone()
                }
            },
            None => url.clone(),
        };

        Ok(file_name_from_url(&name_source))
    }
}

#[async_trait]
impl FileFetcher for HttpFileFetcher {
    async fn fetch(&self, url: &str) -> Result<ArchiveEntry, FetchError> {
        let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: redact_url(&parsed),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let name = self.resolve_file_name(&parsed).await?;

        let response = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(|e| request_error(&parsed, e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: redact_url(&parsed),
                status: response.status().as_u16(),
            });
        }

        let data = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: redact_url(&parsed),
                }
            } else {
                FetchError::Body {
                    url: redact_url(&parsed),
                    reason: e.to_string(),
                }
            }
        })?;

        tracing::debug!(url = %redact_url(&parsed), name = %name, bytes = data.len(), "Fetched remote file");

        Ok(ArchiveEntry::new(name, data))
    }
}

fn request_error(url: &Url, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: redact_url(url),
        }
    } else {
        FetchError::Request {
            url: redact_url(url),
            reason: e.to_string(),
        }
    }
}
