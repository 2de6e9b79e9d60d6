use axum::Json;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;

use crate::application::ports::FileFetcher;
use crate::domain::{ArchiveId, ArchiveJob, JobStatus};
use crate::presentation::config::ArchiveSettings;
use crate::presentation::state::AppState;

use super::error_response::error_response;
use super::form::read_form_values;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ArchiveStatusResponse {
    InProgress,
    Completed { url: String },
    Failed { error: String },
}

impl ArchiveStatusResponse {
    pub fn from_job(job: &ArchiveJob, settings: &ArchiveSettings) -> Self {
        match job.status {
            JobStatus::InProgress => Self::InProgress,
            JobStatus::Completed => Self::Completed {
                url: settings.download_url(&job.id.archive_file_name()),
            },
            JobStatus::Failed => Self::Failed {
                error: job.error_message.clone().unwrap_or_default(),
            },
        }
    }
}

/// Unknown ids answer `200 null`, the same as ids that were never issued.
#[tracing::instrument(skip(state))]
pub async fn archive_status_handler<F>(
    State(state): State<AppState<F>>,
    Path(archive_id): Path<String>,
) -> Response
where
    F: FileFetcher + ?Sized + 'static,
{
    let Ok(id) = archive_id.parse::<ArchiveId>() else {
        tracing::debug!("Malformed archive id, reporting unknown");
        return Json(None::<ArchiveStatusResponse>).into_response();
    };

    match state.archive_service.status(&id).await {
        Ok(job) => Json(
            job.map(|job| ArchiveStatusResponse::from_job(&job, &state.archive_settings)),
        )
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch archive status");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch archive status: {}", e),
            )
        }
    }
}

/// Form variant: `archive_hash=<id>` redirects to the path-based status URL.
/// The value is not validated here; the target answers `null` for anything
/// that is not a known id.
pub async fn archive_status_lookup_handler(request: Request) -> Response {
    let values = match read_form_values(request, "archive_hash").await {
        Ok(values) => values,
        Err(e) => return error_response(e.status(), e.to_string()),
    };
    let Some(archive_hash) = values.into_iter().next() else {
        return error_response(StatusCode::BAD_REQUEST, "Missing form field: archive_hash");
    };

    Redirect::to(&status_location(&archive_hash)).into_response()
}

fn status_location(archive_hash: &str) -> String {
    let mut location = String::from("/api/archive/status/");
    location.extend(url::form_urlencoded::byte_serialize(archive_hash.as_bytes()));
    location
}
