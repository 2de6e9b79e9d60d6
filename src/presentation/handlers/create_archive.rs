use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::FileFetcher;
use crate::infrastructure::observability::redact_url_str;
use crate::presentation::state::AppState;

use super::error_response::error_response;
use super::form::read_form_values;

#[derive(Serialize)]
pub struct CreateArchiveResponse {
    pub archive_hash: String,
}

/// Accepts a urlencoded or multipart form with repeated `urls` fields.
#[tracing::instrument(skip(state, request))]
pub async fn create_archive_handler<F>(
    State(state): State<AppState<F>>,
    request: Request,
) -> Response
where
    F: FileFetcher + ?Sized + 'static,
{
    let urls = match read_form_values(request, "urls").await {
        Ok(urls) => urls,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected archive request body");
            return error_response(e.status(), e.to_string());
        }
    };

    for url in &urls {
        tracing::debug!(url = %redact_url_str(url), "Archive source requested");
    }

    match state.archive_service.submit(urls).await {
        Ok(archive_id) => {
            tracing::info!(archive_id = %archive_id, "Archive job created");
            (
                StatusCode::OK,
                Json(CreateArchiveResponse {
                    archive_hash: archive_id.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create archive job");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create archive job: {}", e),
            )
        }
    }
}
