use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::header::{
    ACCEPT_RANGES, CONTENT_DISPOSITION, CONTENT_RANGE, CONTENT_TYPE, RANGE,
};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::ports::FileFetcher;
use crate::application::services::DownloadError;
use crate::domain::{ArchiveId, ByteRange};
use crate::presentation::state::AppState;

use super::error_response::error_response;

pub const ZIP_CONTENT_TYPE: &str = "application/zip";

#[tracing::instrument(skip(state, headers))]
pub async fn download_archive_handler<F>(
    State(state): State<AppState<F>>,
    Path(file_name): Path<String>,
    headers: HeaderMap,
) -> Response
where
    F: FileFetcher + ?Sized + 'static,
{
    let raw_id = file_name.split('.').next().unwrap_or_default();
    let Ok(id) = raw_id.parse::<ArchiveId>() else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Archive not found: {}", raw_id),
        );
    };

    let archive = match state.archive_service.download(&id).await {
        Ok(archive) => archive,
        Err(DownloadError::NotFound(id)) => {
            return error_response(StatusCode::NOT_FOUND, format!("Archive not found: {}", id));
        }
        Err(DownloadError::NotReady(id)) => {
            return error_response(StatusCode::CONFLICT, format!("Archive not ready: {}", id));
        }
        Err(DownloadError::Failed { reason, .. }) => {
            return error_response(
                StatusCode::CONFLICT,
                format!("Archive build failed: {}", reason),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load archive");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load archive: {}", e),
            );
        }
    };

    let range = headers
        .get(RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(ByteRange::parse);

    archive_response(&id.archive_file_name(), archive, range)
}

/// Builds the attachment response; a range serves from its start to the end.
pub fn archive_response(file_name: &str, archive: Bytes, range: Option<ByteRange>) -> Response {
    let total = archive.len() as u64;
    let disposition = format!("attachment; filename={}", file_name);

    let Some(range) = range else {
        tracing::debug!(bytes = total, "Serving full archive");
        return (
            StatusCode::OK,
            [
                (CONTENT_TYPE, ZIP_CONTENT_TYPE.to_string()),
                (CONTENT_DISPOSITION, disposition),
                (ACCEPT_RANGES, "bytes".to_string()),
            ],
            Body::from(archive),
        )
            .into_response();
    };

    let start = range.start_offset(total);
    if start >= total {
        tracing::debug!(start, bytes = total, "Unsatisfiable range");
        return (
            StatusCode::RANGE_NOT_SATISFIABLE,
            [
                (CONTENT_RANGE, format!("bytes */{}", total)),
                (ACCEPT_RANGES, "bytes".to_string()),
            ],
        )
            .into_response();
    }

    tracing::debug!(start, bytes = total, "Serving partial archive");
    (
        StatusCode::PARTIAL_CONTENT,
        [
            (CONTENT_TYPE, ZIP_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, disposition),
            (ACCEPT_RANGES, "bytes".to_string()),
            (CONTENT_RANGE, format!("bytes {}-{}/{}", start, total - 1, total)),
        ],
        Body::from(archive.slice(start as usize..)),
    )
        .into_response()
}
