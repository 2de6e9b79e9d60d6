mod archive_status;
mod create_archive;
mod download_archive;
mod error_response;
mod form;
mod health;

pub use archive_status::{
    ArchiveStatusResponse, archive_status_handler, archive_status_lookup_handler,
};
pub use create_archive::{CreateArchiveResponse, create_archive_handler};
pub use download_archive::{ZIP_CONTENT_TYPE, archive_response, download_archive_handler};
pub use error_response::{ErrorResponse, error_response};
pub use form::{FormError, read_form_values};
pub use health::health_handler;
