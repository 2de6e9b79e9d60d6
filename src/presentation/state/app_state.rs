use std::sync::Arc;

use crate::application::ports::FileFetcher;
use crate::application::services::ArchiveService;
use crate::presentation::config::ArchiveSettings;

pub struct AppState<F: ?Sized>
where
    F: FileFetcher,
{
    pub archive_service: Arc<ArchiveService<F>>,
    pub archive_settings: ArchiveSettings,
}

impl<F: ?Sized> Clone for AppState<F>
where
    F: FileFetcher,
{
    fn clone(&self) -> Self {
        Self {
            archive_service: Arc::clone(&self.archive_service),
            archive_settings: self.archive_settings.clone(),
        }
    }
}
