use std::io::{Cursor, Write};
use std::sync::Arc;

use bytes::Bytes;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::application::ports::{FetchError, FileFetcher};
use crate::domain::ArchiveEntry;

/// Fetches a list of URLs in order and packs the results into one zip.
pub struct ArchiveBuilder<F: ?Sized> {
    fetcher: Arc<F>,
}

impl<F> ArchiveBuilder<F>
where
    F: FileFetcher + ?Sized,
{
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Stops at the first failed fetch. Later URLs are not requested.
    pub async fn build(&self, urls: &[String]) -> Result<Bytes, ArchiveBuildError> {
        let mut entries: Vec<ArchiveEntry> = Vec::with_capacity(urls.len());

        for url in urls {
            let entry = self
                .fetcher
                .fetch(url)
                .await
                .map_err(ArchiveBuildError::Fetch)?;

            tracing::debug!(name = %entry.name, bytes = entry.data.len(), "Fetched archive entry");

            match entries.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => {
                    tracing::debug!(name = %entry.name, "Entry name collision, replacing earlier bytes");
                    existing.data = entry.data;
                }
                None => entries.push(entry),
            }
        }

        tokio::task::spawn_blocking(move || write_zip(&entries))
            .await
            .map_err(|e| ArchiveBuildError::Join(e.to_string()))?
    }
}

/// Serializes `entries` into a zip container in the given order.
pub fn write_zip(entries: &[ArchiveEntry]) -> Result<Bytes, ArchiveBuildError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in entries {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(entry.data.len() as u64 >= u32::MAX as u64);

        writer
            .start_file(entry.name.as_str(), options)
            .map_err(ArchiveBuildError::Zip)?;
        writer.write_all(&entry.data).map_err(ArchiveBuildError::Io)?;
    }

    let cursor = writer.finish().map_err(ArchiveBuildError::Zip)?;
    Ok(Bytes::from(cursor.into_inner()))
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveBuildError {
    #[error("fetch: {0}")]
    Fetch(FetchError),
    #[error("zip: {0}")]
    Zip(zip::result::ZipError),
    #[error("io: {0}")]
    Io(std::io::Error),
    #[error("archive writer task: {0}")]
    Join(String),
}
