use bytes::Bytes;
use url::Url;

const FALLBACK_FILE_NAME: &str = "download";

/// One named file destined for an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Bytes,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Derives an archive entry name from the last non-empty path segment of `url`.
///
/// The segment is used verbatim. URLs without a path fall back to the host.
pub fn file_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .map(str::to_string)
        .or_else(|| url.host_str().map(str::to_string))
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}
