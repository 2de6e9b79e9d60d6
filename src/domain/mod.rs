mod archive_entry;
mod archive_id;
mod archive_job;
mod byte_range;
mod job_status;

pub use archive_entry::{ArchiveEntry, file_name_from_url};
pub use archive_id::ArchiveId;
pub use archive_job::ArchiveJob;
pub use byte_range::ByteRange;
pub use job_status::JobStatus;
