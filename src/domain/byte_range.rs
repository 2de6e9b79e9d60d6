/// The first range of a `Range: bytes=...` header.
///
/// Only the start of the first range is honoured; its end and any further
/// ranges are dropped at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// `bytes=S-` or `bytes=S-E`
    From(u64),
    /// `bytes=-K`, the last `K` bytes
    Suffix(u64),
}

impl ByteRange {
    /// Returns `None` for anything that is not a well-formed bytes range;
    /// callers treat that as "no range requested".
    pub fn parse(header: &str) -> Option<Self> {
        let (unit, spec) = header.trim().split_once('=')?;
        if !unit.trim().eq_ignore_ascii_case("bytes") {
            return None;
        }

        let first = spec.split(',').next()?.trim();
        let (start, end) = first.split_once('-')?;
        let (start, end) = (start.trim(), end.trim());

        if start.is_empty() {
            return end.parse().ok().map(ByteRange::Suffix);
        }

        let start: u64 = start.parse().ok()?;
        if !end.is_empty() {
            let end: u64 = end.parse().ok()?;
            if end < start {
                return None;
            }
        }
        Some(ByteRange::From(start))
    }

    /// Offset to start serving from in a resource of `len` bytes.
    /// May be `>= len`, in which case the range is unsatisfiable.
    pub fn start_offset(&self, len: u64) -> u64 {
        match *self {
            ByteRange::From(start) => start,
            ByteRange::Suffix(count) => len.saturating_sub(count),
        }
    }
}
