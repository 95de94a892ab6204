//! Single byte-range parsing for `Range: bytes=start-end` requests

/// An inclusive byte span inside a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by the range
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value of the `Content-Range` header for this span
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, size)
    }
}

/// Outcome of inspecting a `Range` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRequest {
    /// A satisfiable single range
    Partial(ByteRange),
    /// Header cannot be honored; the full file is served instead
    Ignored,
    /// Range starts at or past the end of the file
    Unsatisfiable,
}

/// Parse a single `bytes=start-end` range against a file of `size` bytes.
///
/// `end` is optional and defaults to the last byte; an `end` past the file is
/// capped. Multi-range and suffix forms are not supported and are ignored.
pub fn parse_range(header: &str, size: u64) -> RangeRequest {
    let Some(ranges) = header.trim().strip_prefix("bytes=") else {
        return RangeRequest::Ignored;
    };
    if ranges.contains(',') {
        return RangeRequest::Ignored;
    }
    let Some((start, end)) = ranges.split_once('-') else {
        return RangeRequest::Ignored;
    };

    let Ok(start) = start.trim().parse::<u64>() else {
        return RangeRequest::Ignored;
    };
    if start >= size {
        return RangeRequest::Unsatisfiable;
    }

    let last = size - 1;
    let end = match end.trim() {
        "" => last,
        value => match value.parse::<u64>() {
            Ok(end) => end.min(last),
            Err(_) => return RangeRequest::Ignored,
        },
    };
    if end < start {
        return RangeRequest::Ignored;
    }

    RangeRequest::Partial(ByteRange { start, end })
}
