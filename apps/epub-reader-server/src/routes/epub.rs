//! EPUB streaming routes
//!
//! Serves EPUB files from the public directory with single byte-range support.

use std::io;

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use futures::{stream, Stream};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

use crate::error::{AppError, Result};
use crate::manifest::mime;
use crate::range::{parse_range, ByteRange, RangeRequest};
use crate::state::AppState;

/// Read size per streamed chunk
const CHUNK_SIZE: usize = 64 * 1024;

/// Create the EPUB router
pub fn router() -> Router<AppState> {
    Router::new().route("/:filename", get(serve_epub))
}

/// Stream an EPUB, honoring a single `Range` header
async fn serve_epub(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let path = state
        .library()
        .resolve(&filename)
        .await
        .ok_or(AppError::EpubNotFound)?;

    let size = tokio::fs::metadata(&path).await?.len();
    let request = headers
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok())
        .map(|value| parse_range(value, size))
        .unwrap_or(RangeRequest::Ignored);

    let file = File::open(&path).await?;

    match request {
        RangeRequest::Partial(range) => {
            tracing::debug!(
                file = %filename,
                start = range.start,
                end = range.end,
                size,
                "Serving partial EPUB content"
            );
            let body = Body::from_stream(stream_span(file, range).await?);

            Ok(Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_RANGE, range.content_range(size))
                .header(header::ACCEPT_RANGES, "bytes")
                .header(header::CONTENT_LENGTH, range.len())
                .header(header::CONTENT_TYPE, mime::EPUB)
                .body(body)?)
        }
        RangeRequest::Unsatisfiable => Err(AppError::RangeNotSatisfiable { size }),
        RangeRequest::Ignored => {
            tracing::debug!(file = %filename, size, "Serving full EPUB");
            let body = Body::from_stream(read_chunks(file, size));

            Ok(Response::builder()
                .status(StatusCode::OK)
                .header(header::ACCEPT_RANGES, "bytes")
                .header(header::CONTENT_LENGTH, size)
                .header(header::CONTENT_TYPE, mime::EPUB)
                .body(body)?)
        }
    }
}

/// Seek to the start of `range` and stream exactly its bytes
async fn stream_span(
    mut file: File,
    range: ByteRange,
) -> io::Result<impl Stream<Item = io::Result<Bytes>>> {
    file.seek(SeekFrom::Start(range.start)).await?;
    Ok(read_chunks(file, range.len()))
}

/// Stream `remaining` bytes from the current file position
fn read_chunks(file: File, remaining: u64) -> impl Stream<Item = io::Result<Bytes>> {
    stream::try_unfold((file, remaining), |(mut file, remaining)| async move {
        if remaining == 0 {
            return Ok(None);
        }

        let want = remaining.min(CHUNK_SIZE as u64) as usize;
        let mut buf = vec![0u8; want];
        let read = file.read(&mut buf).await?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "file shrank while streaming",
            ));
        }
        buf.truncate(read);

        Ok(Some((Bytes::from(buf), (file, remaining - read as u64))))
    })
}
