//! Local download & stream strategy.
//!
//! The extractor downloads the media into temporary storage under a
//! per-request token, the file is streamed back to the client, and the
//! artifact is deleted once the stream is dropped, on every path.

use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use tokio_util::io::ReaderStream;
use tracing::debug;

use super::temp::{self, TempArtifact};
use super::{CHUNK_SIZE, Delivery};
use crate::error::{Error, Result};
use crate::extractor::MediaExtractor;

/// Download the media locally and return it as an attachment stream.
pub async fn download_and_stream(
    extractor: &dyn MediaExtractor,
    temp_dir: &Path,
    url: &str,
    format: &str,
) -> Result<Delivery> {
    let resolved = extractor.resolve(url, format).await?;
    let filename = resolved.filename();

    let token = temp::generate_token();
    let template = temp_dir.join(format!("{token}.%(ext)s"));
    let template = template.to_string_lossy();

    extractor.download(url, format, &template).await?;

    let path = temp::find_by_token(temp_dir, &token)
        .await?
        .ok_or_else(|| Error::transfer("download finished but produced no output file"))?;

    debug!(path = %path.display(), %filename, "streaming downloaded artifact");

    let artifact = TempArtifact::new(path);
    let file = tokio::fs::File::open(artifact.path()).await?;

    Ok(Delivery::Attachment {
        filename,
        body: Box::pin(ArtifactStream::new(file, artifact)),
    })
}

/// File stream that owns its temporary artifact.
///
/// The artifact is dropped together with the stream, which is what guarantees
/// cleanup after completion and after client disconnect.
struct ArtifactStream {
    inner: ReaderStream<tokio::fs::File>,
    _artifact: TempArtifact,
}

impl ArtifactStream {
    fn new(file: tokio::fs::File, artifact: TempArtifact) -> Self {
        Self {
            inner: ReaderStream::with_capacity(file, CHUNK_SIZE),
            _artifact: artifact,
        }
    }
}

impl Stream for ArtifactStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
