//! Proxy stream strategy.
//!
//! Opens an outbound connection to the resolved media URL and relays the body
//! to the client in arrival order. No retry, no resume, no bandwidth shaping.
//!
//! If the upstream connection drops after response headers have been sent to
//! the client, the stream simply truncates; chunked responses cannot be
//! turned into an error at that point.

use futures::{StreamExt, TryStreamExt};
use tracing::debug;

use crate::error::{Error, Result};
use crate::extractor::{ExtractorError, MediaExtractor};

use super::Delivery;

/// Resolve the URL and relay the upstream body as an attachment stream.
pub async fn open_stream(
    extractor: &dyn MediaExtractor,
    client: &reqwest::Client,
    url: &str,
    format: &str,
) -> Result<Delivery> {
    let resolved = extractor.resolve(url, format).await?;
    let filename = resolved.filename();

    let media_url = resolved.media_url.ok_or(ExtractorError::NoMediaUrl)?;

    let upstream = client.get(&media_url).send().await?;

    let status = upstream.status();
    if !status.is_success() {
        return Err(Error::transfer(format!(
            "upstream media server returned status {status}"
        )));
    }

    debug!(%media_url, %filename, "relaying upstream media stream");

    let body = upstream
        .bytes_stream()
        .map_err(std::io::Error::other)
        .boxed();

    Ok(Delivery::Attachment { filename, body })
}
