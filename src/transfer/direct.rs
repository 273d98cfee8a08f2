//! Direct link strategy.
//!
//! Resolves the media URL and hands it straight back to the caller. No bytes
//! move through the gateway.
//!
//! Known limitation: the returned URL may be short-lived, geo-restricted, or
//! require headers/cookies the original page request had. The gateway makes
//! no guarantee that the link stays valid or is reachable by arbitrary
//! clients.

use crate::error::Result;
use crate::extractor::{ExtractorError, MediaExtractor};

use super::Delivery;

/// Resolve the URL and return it as a JSON direct link.
pub async fn resolve_link(
    extractor: &dyn MediaExtractor,
    url: &str,
    format: &str,
) -> Result<Delivery> {
    let resolved = extractor.resolve(url, format).await?;
    let filename = resolved.filename();

    let download_url = resolved.media_url.ok_or(ExtractorError::NoMediaUrl)?;

    Ok(Delivery::DirectLink {
        download_url,
        filename,
    })
}
