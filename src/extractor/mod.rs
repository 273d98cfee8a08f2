//! Media extraction adapter.
//!
//! All site-specific parsing, format negotiation, and media URL resolution is
//! delegated to an external extraction tool. This module defines the seam the
//! rest of the gateway programs against, plus the `yt-dlp` implementation.

pub mod ytdlp;

use async_trait::async_trait;
use thiserror::Error;

use crate::utils::filename::sanitize_filename;

pub use ytdlp::YtDlpExtractor;

/// Fallback extension when the extractor does not report one.
pub const FALLBACK_EXT: &str = "mp4";

/// Fallback title when the extractor does not report one.
pub const FALLBACK_TITLE: &str = "video";

/// Errors from the extraction adapter.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// The tool could not identify or resolve a video at the given URL.
    #[error("unable to resolve url: {0}")]
    NotFound(String),
    #[error("extractor failed: {0}")]
    CommandFailed(String),
    #[error("invalid extractor output: {0}")]
    InvalidOutput(#[from] serde_json::Error),
    #[error("extractor reported no direct media url")]
    NoMediaUrl,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Metadata resolved for a single request. Never cached or shared.
#[derive(Debug, Clone)]
pub struct ResolvedMedia {
    pub title: String,
    /// Container extension, when the extractor reports one.
    pub ext: Option<String>,
    /// Direct remote media URL, when the extractor reports one.
    pub media_url: Option<String>,
}

impl ResolvedMedia {
    /// Extension used for the derived filename.
    pub fn extension(&self) -> &str {
        self.ext.as_deref().filter(|e| !e.is_empty()).unwrap_or(FALLBACK_EXT)
    }

    /// Derive the attachment filename from the resolved title and extension.
    pub fn filename(&self) -> String {
        format!("{}.{}", sanitize_filename(&self.title), self.extension())
    }
}

/// External video-metadata-and-media-resolution capability.
///
/// Input URLs are passed through without scheme/host validation; the
/// extraction tool is trusted to reject malformed input.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Resolve metadata and a direct media URL without downloading anything.
    async fn resolve(&self, url: &str, format: &str) -> Result<ResolvedMedia, ExtractorError>;

    /// Download the media to disk using the given output template.
    ///
    /// The template may contain extractor placeholders (e.g. `%(ext)s`), so
    /// the final on-disk name is only known after the download completes.
    async fn download(
        &self,
        url: &str,
        format: &str,
        output_template: &str,
    ) -> Result<(), ExtractorError>;
}
