//! `yt-dlp` subprocess extractor.
//!
//! Runs the native `yt-dlp` binary through `tokio::process`, so extraction
//! never blocks other in-flight requests.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use super::{ExtractorError, FALLBACK_TITLE, MediaExtractor, ResolvedMedia};

/// Well-known install locations, checked before falling back to `PATH`.
const BINARY_CANDIDATES: &[&str] = &[
    "/opt/homebrew/bin/yt-dlp",
    "/usr/local/bin/yt-dlp",
    "/usr/bin/yt-dlp",
];

/// Socket timeout passed to the tool, in seconds.
const SOCKET_TIMEOUT_SECS: u32 = 30;

/// stderr fragments that mean the URL could not be resolved to a video,
/// as opposed to an unexpected tool failure.
const NOT_FOUND_MARKERS: &[&str] = &[
    "unsupported url",
    "is not a valid url",
    "video unavailable",
    "unable to extract",
    "http error 404",
    "404 not found",
    "no video found",
    "this video is not available",
];

/// Subset of the tool's `--dump-json` output the gateway cares about.
#[derive(Debug, Deserialize)]
struct YtDlpInfo {
    title: Option<String>,
    ext: Option<String>,
    url: Option<String>,
}

/// Extractor backed by the `yt-dlp` binary.
pub struct YtDlpExtractor {
    binary: PathBuf,
}

impl YtDlpExtractor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build an extractor from `YTDLP_PATH`, falling back to discovery.
    pub fn from_env() -> Self {
        match std::env::var("YTDLP_PATH") {
            Ok(path) if !path.trim().is_empty() => Self::new(path.trim()),
            _ => Self::new(Self::discover()),
        }
    }

    /// Find the binary in well-known locations, else rely on `PATH`.
    fn discover() -> PathBuf {
        for candidate in BINARY_CANDIDATES {
            if Path::new(candidate).exists() {
                return PathBuf::from(candidate);
            }
        }
        PathBuf::from("yt-dlp")
    }

    async fn run(&self, args: &[&str]) -> Result<String, ExtractorError> {
        debug!(binary = %self.binary.display(), ?args, "running extractor");

        let output = Command::new(&self.binary)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(classify_failure(&stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn resolve(&self, url: &str, format: &str) -> Result<ResolvedMedia, ExtractorError> {
        let timeout = SOCKET_TIMEOUT_SECS.to_string();
        let stdout = self
            .run(&[
                "--dump-json",
                "--no-playlist",
                "--no-warnings",
                "--socket-timeout",
                &timeout,
                "-f",
                format,
                url,
            ])
            .await?;

        let info: YtDlpInfo = serde_json::from_str(stdout.trim())?;

        Ok(ResolvedMedia {
            title: info
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            ext: info.ext,
            media_url: info.url,
        })
    }

    async fn download(
        &self,
        url: &str,
        format: &str,
        output_template: &str,
    ) -> Result<(), ExtractorError> {
        let timeout = SOCKET_TIMEOUT_SECS.to_string();
        self.run(&[
            "-f",
            format,
            "-o",
            output_template,
            "--no-playlist",
            "--no-warnings",
            "--quiet",
            "--socket-timeout",
            &timeout,
            "--merge-output-format",
            "mp4",
            url,
        ])
        .await?;

        Ok(())
    }
}

/// Classify a failed run from its stderr diagnostics.
///
/// An unresolvable URL is a client error (404 at the HTTP surface); anything
/// else is reported as an internal extractor failure. The diagnostic text is
/// kept so the caller sees the underlying reason.
fn classify_failure(stderr: &str) -> ExtractorError {
    let diagnostic = stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with("ERROR:"))
        .unwrap_or_else(|| stderr.trim())
        .to_string();

    let lower = stderr.to_lowercase();
    if NOT_FOUND_MARKERS.iter().any(|m| lower.contains(m)) {
        ExtractorError::NotFound(diagnostic)
    } else {
        ExtractorError::CommandFailed(diagnostic)
    }
}
