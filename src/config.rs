//! Service configuration.
//!
//! All configuration is loaded once at startup into explicit objects that are
//! passed to the HTTP surface; there are no ambient globals.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default format hint passed to the extractor.
pub const DEFAULT_FORMAT: &str = "best";

/// Default location of the optional frontend asset served at `/`.
const DEFAULT_INDEX_PAGE: &str = "static/index.html";

/// How resolved media is delivered to the caller. Selected once per
/// deployment; `/download` never varies its contract per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    /// Download to temporary storage, stream to the client, delete the file.
    #[default]
    LocalDownload,
    /// Return the resolved direct media URL as JSON without moving bytes.
    DirectLink,
    /// Relay bytes from the resolved media URL as they arrive.
    ProxyStream,
}

impl FromStr for TransferMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "download" | "local" => Ok(Self::LocalDownload),
            "link" | "direct" => Ok(Self::DirectLink),
            "proxy" => Ok(Self::ProxyStream),
            other => Err(Error::config(format!(
                "unknown transfer mode '{other}' (expected 'download', 'link' or 'proxy')"
            ))),
        }
    }
}

/// Service-level configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Transfer strategy used by `/download`.
    pub transfer_mode: TransferMode,
    /// Directory for per-request temporary artifacts.
    pub temp_dir: PathBuf,
    /// Optional HTML asset served at `/`.
    pub index_page: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            transfer_mode: TransferMode::default(),
            temp_dir: std::env::temp_dir(),
            index_page: PathBuf::from(DEFAULT_INDEX_PAGE),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    ///
    /// Supported env vars:
    /// - `TRANSFER_MODE` ("download", "link", or "proxy")
    /// - `TEMP_DIR` (defaults to the OS temp directory)
    /// - `INDEX_PAGE` (defaults to "static/index.html")
    ///
    /// An unrecognized `TRANSFER_MODE` is a startup error rather than a
    /// silent fallback.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(mode) = std::env::var("TRANSFER_MODE")
            && !mode.trim().is_empty()
        {
            config.transfer_mode = mode.parse()?;
        }

        if let Ok(dir) = std::env::var("TEMP_DIR")
            && !dir.trim().is_empty()
        {
            config.temp_dir = PathBuf::from(dir);
        }

        if let Ok(page) = std::env::var("INDEX_PAGE")
            && !page.trim().is_empty()
        {
            config.index_page = PathBuf::from(page);
        }

        Ok(config)
    }
}
