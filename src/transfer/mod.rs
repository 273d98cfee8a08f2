//! Transfer strategies.
//!
//! Each strategy turns a client URL into a [`Delivery`]: either a byte stream
//! served as an attachment or a JSON direct link. The strategy is picked once
//! per deployment via [`crate::config::TransferMode`].

pub mod direct;
pub mod local;
pub mod proxy;
pub mod temp;

use bytes::Bytes;
use futures::stream::BoxStream;

/// Chunk size for reading local artifacts.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Outcome of a transfer strategy, modeled explicitly so the HTTP surface
/// never guesses which response shape it is building.
pub enum Delivery {
    /// A byte stream served with `Content-Disposition: attachment`.
    ///
    /// Bytes are delivered in the order read from the source; dropping the
    /// stream (completion, error, or client disconnect) releases any
    /// temporary resources behind it.
    Attachment {
        filename: String,
        body: BoxStream<'static, std::io::Result<Bytes>>,
    },
    /// A resolved direct media URL, returned without transferring bytes.
    DirectLink {
        download_url: String,
        filename: String,
    },
}

impl std::fmt::Debug for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delivery::Attachment { filename, .. } => f
                .debug_struct("Attachment")
                .field("filename", filename)
                .finish_non_exhaustive(),
            Delivery::DirectLink {
                download_url,
                filename,
            } => f
                .debug_struct("DirectLink")
                .field("download_url", download_url)
                .field("filename", filename)
                .finish(),
        }
    }
}
