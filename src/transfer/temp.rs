//! Per-request temporary artifacts.
//!
//! Every local download gets a random hex token used as its filename prefix,
//! so concurrent requests never collide in the shared temp directory. The
//! artifact is removed on every exit path, including client disconnect.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Random bytes per token; 16 hex chars is plenty against collisions.
const TOKEN_BYTES: usize = 8;

/// Generate a fresh request token.
pub fn generate_token() -> String {
    use rand::Rng;
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Find the file produced for a token by scanning the temp directory.
///
/// The final extension is not known in advance because container negotiation
/// happens inside the extraction tool, so the lookup is prefix-based.
pub async fn find_by_token(dir: &Path, token: &str) -> std::io::Result<Option<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };

        if name.starts_with(token) && entry.file_type().await?.is_file() {
            return Ok(Some(entry.path()));
        }
    }

    Ok(None)
}

/// A temporary file owned by exactly one request.
///
/// Dropping the artifact deletes the file. Response bodies hold their
/// artifact for the lifetime of the stream, so cleanup runs whether the
/// stream completes, errors, or is cancelled mid-transfer.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed temporary artifact"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to remove temporary artifact")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc123.mp4");
        std::fs::write(&path, b"data").unwrap();

        let artifact = TempArtifact::new(path.clone());
        assert!(path.exists());
        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("already-gone.mp4");
        let artifact = TempArtifact::new(path);
        drop(artifact); // must not panic
    }

    #[tokio::test]
    async fn test_find_by_token() {
        let dir = tempfile::tempdir().unwrap();
        let token = generate_token();
        let expected = dir.path().join(format!("{token}.webm"));
        std::fs::write(&expected, b"x").unwrap();
        std::fs::write(dir.path().join("other.mp4"), b"y").unwrap();

        let found = find_by_token(dir.path(), &token).await.unwrap();
        assert_eq!(found, Some(expected));
    }

    #[tokio::test]
    async fn test_find_by_token_missing() {
        let dir = tempfile::tempdir().unwrap();
        let found = find_by_token(dir.path(), "deadbeef00000000").await.unwrap();
        assert!(found.is_none());
    }
}
