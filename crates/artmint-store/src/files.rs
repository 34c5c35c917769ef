//! Filesystem persistence for image bytes
//!
//! Files are named after the token id, not the content hash: two mint
//! attempts racing on identical content each get a stable file name up
//! to the point one of them loses on the uniqueness constraint. The
//! loser's file is orphaned, which is harmless; only a missing asset
//! row would matter.

use std::fs;
use std::path::{Path, PathBuf};

use artmint_core::TokenId;
use tracing::debug;

use crate::error::StoreError;

/// Where a saved image ended up
#[derive(Debug, Clone)]
pub struct SavedImage {
    /// Absolute path on disk
    pub path: PathBuf,
    /// The locator recorded on the asset row and in metadata
    pub url: String,
}

/// Flat-directory image store
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create an image store rooted at the given uploads directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Persist image bytes under `<token_id>.png`
    pub fn save(&self, token_id: TokenId, bytes: &[u8]) -> Result<SavedImage, StoreError> {
        fs::create_dir_all(&self.root)?;

        let filename = format!("{}.png", token_id);
        let path = self.root.join(&filename);
        fs::write(&path, bytes)?;
        debug!(?path, size = bytes.len(), "image persisted");

        Ok(SavedImage {
            path,
            url: format!("/uploads/{}", filename),
        })
    }

    /// Path an already-saved token's image lives at
    pub fn path_for(&self, token_id: TokenId) -> PathBuf {
        self.root.join(format!("{}.png", token_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_writes_bytes_under_token_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let token = TokenId::generate();

        let saved = store.save(token, b"not really a png").unwrap();
        assert_eq!(saved.url, format!("/uploads/{}.png", token));
        assert_eq!(saved.path, store.path_for(token));
        assert_eq!(fs::read(&saved.path).unwrap(), b"not really a png");
    }

    #[test]
    fn test_save_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("nested").join("uploads"));
        let token = TokenId::generate();
        assert!(store.save(token, b"x").is_ok());
    }
}
