//! Local-filesystem media store.
//!
//! Uploaded binaries live in a flat directory under generated object keys
//! (`{uuid}.{ext}`). Writes are write-once to a unique path, so no locking
//! is needed; deletes tolerate files that are already gone.

use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Handle to the blob directory. Constructed once at startup and injected
/// through application state.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Open the store, creating the blob directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        tracing::info!(root = %root.display(), "media store opened");
        Ok(Self { root })
    }

    /// Generate a fresh opaque object key, preserving the original file
    /// extension when it looks sane.
    pub fn generate_key(original_name: Option<&str>) -> String {
        let id = Uuid::new_v4();
        match original_name.and_then(extension_of) {
            Some(ext) => format!("{id}.{ext}"),
            None => id.to_string(),
        }
    }

    /// Write a blob under the given key.
    pub async fn save(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.object_path(key)?;
        tokio::fs::write(&path, data).await?;
        tracing::info!(key = %key, bytes = data.len(), "stored media object");
        Ok(())
    }

    /// Read a blob. `None` when no object exists under the key.
    pub async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.object_path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a blob. Removing a key that is already absent is not an error.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let path = self.object_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a key to a path inside the root, rejecting anything that
    /// could escape it.
    fn object_path(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(AppError::NotFound("media object".to_string()));
        }
        Ok(self.root.join(key))
    }
}

/// Object keys are generated names plus an optional extension; anything
/// with path separators or dot-dot segments is rejected.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.contains("..")
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

fn extension_of(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_ascii_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> MediaStore {
        let dir = tempfile::tempdir().expect("tempdir");
        // Leak the tempdir so the path outlives the handle in these tests.
        MediaStore::open(dir.into_path()).expect("open store")
    }

    #[test]
    fn test_generate_key_preserves_extension() {
        let key = MediaStore::generate_key(Some("clip.MP4"));
        assert!(key.ends_with(".mp4"));

        let key = MediaStore::generate_key(Some("no_extension"));
        assert!(!key.contains('.'));

        let key = MediaStore::generate_key(None);
        assert!(!key.contains('.'));
    }

    #[test]
    fn test_generate_key_is_unique() {
        let a = MediaStore::generate_key(Some("a.mp4"));
        let b = MediaStore::generate_key(Some("a.mp4"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_validation() {
        assert!(is_valid_key("0c32a1fe-1111-2222-3333-444455556666.mp4"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../etc/passwd"));
        assert!(!is_valid_key("a/b.mp4"));
        assert!(!is_valid_key("a\\b.mp4"));
    }

    #[tokio::test]
    async fn test_save_load_delete_round_trip() {
        let store = temp_store();
        let key = MediaStore::generate_key(Some("clip.mp4"));

        store.save(&key, b"binary video bytes").await.expect("save");
        let loaded = store.load(&key).await.expect("load");
        assert_eq!(loaded.as_deref(), Some(b"binary video bytes".as_slice()));

        store.delete(&key).await.expect("delete");
        assert!(store.load(&key).await.expect("load after delete").is_none());
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_file() {
        let store = temp_store();
        store
            .delete("00000000-0000-0000-0000-000000000000.mp4")
            .await
            .expect("deleting an absent object should succeed");
    }

    #[tokio::test]
    async fn test_load_rejects_traversal() {
        let store = temp_store();
        assert!(store.load("../outside").await.is_err());
    }
}
