//! Upload store
//!
//! Disk-backed storage for uploaded product images. Files are written under
//! a single directory and served back under the `/uploads/` public prefix.
//! Deletion is best-effort: a failure is logged, never propagated into the
//! surrounding request.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::warn;

/// Public path prefix under which stored files are served
pub const PUBLIC_PREFIX: &str = "/uploads/";

/// Marker identifying placeholder assets, which are never deleted
const PLACEHOLDER_MARKER: &str = "placeholder";

/// Disk-backed store for uploaded product images
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `dir`
    ///
    /// The directory is not touched until [`ensure_dir`](Self::ensure_dir)
    /// or [`store`](Self::store) is called.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the store directory (including parents) if absent
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// Persist an uploaded file and return its public reference
    ///
    /// The stored name joins the upload timestamp in milliseconds with the
    /// original file name, whitespace runs collapsed to hyphens, so
    /// same-named uploads do not clobber each other.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> std::io::Result<String> {
        let filename = stored_name(original_name);
        fs::write(self.dir.join(&filename), data).await?;
        Ok(format!("{}{}", PUBLIC_PREFIX, filename))
    }

    /// Best-effort removal of a previously stored file
    ///
    /// Only references into this store are touched; placeholder assets and
    /// external URLs are left alone. Failures (file already gone, missing
    /// permissions) are logged and swallowed.
    pub async fn delete(&self, reference: &str) {
        let Some(filename) = deletable_name(reference) else {
            return;
        };
        let path = self.dir.join(filename);
        if let Err(e) = fs::remove_file(&path).await {
            warn!("Failed to delete stored image {}: {}", path.display(), e);
        }
    }
}

/// File name to delete for `reference`, or `None` when the reference must
/// not be touched
fn deletable_name(reference: &str) -> Option<&str> {
    if reference.contains(PLACEHOLDER_MARKER) {
        return None;
    }
    let filename = reference.strip_prefix(PUBLIC_PREFIX)?;
    // Stored references name a bare file; anything carrying a path
    // separator did not come from this store.
    if filename.is_empty() || filename.contains(['/', '\\']) {
        return None;
    }
    Some(filename)
}

/// Generated name for a stored upload
fn stored_name(original_name: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let sanitized = original_name.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}-{}", millis, sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_stored_name_collapses_whitespace() {
        let name = stored_name("minha pizza \t nova.png");
        assert!(name.ends_with("-minha-pizza-nova.png"));
        // Timestamp prefix is numeric
        let prefix = name.split('-').next().unwrap();
        assert!(prefix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_deletable_name() {
        assert_eq!(deletable_name("/uploads/123-foto.png"), Some("123-foto.png"));
        // Placeholder assets are never deleted
        assert_eq!(deletable_name("/uploads/placeholder-pizza.png"), None);
        assert_eq!(deletable_name("/uploads/placeholder-default.png"), None);
        // External references are not ours to remove
        assert_eq!(deletable_name("https://example.com/foto.png"), None);
        assert_eq!(deletable_name(""), None);
        // References escaping the store directory are refused
        assert_eq!(deletable_name("/uploads/../segredo.txt"), None);
        assert_eq!(deletable_name("/uploads/sub/foto.png"), None);
        assert_eq!(deletable_name("/uploads/"), None);
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_reference() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = UploadStore::new(dir.path());

        let reference = store
            .store("foto da pizza.png", b"image-bytes")
            .await
            .expect("Failed to store upload");

        assert!(reference.starts_with(PUBLIC_PREFIX));
        assert!(reference.ends_with("-foto-da-pizza.png"));

        let filename = reference.strip_prefix(PUBLIC_PREFIX).unwrap();
        let content = std::fs::read(dir.path().join(filename)).expect("Stored file missing");
        assert_eq!(content, b"image-bytes");
    }

    #[tokio::test]
    async fn test_delete_removes_stored_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = UploadStore::new(dir.path());

        let reference = store
            .store("foto.png", b"bytes")
            .await
            .expect("Failed to store upload");
        let filename = reference.strip_prefix(PUBLIC_PREFIX).unwrap().to_string();
        assert!(dir.path().join(&filename).exists());

        store.delete(&reference).await;
        assert!(!dir.path().join(&filename).exists());
    }

    #[tokio::test]
    async fn test_delete_leaves_placeholder_on_disk() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = UploadStore::new(dir.path());
        std::fs::write(dir.path().join("placeholder-pizza.png"), b"png")
            .expect("Failed to create placeholder");

        store.delete("/uploads/placeholder-pizza.png").await;
        assert!(dir.path().join("placeholder-pizza.png").exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_swallowed() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = UploadStore::new(dir.path());

        // Must not panic or error out
        store.delete("/uploads/nunca-existiu.png").await;
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_missing_directories() {
        let dir = tempdir().expect("Failed to create temp dir");
        let nested = dir.path().join("data").join("uploads");
        let store = UploadStore::new(&nested);

        store.ensure_dir().await.expect("Failed to create dir");
        assert!(nested.is_dir());
    }
}
