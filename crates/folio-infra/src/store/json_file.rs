//! JSON file store - the whole blog document in one pretty-printed file.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use folio_core::domain::BlogDocument;
use folio_core::error::StoreError;
use folio_core::ports::DocumentStore;

/// Document store backed by a single JSON file.
///
/// Writes go to a sibling temp file first and are renamed over the target, so
/// an interrupted write leaves the previous document intact.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "blog-posts.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn read(&self) -> Result<BlogDocument, StoreError> {
        let bytes = fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::Missing,
            _ => StoreError::Io(e.to_string()),
        })?;

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupted(e.to_string()))
    }

    async fn write(&self, document: &BlogDocument) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec_pretty(document).map_err(|e| StoreError::Io(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, &bytes)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::debug!(
            path = %self.path.display(),
            posts = document.posts.len(),
            bytes = bytes.len(),
            "Blog document written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use folio_core::domain::NewPost;

    fn document() -> BlogDocument {
        let mut doc = BlogDocument::default();
        doc.insert(
            NewPost {
                title: "Hello".to_string(),
                content: "First post".to_string(),
                category: "news".to_string(),
                tags: vec!["intro".to_string()],
                media: vec!["/media/hello.png".to_string()],
            },
            Utc.with_ymd_and_hms(2025, 2, 14, 9, 30, 0).unwrap(),
        )
        .unwrap();
        doc
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("blog-posts.json"));
        let doc = document();

        store.write(&doc).await.unwrap();
        let read = store.read().await.unwrap();

        assert_eq!(read, doc);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        assert!(matches!(store.read().await, Err(StoreError::Missing)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog-posts.json");
        std::fs::write(&path, "{ \"posts\": [ oops").unwrap();

        let store = JsonFileStore::new(&path);

        assert!(matches!(store.read().await, Err(StoreError::Corrupted(_))));
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_with_next_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("blog-posts.json");
        let store = JsonFileStore::new(&path);

        store.write(&document()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("{\n  \"posts\": ["));
        assert!(raw.contains("\"nextId\": 2"));
        assert!(!dir.path().join("nested").join("blog-posts.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_into_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let store = JsonFileStore::new(blocker.join("blog-posts.json"));

        assert!(matches!(
            store.write(&BlogDocument::default()).await,
            Err(StoreError::Io(_))
        ));
    }
}
