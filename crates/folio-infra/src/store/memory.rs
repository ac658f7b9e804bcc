//! In-memory document store - used when no data path is configured and in tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use folio_core::domain::BlogDocument;
use folio_core::error::StoreError;
use folio_core::ports::DocumentStore;

/// In-memory store holding the document behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryDocumentStore {
    document: RwLock<Option<BlogDocument>>,
    corrupted: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::from_option(None)
    }

    /// Start from an existing document.
    pub fn with_document(document: BlogDocument) -> Self {
        Self::from_option(Some(document))
    }

    fn from_option(document: Option<BlogDocument>) -> Self {
        Self {
            document: RwLock::new(document),
            corrupted: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent reads report a corrupted document.
    pub fn set_corrupted(&self, corrupted: bool) {
        self.corrupted.store(corrupted, Ordering::SeqCst);
    }

    /// Make subsequent writes fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current document, bypassing failure switches.
    pub async fn snapshot(&self) -> Option<BlogDocument> {
        self.document.read().await.clone()
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn read(&self) -> Result<BlogDocument, StoreError> {
        if self.corrupted.load(Ordering::SeqCst) {
            return Err(StoreError::Corrupted("simulated corruption".to_string()));
        }

        self.document.read().await.clone().ok_or(StoreError::Missing)
    }

    async fn write(&self, document: &BlogDocument) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io("simulated write failure".to_string()));
        }

        *self.document.write().await = Some(document.clone());
        Ok(())
    }
}
