use async_trait::async_trait;

use crate::domain::BlogDocument;
use crate::error::StoreError;

/// Storage for the whole blog document - read and rewritten wholesale.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the persisted document.
    ///
    /// Implementations must not guess: a missing document is `StoreError::Missing`,
    /// unparseable content is `StoreError::Corrupted`.
    async fn read(&self) -> Result<BlogDocument, StoreError>;

    /// Replace the persisted document.
    async fn write(&self, document: &BlogDocument) -> Result<(), StoreError>;
}
