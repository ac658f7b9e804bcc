//! Blog service - the read-mutate-write cycle over a [`DocumentStore`].

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tokio::sync::Mutex;

use crate::domain::{BlogDocument, NewPost, Post, PostPatch, PostQuery};
use crate::error::{DomainError, StoreError};
use crate::ports::DocumentStore;

/// What to do when the store holds a document that cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptionPolicy {
    /// Serve an empty blog and log a warning. The next write replaces the bad file.
    #[default]
    TreatAsEmpty,
    /// Surface the failure to the caller.
    Fail,
}

impl CorruptionPolicy {
    /// Parse `empty` / `error`; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "empty" | "treat-as-empty" => Some(Self::TreatAsEmpty),
            "error" | "fail" => Some(Self::Fail),
            _ => None,
        }
    }
}

/// Blog operations over a single-document store.
///
/// Mutations are serialized through a write gate so two requests in this
/// process never interleave their read and write. Other processes writing the
/// same store are not coordinated.
pub struct BlogService {
    store: Arc<dyn DocumentStore>,
    policy: CorruptionPolicy,
    write_gate: Mutex<()>,
}

impl BlogService {
    pub fn new(store: Arc<dyn DocumentStore>, policy: CorruptionPolicy) -> Self {
        Self {
            store,
            policy,
            write_gate: Mutex::new(()),
        }
    }

    /// List posts matching `query`.
    pub async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, DomainError> {
        let document = self.load().await?;
        let posts = document.query(query);

        tracing::debug!(
            category = ?query.category,
            search = ?query.search,
            sort = query.sort.as_str(),
            matched = posts.len(),
            "Listed posts"
        );

        Ok(posts)
    }

    /// Fetch a single post by id.
    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        let document = self.load().await?;
        document
            .find(id)
            .cloned()
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Create a post. The store assigns `id` and `date`.
    pub async fn create(&self, fields: NewPost) -> Result<Post, DomainError> {
        let _guard = self.write_gate.lock().await;

        let mut document = self.load().await?;
        // Stored timestamps carry millisecond precision.
        let post = document.insert(fields, Utc::now().trunc_subsecs(3))?;
        self.save(&document).await?;

        tracing::info!(post_id = %post.id, next_id = document.next_id, "Post created");
        Ok(post)
    }

    /// Overwrite the patchable fields of an existing post.
    pub async fn update(&self, id: &str, patch: PostPatch) -> Result<Post, DomainError> {
        let _guard = self.write_gate.lock().await;

        let mut document = self.load().await?;
        let post = document
            .apply_patch(id, patch)
            .ok_or_else(|| DomainError::post_not_found(id))?;
        self.save(&document).await?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    /// Remove a post.
    pub async fn delete(&self, id: &str) -> Result<Post, DomainError> {
        let _guard = self.write_gate.lock().await;

        let mut document = self.load().await?;
        let removed = document
            .remove(id)
            .ok_or_else(|| DomainError::post_not_found(id))?;
        self.save(&document).await?;

        tracing::info!(post_id = %removed.id, "Post deleted");
        Ok(removed)
    }

    async fn load(&self) -> Result<BlogDocument, DomainError> {
        match self.store.read().await {
            Ok(document) => Ok(document),
            Err(StoreError::Missing) => Ok(BlogDocument::default()),
            Err(err) => match self.policy {
                CorruptionPolicy::TreatAsEmpty => {
                    tracing::warn!(error = %err, "Blog store unreadable, serving empty document");
                    Ok(BlogDocument::default())
                }
                CorruptionPolicy::Fail => {
                    tracing::error!(error = %err, "Blog store unreadable");
                    Err(err.into())
                }
            },
        }
    }

    async fn save(&self, document: &BlogDocument) -> Result<(), DomainError> {
        self.store.write(document).await.map_err(|err| {
            tracing::error!(error = %err, "Failed to persist blog document");
            DomainError::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    /// Store that yields between every step so concurrent callers interleave.
    #[derive(Default)]
    struct TestStore {
        document: StdMutex<Option<BlogDocument>>,
        corrupted: AtomicBool,
        fail_writes: AtomicBool,
        writes: AtomicUsize,
    }

    impl TestStore {
        fn with(document: BlogDocument) -> Self {
            let store = Self::default();
            *store.document.lock().unwrap() = Some(document);
            store
        }

        fn snapshot(&self) -> Option<BlogDocument> {
            self.document.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentStore for TestStore {
        async fn read(&self) -> Result<BlogDocument, StoreError> {
            if self.corrupted.load(Ordering::SeqCst) {
                return Err(StoreError::Corrupted("expected value at line 1".to_string()));
            }
            let document = self.snapshot();
            tokio::task::yield_now().await;
            document.ok_or(StoreError::Missing)
        }

        async fn write(&self, document: &BlogDocument) -> Result<(), StoreError> {
            tokio::task::yield_now().await;
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Io("disk full".to_string()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            *self.document.lock().unwrap() = Some(document.clone());
            Ok(())
        }
    }

    fn service(store: Arc<TestStore>) -> BlogService {
        BlogService::new(store, CorruptionPolicy::TreatAsEmpty)
    }

    fn titled(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = Arc::new(TestStore::default());
        let blog = service(store.clone());

        for expected in 1..=4u64 {
            let post = blog.create(titled("post")).await.unwrap();
            assert_eq!(post.id, expected.to_string());
            assert_eq!(post.likes, 0);
            assert!(post.comments.is_empty());
        }

        assert_eq!(store.snapshot().unwrap().next_id, 5);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_date() {
        let store = Arc::new(TestStore::default());
        let blog = service(store.clone());
        let created = blog.create(titled("before")).await.unwrap();

        let patch = PostPatch {
            title: Some("after".to_string()),
            tags: Some(vec!["rust".to_string()]),
            ..Default::default()
        };
        let updated = blog.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.title, "after");
        assert_eq!(store.snapshot().unwrap().posts[0].tags, ["rust"]);
    }

    #[tokio::test]
    async fn test_missing_post_leaves_store_untouched() {
        let store = Arc::new(TestStore::default());
        let blog = service(store.clone());
        blog.create(titled("only")).await.unwrap();
        let before = store.snapshot();

        let update = blog.update("9", PostPatch::default()).await;
        let delete = blog.delete("9").await;

        assert!(matches!(update, Err(DomainError::NotFound { .. })));
        assert!(matches!(delete, Err(DomainError::NotFound { .. })));
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_failed_write_is_not_visible() {
        let store = Arc::new(TestStore::default());
        let blog = service(store.clone());
        store.fail_writes.store(true, Ordering::SeqCst);

        let result = blog.create(titled("lost")).await;

        assert!(matches!(result, Err(DomainError::Persistence(_))));
        assert!(blog.list(&PostQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corruption_policy() {
        let store = Arc::new(TestStore::default());
        store.corrupted.store(true, Ordering::SeqCst);

        let lenient = BlogService::new(store.clone(), CorruptionPolicy::TreatAsEmpty);
        assert!(lenient.list(&PostQuery::default()).await.unwrap().is_empty());

        let strict = BlogService::new(store, CorruptionPolicy::Fail);
        let result = strict.list(&PostQuery::default()).await;
        assert!(matches!(result, Err(DomainError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut document = BlogDocument::default();
        for (i, category) in ["A", "B", "A"].into_iter().enumerate() {
            let mut fields = titled(&format!("post {i}"));
            fields.category = category.to_string();
            document.insert(fields, base + Duration::days(i as i64)).unwrap();
        }
        let blog = service(Arc::new(TestStore::with(document)));

        let query = PostQuery::from_params(Some("A".to_string()), None, Some("oldest"));
        let posts = blog.list(&query).await.unwrap();

        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[tokio::test]
    async fn test_unguarded_cycles_lose_an_update() {
        // Two raw read-mutate-write cycles against the store, interleaved.
        let store = TestStore::default();

        let mut first = store.read().await.unwrap_or_default();
        let mut second = store.read().await.unwrap_or_default();
        first.insert(titled("first"), Utc::now()).unwrap();
        second.insert(titled("second"), Utc::now()).unwrap();
        store.write(&first).await.unwrap();
        store.write(&second).await.unwrap();

        let persisted = store.snapshot().unwrap();
        assert_eq!(persisted.posts.len(), 1);
        assert_eq!(persisted.posts[0].title, "second");
        assert_eq!(persisted.next_id, 2);
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_serialized() {
        let store = Arc::new(TestStore::default());
        let blog = service(store.clone());

        let (a, b) = tokio::join!(blog.create(titled("first")), blog.create(titled("second")));

        let mut ids = vec![a.unwrap().id, b.unwrap().id];
        ids.sort();
        assert_eq!(ids, ["1", "2"]);

        let persisted = store.snapshot().unwrap();
        assert_eq!(persisted.posts.len(), 2);
        assert_eq!(persisted.next_id, 3);
    }
}
