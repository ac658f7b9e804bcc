use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NewPost, Post, PostPatch, PostQuery};
use crate::error::DomainError;

/// The persisted unit: every post plus the id counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDocument {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default = "first_id")]
    pub next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Default for BlogDocument {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            next_id: first_id(),
        }
    }
}

impl BlogDocument {
    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn query(&self, query: &PostQuery) -> Vec<Post> {
        query.apply(&self.posts)
    }

    /// Append a new post, assigning the next id and bumping the counter.
    ///
    /// Fails without touching the document once the id counter cannot advance.
    pub fn insert(&mut self, fields: NewPost, now: DateTime<Utc>) -> Result<Post, DomainError> {
        // A hand-edited file may carry ids at or past the counter.
        let floor = match self.max_numeric_id() {
            Some(max) => max.checked_add(1).ok_or_else(ids_exhausted)?,
            None => first_id(),
        };
        let id = self.next_id.max(floor);
        let next_id = id.checked_add(1).ok_or_else(ids_exhausted)?;

        let post = Post::new(id.to_string(), fields, now);
        self.next_id = next_id;
        self.posts.push(post.clone());
        Ok(post)
    }

    /// Patch the post with `id` in place, returning its new state.
    pub fn apply_patch(&mut self, id: &str, patch: PostPatch) -> Option<Post> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.apply(patch);
        Some(post.clone())
    }

    pub fn remove(&mut self, id: &str) -> Option<Post> {
        let index = self.posts.iter().position(|p| p.id == id)?;
        Some(self.posts.remove(index))
    }

    fn max_numeric_id(&self) -> Option<u64> {
        self.posts.iter().filter_map(|p| p.id.parse().ok()).max()
    }
}

fn ids_exhausted() -> DomainError {
    DomainError::Persistence("post id counter exhausted".to_string())
}
