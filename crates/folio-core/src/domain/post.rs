use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::timestamp;

/// Post entity - a single blog entry as persisted in the store document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Build a freshly created post. `likes` and `comments` always start empty.
    pub fn new(id: String, fields: NewPost, date: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            category: fields.category,
            tags: fields.tags,
            media: fields.media,
            date,
            likes: 0,
            comments: Vec::new(),
        }
    }

    /// Case-insensitive match against title, content, or any tag.
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    /// Overwrite every field the patch carries. `id` and `date` are not patchable.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(media) = patch.media {
            self.media = media;
        }
        if let Some(likes) = patch.likes {
            self.likes = likes;
        }
    }
}

/// Comment attached to a post. Stored and returned, never mutated by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub likes: u64,
}

/// Fields a client may supply when creating a post.
///
/// Anything else in the request body (`id`, `date`, `likes`, `comments`, unknown
/// keys) is dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub media: Vec<String>,
}

/// Allow-list of fields a client may overwrite on an existing post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub media: Option<Vec<String>>,
    pub likes: Option<u64>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// The browser gallery used `Date.now()` numbers as comment ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
