//! Domain entities - the blog document and the posts it holds.

mod document;
mod post;
mod query;

pub mod timestamp;

pub use document::BlogDocument;
pub use post::{Comment, NewPost, Post, PostPatch};
pub use query::{PostQuery, SortOrder};
