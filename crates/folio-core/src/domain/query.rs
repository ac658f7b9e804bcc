use std::cmp::Reverse;

use super::Post;

/// Ordering applied to list results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Popular,
}

impl SortOrder {
    /// Unknown values fall back to `Newest`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "oldest" => Self::Oldest,
            "popular" => Self::Popular,
            _ => Self::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Popular => "popular",
        }
    }

    /// Stable sort, so equal keys keep document order.
    pub fn sort(&self, posts: &mut [Post]) {
        match self {
            Self::Newest => posts.sort_by_key(|p| Reverse(p.date)),
            Self::Oldest => posts.sort_by_key(|p| p.date),
            Self::Popular => posts.sort_by_key(|p| Reverse(p.likes)),
        }
    }
}

/// Filters and ordering for listing posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl PostQuery {
    /// Build a query from raw request parameters. Empty strings count as absent.
    pub fn from_params(
        category: Option<String>,
        search: Option<String>,
        sort: Option<&str>,
    ) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()),
            search: search.filter(|s| !s.is_empty()),
            sort: sort.map(SortOrder::parse).unwrap_or_default(),
        }
    }

    /// Category filter, then text search, then sort.
    pub fn apply(&self, posts: &[Post]) -> Vec<Post> {
        let needle = self.search.as_deref().map(str::to_lowercase);

        let mut matched: Vec<Post> = posts
            .iter()
            .filter(|p| self.category.as_ref().is_none_or(|c| &p.category == c))
            .filter(|p| needle.as_deref().is_none_or(|n| p.matches_search(n)))
            .cloned()
            .collect();

        self.sort.sort(&mut matched);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, category: &str, day: u32, likes: u64) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {id}"),
            content: String::new(),
            category: category.to_string(),
            tags: vec![],
            media: vec![],
            date: Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
            likes,
            comments: vec![],
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(SortOrder::parse("oldest"), SortOrder::Oldest);
        assert_eq!(SortOrder::parse("popular"), SortOrder::Popular);
        assert_eq!(SortOrder::parse("newest"), SortOrder::Newest);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Newest);
    }

    #[test]
    fn test_sort_orders() {
        let posts = vec![post("1", "a", 2, 5), post("2", "a", 3, 1), post("3", "a", 1, 9)];

        let newest = PostQuery::default().apply(&posts);
        assert_eq!(ids(&newest), ["2", "1", "3"]);

        let oldest = PostQuery::from_params(None, None, Some("oldest")).apply(&posts);
        assert_eq!(ids(&oldest), ["3", "1", "2"]);

        let popular = PostQuery::from_params(None, None, Some("popular")).apply(&posts);
        assert_eq!(ids(&popular), ["3", "1", "2"]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let posts = vec![post("1", "A", 1, 0), post("2", "B", 2, 0), post("3", "a", 3, 0)];

        let result = PostQuery::from_params(Some("A".to_string()), None, None).apply(&posts);

        assert_eq!(ids(&result), ["1"]);
    }

    #[test]
    fn test_empty_params_are_ignored() {
        let posts = vec![post("1", "A", 1, 0), post("2", "B", 2, 0)];

        let query = PostQuery::from_params(Some(String::new()), Some(String::new()), Some(""));

        assert_eq!(query, PostQuery::default());
        assert_eq!(query.apply(&posts).len(), 2);
    }
}
