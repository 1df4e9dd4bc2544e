//! Paginated post sequence for one feed view

use super::normalize::duplicate_ids;
use readwise_common::models::Post;
use tracing::warn;

/// Posts loaded so far plus pagination flags
///
/// `page` is the last page successfully applied (0 before the first fetch).
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedFeed {
    posts: Vec<Post>,
    page: u32,
    has_more: bool,
}

impl Default for PaginatedFeed {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            page: 0,
            has_more: true,
        }
    }
}

impl PaginatedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    /// Merge a successfully fetched page
    ///
    /// `items_received` is the number of items the server sent, before
    /// flattening. A page with no items ends pagination and leaves the posts
    /// untouched, even on a replace. Otherwise `has_more` follows the server and
    /// `batch` is merged even when every item flattened to nothing. Returns
    /// identifiers that now occur more than once.
    pub fn apply(
        &mut self,
        page: u32,
        batch: Vec<Post>,
        items_received: usize,
        has_more: bool,
        append: bool,
    ) -> Vec<String> {
        self.page = page;

        if items_received == 0 {
            self.has_more = false;
            return Vec::new();
        }

        if append {
            self.posts.extend(batch);
        } else {
            self.posts = batch;
        }
        self.has_more = has_more;

        let duplicates = duplicate_ids(&self.posts);
        if !duplicates.is_empty() {
            warn!(page, ?duplicates, "Duplicate post identifiers in feed");
        }
        duplicates
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
