//! Page fetch: preference facets, combined recommendation request, flatten

use super::normalize::flatten;
use crate::api::Backend;
use readwise_common::models::{Post, PreferenceFacets, RecommendationRequest};
use readwise_common::{Identity, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Read the four preference facets for an identity
///
/// The reads are independent and run concurrently; the first failure aborts
/// the whole gather.
pub async fn gather_facets(backend: &dyn Backend, user: &Identity) -> Result<PreferenceFacets> {
    let (interests, preferred_authors, read_books, liked_books) = tokio::try_join!(
        backend.interests(user),
        backend.preferred_authors(user),
        backend.read_list(user),
        backend.liked_books(user),
    )?;

    debug!(
        user_id = %user,
        interests = interests.len(),
        preferred_authors = preferred_authors.len(),
        read_books = read_books.len(),
        liked_books = liked_books.len(),
        "Gathered preference facets"
    );

    Ok(PreferenceFacets {
        interests,
        preferred_authors,
        read_books,
        liked_books,
    })
}

/// One fetched and flattened page
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub page: u32,
    pub posts: Vec<Post>,
    /// Items the server sent, before flattening
    pub items_received: usize,
    pub has_more: bool,
    pub total: u64,
    pub skipped_items: usize,
}

/// Recommendation feed fetcher for the home view
#[derive(Clone)]
pub struct FeedPipeline {
    backend: Arc<dyn Backend>,
    page_size: u32,
}

impl FeedPipeline {
    pub fn new(backend: Arc<dyn Backend>, page_size: u32) -> Self {
        Self { backend, page_size }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch one page for `user`
    ///
    /// The recommendation request is only issued once all four facet reads
    /// have succeeded. No state is touched here; callers merge the result.
    pub async fn fetch_page(&self, user: &Identity, page: u32) -> Result<FetchedPage> {
        let facets = gather_facets(self.backend.as_ref(), user).await?;
        let request = RecommendationRequest::new(user.as_str(), facets, page, self.page_size);

        let response = self.backend.recommend_with_reviews(&request).await?;
        let item_count = response.recommended.len();
        let has_more = response.is_next;
        let normalized = flatten(response.recommended);

        info!(
            user_id = %user,
            page,
            items = item_count,
            posts = normalized.posts.len(),
            skipped = normalized.skipped_items,
            has_more,
            "Fetched recommendation page"
        );

        Ok(FetchedPage {
            page,
            posts: normalized.posts,
            items_received: item_count,
            has_more,
            total: response.total_recommendations,
            skipped_items: normalized.skipped_items,
        })
    }
}
