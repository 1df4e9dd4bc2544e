//! Remote API boundary
//!
//! [`Backend`] is the seam between views and the book/review service. Views
//! depend only on the trait; [`ApiClient`] implements it over HTTP, tests
//! implement it in memory.

mod client;

pub use client::ApiClient;

use async_trait::async_trait;
use readwise_common::models::{
    Book, DiversifyResponse, LikeRequest, LikedPost, NewComment, NewThread,
    OnboardingSubmission, PostDetail, Profile, RecommendationPage, RecommendationRequest,
    SearchQuery, SearchResponse, Thread,
};
use readwise_common::{Identity, RefId, Result};

/// Book/review backend operations used by the client
#[async_trait]
pub trait Backend: Send + Sync {
    // Onboarding
    async fn onboard_status(&self, user: &Identity) -> Result<bool>;
    async fn complete_onboarding(&self, submission: &OnboardingSubmission) -> Result<()>;

    // Preference facets
    async fn interests(&self, user: &Identity) -> Result<Vec<String>>;
    async fn preferred_authors(&self, user: &Identity) -> Result<Vec<RefId>>;
    async fn read_list(&self, user: &Identity) -> Result<Vec<RefId>>;
    async fn liked_books(&self, user: &Identity) -> Result<Vec<RefId>>;

    // Recommendation feeds
    async fn recommend_with_reviews(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationPage>;
    async fn diversify_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<DiversifyResponse>;

    // Catalog
    async fn books_by_ids(&self, ids: &[RefId]) -> Result<Vec<Book>>;
    async fn search_books(&self, query: &SearchQuery) -> Result<SearchResponse>;
    async fn book(&self, id: &RefId) -> Result<Book>;
    async fn book_threads(&self, id: &RefId) -> Result<Vec<Thread>>;

    // Commerce
    async fn rentals(&self, user: &Identity) -> Result<Vec<Book>>;
    async fn purchases(&self, user: &Identity) -> Result<Vec<Book>>;
    async fn rent(&self, user: &Identity, book: &RefId) -> Result<()>;
    async fn purchase(&self, user: &Identity, book: &RefId) -> Result<()>;

    // Likes and comments
    async fn like_status(&self, user: &Identity, book: &RefId) -> Result<bool>;
    async fn like(&self, request: &LikeRequest) -> Result<()>;
    async fn unlike(&self, request: &LikeRequest) -> Result<()>;
    /// `scoped_id` is `<kind>_<id>`
    async fn comment_count(&self, scoped_id: &str) -> Result<u32>;
    async fn post_comment(&self, comment: &NewComment) -> Result<()>;
    /// `scoped_id` is `<kind>_<id>`
    async fn post_with_comments(&self, scoped_id: &str) -> Result<PostDetail>;
    async fn post_by_id(&self, thread_id: &str) -> Result<PostDetail>;
    async fn create_thread(&self, thread: &NewThread) -> Result<()>;

    // Profile
    async fn profile(&self, user: &Identity) -> Result<Profile>;
    async fn user_threads(&self, user: &Identity) -> Result<Vec<Thread>>;
    async fn liked_posts(&self, user: &Identity) -> Result<Vec<LikedPost>>;
    async fn book_history(&self, user: &Identity) -> Result<Vec<Book>>;
}
