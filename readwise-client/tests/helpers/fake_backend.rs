//! In-memory `Backend` with call recording and failure injection

use async_trait::async_trait;
use readwise_client::Backend;
use readwise_common::models::{
    Book, DiversifyResponse, LikeRequest, LikedPost, NewComment, NewThread,
    OnboardingSubmission, PostDetail, PreferenceFacets, Profile, RecommendationPage,
    RecommendationRequest, SearchQuery, SearchResponse, Thread,
};
use readwise_common::{Error, Identity, RefId, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

/// Injected failure for one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Network,
    Status(u16),
}

impl Failure {
    fn to_error(self) -> Error {
        match self {
            Failure::Network => Error::Network("connection refused".to_string()),
            Failure::Status(status) => Error::Http {
                status,
                message: "injected".to_string(),
            },
        }
    }
}

#[derive(Default)]
struct FakeState {
    calls: Vec<String>,
    failures: HashMap<&'static str, Failure>,
    onboarded: bool,
    facets: PreferenceFacets,
    pages: HashMap<u32, Value>,
    diversify: HashMap<u32, Value>,
    books: Vec<Book>,
    search_total: u64,
    liked: bool,
    comment_counts: HashMap<String, u32>,
    details: HashMap<String, Value>,
    submissions: Vec<OnboardingSubmission>,
    recommendation_requests: Vec<RecommendationRequest>,
    like_requests: Vec<(bool, LikeRequest)>,
    comments: Vec<NewComment>,
    threads: Vec<NewThread>,
    search_queries: Vec<SearchQuery>,
}

/// Scriptable backend for view and flow tests
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
    recommend_gate: Arc<Mutex<Option<Arc<Notify>>>>,
    like_gate: Arc<Mutex<Option<Arc<Notify>>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Record a call and return its injected failure, if any
    fn record(&self, endpoint: &'static str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(endpoint.to_string());
        match state.failures.get(endpoint) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Scripting
    // ========================================================================

    pub fn onboarded(self, onboarded: bool) -> Self {
        self.lock().onboarded = onboarded;
        self
    }

    pub fn with_facets(self, facets: PreferenceFacets) -> Self {
        self.lock().facets = facets;
        self
    }

    /// Raw JSON response for `recommend_with_reviews` at `page`
    pub fn with_page(self, page: u32, body: Value) -> Self {
        self.lock().pages.insert(page, body);
        self
    }

    /// Raw JSON response for `diversify_recommendations` at `page`
    pub fn with_diversify(self, page: u32, body: Value) -> Self {
        self.lock().diversify.insert(page, body);
        self
    }

    pub fn with_books(self, books: Value) -> Self {
        self.lock().books = serde_json::from_value(books).unwrap();
        self
    }

    pub fn with_search_total(self, total: u64) -> Self {
        self.lock().search_total = total;
        self
    }

    pub fn with_liked(self, liked: bool) -> Self {
        self.lock().liked = liked;
        self
    }

    pub fn with_comment_count(self, scoped_id: &str, count: u32) -> Self {
        self.lock().comment_counts.insert(scoped_id.to_string(), count);
        self
    }

    pub fn with_detail(self, scoped_id: &str, body: Value) -> Self {
        self.lock().details.insert(scoped_id.to_string(), body);
        self
    }

    pub fn fail(&self, endpoint: &'static str, failure: Failure) {
        self.lock().failures.insert(endpoint, failure);
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.lock().failures.remove(endpoint);
    }

    /// Make `recommend_with_reviews` wait until the returned handle is notified
    pub fn gate_recommendations(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.recommend_gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    /// Make like/unlike wait until the returned handle is notified
    pub fn gate_likes(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.like_gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.lock().calls.iter().filter(|c| *c == endpoint).count()
    }

    pub fn submissions(&self) -> Vec<OnboardingSubmission> {
        self.lock().submissions.clone()
    }

    pub fn recommendation_requests(&self) -> Vec<RecommendationRequest> {
        self.lock().recommendation_requests.clone()
    }

    pub fn like_requests(&self) -> Vec<(bool, LikeRequest)> {
        self.lock().like_requests.clone()
    }

    pub fn comments(&self) -> Vec<NewComment> {
        self.lock().comments.clone()
    }

    pub fn search_queries(&self) -> Vec<SearchQuery> {
        self.lock().search_queries.clone()
    }

    fn gate(slot: &Mutex<Option<Arc<Notify>>>) -> Option<Arc<Notify>> {
        slot.lock().unwrap().clone()
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::MalformedResponse(e.to_string()))
}

#[async_trait]
impl Backend for FakeBackend {
    async fn onboard_status(&self, _user: &Identity) -> Result<bool> {
        self.record("onboard_status")?;
        Ok(self.lock().onboarded)
    }

    async fn complete_onboarding(&self, submission: &OnboardingSubmission) -> Result<()> {
        self.record("complete_onboarding")?;
        let mut state = self.lock();
        state.submissions.push(submission.clone());
        state.onboarded = true;
        Ok(())
    }

    async fn interests(&self, _user: &Identity) -> Result<Vec<String>> {
        self.record("interests")?;
        Ok(self.lock().facets.interests.clone())
    }

    async fn preferred_authors(&self, _user: &Identity) -> Result<Vec<RefId>> {
        self.record("preferred_authors")?;
        Ok(self.lock().facets.preferred_authors.clone())
    }

    async fn read_list(&self, _user: &Identity) -> Result<Vec<RefId>> {
        self.record("read_list")?;
        Ok(self.lock().facets.read_books.clone())
    }

    async fn liked_books(&self, _user: &Identity) -> Result<Vec<RefId>> {
        self.record("liked_books")?;
        Ok(self.lock().facets.liked_books.clone())
    }

    async fn recommend_with_reviews(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationPage> {
        self.record("recommend_with_reviews")?;
        let body = {
            let mut state = self.lock();
            state.recommendation_requests.push(request.clone());
            state.pages.get(&request.page_number).cloned()
        };
        if let Some(gate) = Self::gate(&self.recommend_gate) {
            gate.notified().await;
        }
        // Failure may be injected while the request waits at the gate
        if let Some(failure) = self.lock().failures.get("recommend_with_reviews") {
            return Err(failure.to_error());
        }
        match body {
            Some(body) => decode(body),
            None => Ok(RecommendationPage {
                recommended: Vec::new(),
                is_next: false,
                total_recommendations: 0,
                page: request.page_number,
                page_size: request.page_size,
            }),
        }
    }

    async fn diversify_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<DiversifyResponse> {
        self.record("diversify_recommendations")?;
        let body = self.lock().diversify.get(&request.page_number).cloned();
        match body {
            Some(body) => decode(body),
            None => Ok(DiversifyResponse::Message {
                message: "No recommendations available".to_string(),
            }),
        }
    }

    async fn books_by_ids(&self, ids: &[RefId]) -> Result<Vec<Book>> {
        self.record("books_by_ids")?;
        let state = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.books.iter().find(|b| b.book_id.same_as(id)).cloned())
            .collect())
    }

    async fn search_books(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.record("search_books")?;
        let mut state = self.lock();
        state.search_queries.push(query.clone());
        let start = ((query.page.saturating_sub(1)) * query.limit) as usize;
        let books = state
            .books
            .iter()
            .skip(start)
            .take(query.limit as usize)
            .cloned()
            .collect();
        Ok(SearchResponse {
            books,
            total: state.search_total,
        })
    }

    async fn book(&self, id: &RefId) -> Result<Book> {
        self.record("book")?;
        self.lock()
            .books
            .iter()
            .find(|b| b.book_id.same_as(id))
            .cloned()
            .ok_or(Error::Http {
                status: 404,
                message: "Book not found".to_string(),
            })
    }

    async fn book_threads(&self, _id: &RefId) -> Result<Vec<Thread>> {
        self.record("book_threads")?;
        Ok(Vec::new())
    }

    async fn rentals(&self, _user: &Identity) -> Result<Vec<Book>> {
        self.record("rentals")?;
        Ok(Vec::new())
    }

    async fn purchases(&self, _user: &Identity) -> Result<Vec<Book>> {
        self.record("purchases")?;
        Ok(Vec::new())
    }

    async fn rent(&self, _user: &Identity, _book: &RefId) -> Result<()> {
        self.record("rent")
    }

    async fn purchase(&self, _user: &Identity, _book: &RefId) -> Result<()> {
        self.record("purchase")
    }

    async fn like_status(&self, _user: &Identity, _book: &RefId) -> Result<bool> {
        self.record("like_status")?;
        Ok(self.lock().liked)
    }

    async fn like(&self, request: &LikeRequest) -> Result<()> {
        self.lock().like_requests.push((true, request.clone()));
        if let Some(gate) = Self::gate(&self.like_gate) {
            gate.notified().await;
        }
        self.record("like")
    }

    async fn unlike(&self, request: &LikeRequest) -> Result<()> {
        self.lock().like_requests.push((false, request.clone()));
        if let Some(gate) = Self::gate(&self.like_gate) {
            gate.notified().await;
        }
        self.record("unlike")
    }

    async fn comment_count(&self, scoped_id: &str) -> Result<u32> {
        self.record("comment_count")?;
        Ok(self
            .lock()
            .comment_counts
            .get(scoped_id)
            .copied()
            .unwrap_or_default())
    }

    async fn post_comment(&self, comment: &NewComment) -> Result<()> {
        self.record("post_comment")?;
        self.lock().comments.push(comment.clone());
        Ok(())
    }

    async fn post_with_comments(&self, scoped_id: &str) -> Result<PostDetail> {
        self.record("post_with_comments")?;
        let body = self.lock().details.get(scoped_id).cloned();
        match body {
            Some(body) => decode(body),
            None => Err(Error::Http {
                status: 404,
                message: "Post not found".to_string(),
            }),
        }
    }

    async fn post_by_id(&self, thread_id: &str) -> Result<PostDetail> {
        self.record("post_by_id")?;
        let body = self.lock().details.get(thread_id).cloned();
        body.map(decode).unwrap_or(Err(Error::Http {
            status: 404,
            message: "Post not found".to_string(),
        }))
    }

    async fn create_thread(&self, thread: &NewThread) -> Result<()> {
        self.record("create_thread")?;
        self.lock().threads.push(thread.clone());
        Ok(())
    }

    async fn profile(&self, user: &Identity) -> Result<Profile> {
        self.record("profile")?;
        decode(serde_json::json!({"userId": user.as_str(), "name": "Ada"}))
    }

    async fn user_threads(&self, _user: &Identity) -> Result<Vec<Thread>> {
        self.record("user_threads")?;
        Ok(Vec::new())
    }

    async fn liked_posts(&self, _user: &Identity) -> Result<Vec<LikedPost>> {
        self.record("liked_posts")?;
        Ok(Vec::new())
    }

    async fn book_history(&self, _user: &Identity) -> Result<Vec<Book>> {
        self.record("book_history")?;
        Ok(Vec::new())
    }
}
